//! Rotation coordinate transform.
//!
//! The transform maps the caller's rotation-aware logical coordinates onto
//! the panel's fixed physical grid. The panel dimensions are never swapped
//! here: a caller presenting a rotated canvas swaps its own reported
//! width/height for 90°/270° and passes coordinates in that space.

/// Display rotation in quarter turns, counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// No rotation (the default).
    #[default]
    Deg0,
    /// Quarter turn.
    Deg90,
    /// Half turn.
    Deg180,
    /// Three-quarter turn.
    Deg270,
}

impl Rotation {
    /// Rotation from an integer setting; only the low two bits are used.
    pub fn from_index(r: u8) -> Self {
        match r & 0x03 {
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            3 => Rotation::Deg270,
            _ => Rotation::Deg0,
        }
    }

    /// The integer setting this rotation stores.
    pub fn index(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// Map a logical coordinate to the physical panel grid.
    ///
    /// `width`/`height` are the fixed panel dimensions. Out-of-canvas
    /// inputs wrap and get rejected by the physical bounds check at the
    /// write site, preserving the silent-drop contract.
    pub fn transform(self, x: u16, y: u16, width: u16, height: u16) -> (u16, u16) {
        match self {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => ((width - 1).wrapping_sub(y), x),
            Rotation::Deg180 => ((width - 1).wrapping_sub(x), (height - 1).wrapping_sub(y)),
            Rotation::Deg270 => (y, (height - 1).wrapping_sub(x)),
        }
    }

    /// Map a physical coordinate back to the logical space; the exact
    /// inverse of [`transform`](Self::transform) for in-bounds points.
    pub fn inverse_transform(self, x: u16, y: u16, width: u16, height: u16) -> (u16, u16) {
        match self {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (y, (width - 1).wrapping_sub(x)),
            Rotation::Deg180 => ((width - 1).wrapping_sub(x), (height - 1).wrapping_sub(y)),
            Rotation::Deg270 => ((height - 1).wrapping_sub(y), x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u16 = 168;
    const H: u16 = 384;

    #[test]
    fn index_wraps_to_two_bits() {
        assert_eq!(Rotation::from_index(0), Rotation::Deg0);
        assert_eq!(Rotation::from_index(3), Rotation::Deg270);
        assert_eq!(Rotation::from_index(5), Rotation::Deg90);
        assert_eq!(Rotation::from_index(0xFF), Rotation::Deg270);
        for r in 0..4 {
            assert_eq!(Rotation::from_index(r).index(), r);
        }
    }

    #[test]
    fn origin_maps_per_table() {
        assert_eq!(Rotation::Deg0.transform(0, 0, W, H), (0, 0));
        assert_eq!(Rotation::Deg90.transform(0, 0, W, H), (167, 0));
        assert_eq!(Rotation::Deg180.transform(0, 0, W, H), (167, 383));
        assert_eq!(Rotation::Deg270.transform(0, 0, W, H), (0, 383));
    }

    #[test]
    fn transform_is_a_bijection() {
        // inverse ∘ forward is the identity over the whole logical canvas
        // (swapped bounds for the quarter turns).
        for r in 0..4 {
            let rot = Rotation::from_index(r);
            let (lw, lh) = match rot {
                Rotation::Deg90 | Rotation::Deg270 => (H, W),
                _ => (W, H),
            };
            for y in (0..lh).step_by(13) {
                for x in (0..lw).step_by(11) {
                    let (px, py) = rot.transform(x, y, W, H);
                    assert!(px < W && py < H, "r={r} ({x},{y}) left the panel");
                    assert_eq!(
                        rot.inverse_transform(px, py, W, H),
                        (x, y),
                        "r={r} not invertible at ({x},{y})"
                    );
                }
            }
        }
    }

    #[test]
    fn distinct_points_stay_distinct() {
        // No two logical points may collide on the panel.
        let rot = Rotation::Deg90;
        let a = rot.transform(10, 20, W, H);
        let b = rot.transform(20, 10, W, H);
        assert_ne!(a, b);
    }
}
