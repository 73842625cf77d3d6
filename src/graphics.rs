//! Primitive rasterizer over an abstract pixel-write capability.
//!
//! The rasterizer knows nothing about pixel packing or rotation: it only
//! needs something that can absorb single-pixel writes. Both drivers and
//! both framebuffers implement [`PixelSink`], so every algorithm here can
//! be exercised against a pure in-memory sink.

/// Single-pixel write capability.
///
/// Coordinates are signed so intermediate rasterizer math can go negative;
/// implementations silently drop anything outside their grid.
pub trait PixelSink {
    /// Write one pixel. Out-of-range writes are a silent no-op.
    fn write_pixel(&mut self, x: i32, y: i32, on: bool);
}

/// Most intersections one scanline of a filled polygon can produce.
/// Triangles need three; the sampled-arc composites stay well below this.
const MAX_SCANLINE_NODES: usize = 16;

/// Vector drawing primitives, available on every [`PixelSink`].
///
/// All shapes are implicitly clipped by the sink. Endpoints are inclusive.
pub trait Primitives: PixelSink {
    /// Integer Bresenham line, symmetric in all eight octants. Equal
    /// endpoints write exactly one pixel.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.write_pixel(x, y, on);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Rectangle outline between two opposite corners.
    fn draw_rectangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        self.draw_line(x0, y0, x1, y0, on);
        self.draw_line(x1, y0, x1, y1, on);
        self.draw_line(x1, y1, x0, y1, on);
        self.draw_line(x0, y1, x0, y0, on);
    }

    /// Filled rectangle, one horizontal span per row.
    fn draw_filled_rectangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        let (ya, yb) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        for y in ya..=yb {
            self.draw_line(x0, y, x1, y, on);
        }
    }

    /// Midpoint circle with 8-way symmetry. Radius 0 writes only the
    /// center pixel; a negative radius writes nothing.
    fn draw_circle(&mut self, cx: i32, cy: i32, r: i32, on: bool) {
        if r < 0 {
            return;
        }
        if r == 0 {
            self.write_pixel(cx, cy, on);
            return;
        }
        let mut x = 0;
        let mut y = r;
        let mut d = 1 - r;
        while x <= y {
            self.write_pixel(cx + x, cy + y, on);
            self.write_pixel(cx - x, cy + y, on);
            self.write_pixel(cx + x, cy - y, on);
            self.write_pixel(cx - x, cy - y, on);
            self.write_pixel(cx + y, cy + x, on);
            self.write_pixel(cx - y, cy + x, on);
            self.write_pixel(cx + y, cy - x, on);
            self.write_pixel(cx - y, cy - x, on);
            x += 1;
            if d < 0 {
                d += 2 * x + 1;
            } else {
                y -= 1;
                d += 2 * (x - y) + 1;
            }
        }
    }

    /// Filled circle: same midpoint walk, one horizontal span between the
    /// two x-extents per symmetric y-offset.
    fn draw_filled_circle(&mut self, cx: i32, cy: i32, r: i32, on: bool) {
        if r < 0 {
            return;
        }
        if r == 0 {
            self.write_pixel(cx, cy, on);
            return;
        }
        let mut x = 0;
        let mut y = r;
        let mut d = 1 - r;
        while x <= y {
            self.draw_line(cx - x, cy + y, cx + x, cy + y, on);
            self.draw_line(cx - x, cy - y, cx + x, cy - y, on);
            self.draw_line(cx - y, cy + x, cx + y, cy + x, on);
            self.draw_line(cx - y, cy - x, cx + y, cy - x, on);
            x += 1;
            if d < 0 {
                d += 2 * x + 1;
            } else {
                y -= 1;
                d += 2 * (x - y) + 1;
            }
        }
    }

    /// Triangle outline.
    fn draw_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        on: bool,
    ) {
        self.draw_line(x0, y0, x1, y1, on);
        self.draw_line(x1, y1, x2, y2, on);
        self.draw_line(x2, y2, x0, y0, on);
    }

    /// Filled triangle via the general polygon scanline fill.
    fn draw_filled_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        on: bool,
    ) {
        self.fill_polygon(&[(x0, y0), (x1, y1), (x2, y2)], on);
    }

    /// Even-odd scanline fill of an arbitrary closed polygon.
    ///
    /// For each scanline the x-intersections of all crossing edges are
    /// collected, sorted ascending, and alternate pairs are filled. Works
    /// for concave and self-intersecting outlines, including curved
    /// composites built from sampled arc points. Fewer than three vertices
    /// draw nothing.
    fn fill_polygon(&mut self, points: &[(i32, i32)], on: bool) {
        if points.len() < 3 {
            return;
        }
        let mut min_y = points[0].1;
        let mut max_y = points[0].1;
        for &(_, y) in points {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        for y in min_y..=max_y {
            let mut nodes = [0i32; MAX_SCANLINE_NODES];
            let mut count = 0;

            // Half-open crossing test so shared vertices count once.
            let mut j = points.len() - 1;
            for i in 0..points.len() {
                let (xi, yi) = points[i];
                let (xj, yj) = points[j];
                if (yi > y) != (yj > y) && count < MAX_SCANLINE_NODES {
                    nodes[count] = xi + (y - yi) * (xj - xi) / (yj - yi);
                    count += 1;
                }
                j = i;
            }

            // Insertion sort; node counts are tiny.
            for a in 1..count {
                let v = nodes[a];
                let mut b = a;
                while b > 0 && nodes[b - 1] > v {
                    nodes[b] = nodes[b - 1];
                    b -= 1;
                }
                nodes[b] = v;
            }

            let mut k = 0;
            while k + 1 < count {
                self.draw_line(nodes[k], y, nodes[k + 1], y, on);
                k += 2;
            }
        }
    }
}

impl<T: PixelSink + ?Sized> Primitives for T {}
