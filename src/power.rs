//! Controller power-mode state.

/// Power mode of the controller, tracked by the driver so redundant mode
/// switches become no-ops and the sleep entry ordering can be enforced.
///
/// One value at a time; the high/low power flags of the raw protocol are
/// collapsed into this enum so the illegal combinations (both set, both
/// clear after init) cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerState {
    /// Constructed but `initialize()` has not run; no command issued yet.
    #[default]
    Uninitialized,
    /// High power mode: fast refresh, higher current draw.
    HighPower,
    /// Low power mode: ~1 Hz refresh, minimal current draw.
    LowPower,
    /// Sleep-in issued; panel retains RAM but does not refresh.
    Sleeping,
}
