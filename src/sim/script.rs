/// Length of one scripted demo cycle in ticks.
pub const SCRIPT_PERIOD: u64 = 36;

/// Phase of the scripted demo timeline.
///
/// The phase is a total function of `tick % SCRIPT_PERIOD`, cycling
/// through every alert-worthy condition the monitor can detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPhase {
    /// Ticks 0-4 and 30-35: all on appliances draw realistic values.
    Normal,
    /// Ticks 5-9: kitchen circuit draws 1.3x realistic, clamped to max.
    KitchenRamp,
    /// Ticks 10-14: microwave forced on at 5.5 A, other kitchen
    /// appliances at 1.4x realistic.
    KitchenOverload,
    /// Ticks 15-19: appliances named "ac" get +4.2 A and status SURGE.
    AcSurge,
    /// Ticks 20-24: every on appliance at 1.5x realistic, clamped,
    /// pushing the whole house over the main limit.
    HouseOverload,
    /// Ticks 25-29: one random on appliance reads -1.5 A (INVALID).
    SensorFault,
}

impl ScriptPhase {
    /// Returns the phase active at the given tick.
    pub fn at(tick: u64) -> Self {
        match tick % SCRIPT_PERIOD {
            0..=4 => Self::Normal,
            5..=9 => Self::KitchenRamp,
            10..=14 => Self::KitchenOverload,
            15..=19 => Self::AcSurge,
            20..=24 => Self::HouseOverload,
            25..=29 => Self::SensorFault,
            _ => Self::Normal,
        }
    }
}
