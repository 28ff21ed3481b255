use std::fmt;

/// Fraction of the main limit at which the approaching-limit band starts.
const APPROACH_FRACTION: f64 = 0.8;

/// How synthetic readings are generated each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationMode {
    /// Randomized readings with occasional injected faults and surges.
    #[default]
    Random,
    /// Deterministic 36-tick demo timeline.
    Scripted,
}

impl SimulationMode {
    /// Parses a mode name as used in settings files and commands.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Some(Self::Random),
            "scripted" => Some(Self::Scripted),
            _ => None,
        }
    }
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Random => "random",
            Self::Scripted => "scripted",
        };
        f.write_str(s)
    }
}

/// Process-wide configuration read by every component.
///
/// Constructed once and passed to the service and engine explicitly;
/// mutable at runtime only through the service's validated
/// settings-update command.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemSettings {
    /// Mains supply voltage in volts.
    pub voltage_v: f64,
    /// Whole-house current limit in amps.
    pub main_limit_a: f64,
    /// Per-appliance current delta that counts as a surge, in amps.
    pub surge_threshold_a: f64,
    /// Energy tariff in currency units per kWh.
    pub tariff_per_kwh: f64,
    /// Synthetic reading generation mode.
    pub simulation_mode: SimulationMode,
    /// Tick interval in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            voltage_v: 230.0,
            main_limit_a: 40.0,
            surge_threshold_a: 3.0,
            tariff_per_kwh: 0.50,
            simulation_mode: SimulationMode::Random,
            tick_interval_ms: 2000,
        }
    }
}

impl SystemSettings {
    /// Returns `true` when the total exceeds the main limit.
    pub fn is_over_main_limit(&self, total_current_a: f64) -> bool {
        total_current_a > self.main_limit_a
    }

    /// Returns `true` when the total is within [80%, 100%] of the main
    /// limit. The 80% boundary itself is inside the band.
    pub fn is_approaching_limit(&self, total_current_a: f64) -> bool {
        total_current_a >= self.main_limit_a * APPROACH_FRACTION
            && total_current_a <= self.main_limit_a
    }

    /// Instantaneous power in watts for a given current.
    pub fn power_w(&self, current_a: f64) -> f64 {
        self.voltage_v * current_a
    }

    /// Cost of an energy amount at the configured tariff.
    pub fn cost_for(&self, energy_kwh: f64) -> f64 {
        energy_kwh * self.tariff_per_kwh
    }

    /// Restores the built-in default settings.
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}
