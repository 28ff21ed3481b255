//! Observable state records exposed to display layers.

use std::fmt;

/// Record of one completed monitoring tick.
///
/// Built after all checks have run, so the alert and shed counts
/// reflect this tick's outcome.
#[derive(Debug, Clone)]
pub struct TickSnapshot {
    /// Tick index since monitoring started.
    pub tick: u64,
    /// Wall-clock seconds elapsed since the previous tick.
    pub elapsed_s: f64,
    /// Whole-house total of valid readings, in amps.
    pub total_current_a: f64,
    /// Whole-house power, in watts.
    pub total_power_w: f64,
    /// Session energy so far, in kWh.
    pub session_energy_kwh: f64,
    /// Session cost so far.
    pub session_cost: f64,
    /// Whether the total exceeded the main limit this tick.
    pub over_limit: bool,
    /// Alerts in the log after this tick.
    pub alert_count: usize,
    /// Entries in the current shed recommendation (zero unless overloaded).
    pub shed_count: usize,
}

impl fmt::Display for TickSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>4} ({:>5.2}s) | load={:>5.1} A  power={:>7.1} W | \
             energy={:.4} kWh  cost={:.4} | alerts={:>3}{}",
            self.tick,
            self.elapsed_s,
            self.total_current_a,
            self.total_power_w,
            self.session_energy_kwh,
            self.session_cost,
            self.alert_count,
            if self.over_limit { "  OVERLOAD" } else { "" },
        )
    }
}

/// Point-in-time view of the whole monitor, for display layers that
/// poll between ticks.
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    /// Whether the tick loop is running.
    pub running: bool,
    /// Ticks completed since the last start.
    pub tick: u64,
    /// Whole-house total of valid readings, in amps.
    pub total_current_a: f64,
    /// Whole-house power, in watts.
    pub total_power_w: f64,
    /// Session energy, in kWh.
    pub session_energy_kwh: f64,
    /// Session cost.
    pub session_cost: f64,
    /// Whether the latest total exceeds the main limit.
    pub over_limit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_snapshot_display_mentions_overload() {
        let snap = TickSnapshot {
            tick: 3,
            elapsed_s: 2.0,
            total_current_a: 45.0,
            total_power_w: 10350.0,
            session_energy_kwh: 0.01,
            session_cost: 0.005,
            over_limit: true,
            alert_count: 2,
            shed_count: 1,
        };
        let line = format!("{snap}");
        assert!(line.contains("OVERLOAD"));
        assert!(line.contains("t=   3"));
    }

    #[test]
    fn tick_snapshot_display_omits_overload_when_fine() {
        let snap = TickSnapshot {
            tick: 0,
            elapsed_s: 2.0,
            total_current_a: 10.0,
            total_power_w: 2300.0,
            session_energy_kwh: 0.0,
            session_cost: 0.0,
            over_limit: false,
            alert_count: 1,
            shed_count: 0,
        };
        assert!(!format!("{snap}").contains("OVERLOAD"));
    }
}
