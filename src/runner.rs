//! Headless batch runner driving the monitoring service for a fixed
//! number of ticks.

use std::fmt;
use std::thread;
use std::time::Duration;

use crate::monitor::{MonitoringService, TickSnapshot};

/// Aggregate outcome of a batch run.
pub struct RunSummary {
    /// Snapshot per completed tick, in order.
    pub snapshots: Vec<TickSnapshot>,
    /// Alerts retained in the log when the run ended.
    pub alerts_retained: usize,
    /// Session energy at the end of the run (kWh).
    pub session_energy_kwh: f64,
    /// Session cost at the end of the run.
    pub session_cost: f64,
    /// Highest whole-house current seen on any tick (A).
    pub peak_current_a: f64,
    /// Ticks on which the main limit was exceeded.
    pub overload_ticks: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Run summary ===")?;
        writeln!(f, "ticks           {:>10}", self.snapshots.len())?;
        writeln!(f, "peak current    {:>10.2} A", self.peak_current_a)?;
        writeln!(f, "overload ticks  {:>10}", self.overload_ticks)?;
        writeln!(f, "energy          {:>10.4} kWh", self.session_energy_kwh)?;
        writeln!(f, "cost            {:>10.2}", self.session_cost)?;
        write!(f, "alerts retained {:>10}", self.alerts_retained)
    }
}

/// Runs the service for `ticks` monitoring cycles.
///
/// Sleeps for the configured tick interval between cycles unless `fast`
/// is set; `fast` runs are used for batch export and tests, where
/// energy figures reflect real (near-zero) elapsed time. Per-tick lines
/// go to stdout unless `quiet`.
///
/// The service is started if needed and left running.
pub fn run_monitor(
    service: &mut MonitoringService,
    ticks: u64,
    fast: bool,
    quiet: bool,
) -> RunSummary {
    if !service.is_running() {
        service.start();
    }
    let interval = Duration::from_millis(service.settings().tick_interval_ms);

    let mut snapshots = Vec::with_capacity(ticks as usize);
    let mut peak_current_a = 0.0_f64;
    let mut overload_ticks = 0_usize;

    for i in 0..ticks {
        if !fast && i > 0 {
            thread::sleep(interval);
        }
        let Some(snapshot) = service.tick() else {
            continue;
        };
        if snapshot.total_current_a > peak_current_a {
            peak_current_a = snapshot.total_current_a;
        }
        if snapshot.over_limit {
            overload_ticks += 1;
        }
        if !quiet {
            println!("{snapshot}");
        }
        snapshots.push(snapshot);
    }

    RunSummary {
        snapshots,
        alerts_retained: service.alerts().len(),
        session_energy_kwh: service.energy().session_energy_kwh,
        session_cost: service.energy().session_cost,
        peak_current_a,
        overload_ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SimulationMode, SystemSettings};

    fn scripted_service() -> MonitoringService {
        let settings = SystemSettings {
            simulation_mode: SimulationMode::Scripted,
            ..SystemSettings::default()
        };
        MonitoringService::new(settings, 42)
    }

    #[test]
    fn runs_requested_number_of_ticks() {
        let mut service = scripted_service();
        let summary = run_monitor(&mut service, 10, true, true);
        assert_eq!(summary.snapshots.len(), 10);
        assert_eq!(service.tick_count(), 10);
        assert!(service.is_running());
    }

    #[test]
    fn tracks_peak_current() {
        let mut service = scripted_service();
        let summary = run_monitor(&mut service, 36, true, true);
        let max = summary
            .snapshots
            .iter()
            .map(|s| s.total_current_a)
            .fold(0.0_f64, f64::max);
        assert_eq!(summary.peak_current_a, max);
        assert!(summary.peak_current_a > 0.0);
    }

    #[test]
    fn counts_overload_ticks_under_tight_limit() {
        let settings = SystemSettings {
            main_limit_a: 5.0,
            simulation_mode: SimulationMode::Scripted,
            ..SystemSettings::default()
        };
        let mut service = MonitoringService::new(settings, 42);
        let summary = run_monitor(&mut service, 5, true, true);
        assert!(summary.overload_ticks > 0);
        assert!(summary.alerts_retained > 0);
    }

    #[test]
    fn summary_display_mentions_ticks() {
        let mut service = scripted_service();
        let summary = run_monitor(&mut service, 3, true, true);
        let text = summary.to_string();
        assert!(text.contains("=== Run summary ==="));
        assert!(text.contains("peak current"));
    }
}
