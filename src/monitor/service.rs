//! The orchestrating monitoring service and its tick cycle.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crate::config::ConfigError;
use crate::model::catalog;
use crate::model::{
    AlertLog, Appliance, GroupStatus, Severity, SimulationMode, SocketGroup, SystemSettings,
};
use crate::sim::SimulationEngine;

use super::energy::EnergyTracker;
use super::shedding::{self, ShedAction};
use super::snapshot::{StateSnapshot, TickSnapshot};

/// Runtime settings-update command.
///
/// Carries the mode as a string so callers (CLI, API) hand over raw
/// input; validation happens in [`MonitoringService::update_settings`]
/// and a rejected update leaves the prior settings untouched.
#[derive(Debug, Clone)]
pub struct SettingsUpdate {
    pub voltage_v: f64,
    pub main_limit_a: f64,
    pub surge_threshold_a: f64,
    pub tariff_per_kwh: f64,
    pub mode: String,
}

/// Orchestrates the tick cycle over appliances, groups, alerts, and
/// energy tracking.
///
/// All state mutation happens synchronously inside [`tick_at`]; the
/// host drives the timer. States are STOPPED and RUNNING, toggled by
/// the idempotent [`start`] / [`stop`] commands.
///
/// [`tick_at`]: MonitoringService::tick_at
/// [`start`]: MonitoringService::start
/// [`stop`]: MonitoringService::stop
pub struct MonitoringService {
    appliances: Vec<Appliance>,
    groups: Vec<SocketGroup>,
    alerts: AlertLog,
    settings: SystemSettings,
    engine: SimulationEngine,
    tracker: EnergyTracker,
    shed_plan: Vec<ShedAction>,
    running: bool,
    last_update: Instant,
    tick_count: u64,
}

impl MonitoringService {
    /// Creates a service over the default household catalog.
    pub fn new(settings: SystemSettings, seed: u64) -> Self {
        Self::with_household(
            settings,
            seed,
            catalog::default_socket_groups(),
            catalog::default_appliances(),
        )
    }

    /// Creates a service over a custom household layout.
    pub fn with_household(
        settings: SystemSettings,
        seed: u64,
        groups: Vec<SocketGroup>,
        appliances: Vec<Appliance>,
    ) -> Self {
        println!(
            "Initialized {} appliances in {} socket groups",
            appliances.len(),
            groups.len()
        );
        Self {
            appliances,
            groups,
            alerts: AlertLog::new(),
            settings,
            engine: SimulationEngine::new(seed),
            tracker: EnergyTracker::new(),
            shed_plan: Vec::new(),
            running: false,
            last_update: Instant::now(),
            tick_count: 0,
        }
    }

    /// Starts monitoring. A no-op (logged) when already running.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Starts monitoring with an explicit clock reading.
    pub fn start_at(&mut self, now: Instant) {
        if self.running {
            println!("Monitoring service already running");
            return;
        }
        println!("Starting monitoring service...");
        self.running = true;
        self.last_update = now;
        self.tick_count = 0;
        self.tracker.reset();
        self.add_alert("System started", Severity::Info, "System");
    }

    /// Stops monitoring. A no-op (logged) when already stopped.
    pub fn stop(&mut self) {
        if !self.running {
            println!("Monitoring service not running");
            return;
        }
        println!("Stopping monitoring service...");
        self.running = false;
        self.add_alert("System stopped", Severity::Info, "System");
    }

    /// Runs one monitoring tick now.
    pub fn tick(&mut self) -> Option<TickSnapshot> {
        self.tick_at(Instant::now())
    }

    /// Runs one monitoring tick with an explicit clock reading.
    ///
    /// Returns `None` when stopped, or when the cycle failed; a failed
    /// cycle is logged and surfaced as a DANGER alert and never stops
    /// the service. Elapsed time is measured against the previous tick
    /// (or the start instant for the first one).
    pub fn tick_at(&mut self, now: Instant) -> Option<TickSnapshot> {
        if !self.running {
            return None;
        }

        let delta_s = now.saturating_duration_since(self.last_update).as_secs_f64();
        self.last_update = now;

        match panic::catch_unwind(AssertUnwindSafe(|| self.run_cycle(delta_s))) {
            Ok(snapshot) => {
                self.tick_count += 1;
                Some(snapshot)
            }
            Err(payload) => {
                let detail = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown failure".to_string());
                eprintln!("Error during update cycle: {detail}");
                self.add_alert(format!("System error: {detail}"), Severity::Danger, "System");
                None
            }
        }
    }

    /// The eight-step tick cycle. Panics here are caught by the caller.
    fn run_cycle(&mut self, delta_s: f64) -> TickSnapshot {
        let mode = self.settings.simulation_mode;
        self.engine
            .advance(&mut self.appliances, mode, self.settings.surge_threshold_a);

        self.refresh_groups();

        let total_current_a = self.total_current();
        let total_power_w = self.settings.power_w(total_current_a);

        self.check_overload(total_current_a);
        self.check_surges();
        self.check_invalid_readings();

        self.tracker.update(
            total_current_a,
            self.settings.voltage_v,
            delta_s,
            self.settings.tariff_per_kwh,
        );

        TickSnapshot {
            tick: self.tick_count,
            elapsed_s: delta_s,
            total_current_a,
            total_power_w,
            session_energy_kwh: self.tracker.session_energy_kwh,
            session_cost: self.tracker.session_cost,
            over_limit: self.settings.is_over_main_limit(total_current_a),
            alert_count: self.alerts.len(),
            shed_count: self.shed_plan.len(),
        }
    }

    /// Recomputes totals and statuses per group, emitting transition
    /// alerts.
    fn refresh_groups(&mut self) {
        let mut pending: Vec<(String, Severity, String)> = Vec::new();

        for group in &mut self.groups {
            group.recompute_total(&self.appliances);
            let old = group.update_status();
            if old == group.status {
                continue;
            }
            match group.status {
                GroupStatus::Danger => {
                    let highest = group
                        .highest_current_appliance(&self.appliances)
                        .map_or_else(|| "unknown".to_string(), |a| a.name.clone());
                    pending.push((
                        format!(
                            "{} socket group overloaded ({:.1}A). Highest: {highest}",
                            group.name, group.total_current_a
                        ),
                        Severity::Danger,
                        group.name.clone(),
                    ));
                }
                GroupStatus::Warning => {
                    pending.push((
                        format!(
                            "{} socket group high load ({:.1}A of {:.1}A). Avoid adding appliances.",
                            group.name, group.total_current_a, group.rated_capacity_a
                        ),
                        Severity::Warning,
                        group.name.clone(),
                    ));
                }
                GroupStatus::Ok => {}
            }
        }

        for (message, severity, item) in pending {
            self.add_alert(message, severity, item);
        }
    }

    /// Emits overload/approaching alerts and maintains the shed plan.
    fn check_overload(&mut self, total_current_a: f64) {
        if self.settings.is_over_main_limit(total_current_a) {
            self.add_alert(
                format!(
                    "Total load ({:.1}A) exceeded main limit ({:.0}A)",
                    total_current_a, self.settings.main_limit_a
                ),
                Severity::Danger,
                "Main",
            );
            let excess = total_current_a - self.settings.main_limit_a;
            self.shed_plan = shedding::recommend(&self.appliances, excess);
            if !self.shed_plan.is_empty() {
                let advice: Vec<String> = self
                    .shed_plan
                    .iter()
                    .map(|s| format!("Switch off {} ({:.1}A)", s.appliance, s.current_a))
                    .collect();
                println!("Load shedding recommendation: {}", advice.join(", "));
            }
        } else {
            if self.settings.is_approaching_limit(total_current_a) {
                self.add_alert(
                    format!(
                        "High load: {:.1}A of {:.0}A limit",
                        total_current_a, self.settings.main_limit_a
                    ),
                    Severity::Warning,
                    "Main",
                );
            }
            self.shed_plan.clear();
        }
    }

    /// Emits a warning for every appliance whose valid reading jumped
    /// by at least the surge threshold since the previous tick.
    fn check_surges(&mut self) {
        let threshold = self.settings.surge_threshold_a;
        let surges: Vec<(String, f64)> = self
            .appliances
            .iter()
            .filter(|a| a.is_valid_reading())
            .filter_map(|a| {
                let delta = a.current_a - a.previous_current();
                (delta >= threshold).then(|| (a.name.clone(), delta))
            })
            .collect();

        for (name, delta) in surges {
            self.add_alert(
                format!("Surge detected on {name}: +{delta:.1}A"),
                Severity::Warning,
                name,
            );
        }
    }

    /// Emits a warning for every on appliance whose reading is invalid.
    fn check_invalid_readings(&mut self) {
        let faults: Vec<String> = self
            .appliances
            .iter()
            .filter(|a| a.is_on && !a.is_valid_reading())
            .map(|a| a.name.clone())
            .collect();

        for name in faults {
            self.add_alert(
                format!("Sensor fault on {name}. Reading ignored."),
                Severity::Warning,
                name,
            );
        }
    }

    /// Whole-house total of valid readings, in amps.
    pub fn total_current(&self) -> f64 {
        self.appliances
            .iter()
            .filter(|a| a.is_valid_reading())
            .map(|a| a.current_a)
            .sum()
    }

    /// Whole-house power, in watts.
    pub fn total_power(&self) -> f64 {
        self.settings.power_w(self.total_current())
    }

    /// Records an alert, printing it when not suppressed as a duplicate.
    pub fn add_alert(&mut self, message: impl Into<String>, severity: Severity, item: impl Into<String>) {
        if self.alerts.push(message, severity, item) {
            if let Some(alert) = self.alerts.entries().first() {
                println!("Alert: {alert}");
            }
        }
    }

    /// Flips an appliance's on/off flag, returning the new state, or
    /// `None` when no appliance has that name.
    pub fn toggle_appliance(&mut self, name: &str) -> Option<bool> {
        let appliance = self
            .appliances
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))?;
        appliance.is_on = !appliance.is_on;
        let is_on = appliance.is_on;
        println!(
            "Toggled {}: {}",
            appliance.name,
            if is_on { "ON" } else { "OFF" }
        );
        Some(is_on)
    }

    /// Validates and applies a settings update atomically.
    ///
    /// # Errors
    ///
    /// Returns every violated constraint; on error nothing is applied.
    pub fn update_settings(&mut self, update: &SettingsUpdate) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if !(update.voltage_v > 0.0) {
            errors.push(ConfigError::new("settings.voltage_v", "must be > 0"));
        }
        if !(update.main_limit_a > 0.0) {
            errors.push(ConfigError::new("settings.main_limit_a", "must be > 0"));
        }
        if !(update.surge_threshold_a > 0.0) {
            errors.push(ConfigError::new("settings.surge_threshold_a", "must be > 0"));
        }
        if !(update.tariff_per_kwh >= 0.0) {
            errors.push(ConfigError::new("settings.tariff_per_kwh", "must be >= 0"));
        }
        let mode = SimulationMode::parse(&update.mode);
        if mode.is_none() {
            errors.push(ConfigError::new(
                "settings.mode",
                format!("must be \"random\" or \"scripted\", got \"{}\"", update.mode),
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        self.settings.voltage_v = update.voltage_v;
        self.settings.main_limit_a = update.main_limit_a;
        self.settings.surge_threshold_a = update.surge_threshold_a;
        self.settings.tariff_per_kwh = update.tariff_per_kwh;
        if let Some(mode) = mode {
            self.settings.simulation_mode = mode;
        }
        println!("Settings updated");
        Ok(())
    }

    /// Removes all alerts.
    pub fn clear_alerts(&mut self) {
        self.alerts.clear();
        println!("Alerts cleared");
    }

    /// Acknowledges the alert at `index` (newest first).
    pub fn acknowledge_alert(&mut self, index: usize) -> bool {
        self.alerts.acknowledge(index)
    }

    // Read-only accessors for display layers.

    pub fn appliances(&self) -> &[Appliance] {
        &self.appliances
    }

    pub fn socket_groups(&self) -> &[SocketGroup] {
        &self.groups
    }

    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    pub fn settings(&self) -> &SystemSettings {
        &self.settings
    }

    pub fn energy(&self) -> &EnergyTracker {
        &self.tracker
    }

    pub fn shed_plan(&self) -> &[ShedAction] {
        &self.shed_plan
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Point-in-time view for observers polling between ticks.
    pub fn state_snapshot(&self) -> StateSnapshot {
        let total_current_a = self.total_current();
        StateSnapshot {
            running: self.running,
            tick: self.tick_count,
            total_current_a,
            total_power_w: self.settings.power_w(total_current_a),
            session_energy_kwh: self.tracker.session_energy_kwh,
            session_cost: self.tracker.session_cost,
            over_limit: self.settings.is_over_main_limit(total_current_a),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::model::Priority;

    fn scripted_settings() -> SystemSettings {
        SystemSettings {
            simulation_mode: SimulationMode::Scripted,
            ..SystemSettings::default()
        }
    }

    fn ticked(service: &mut MonitoringService, ticks: u64) {
        for _ in 0..ticks {
            service.tick();
        }
    }

    #[test]
    fn start_emits_info_alert_and_is_idempotent() {
        let mut service = MonitoringService::new(SystemSettings::default(), 42);
        service.start();
        assert!(service.is_running());
        assert_eq!(service.alerts().len(), 1);
        assert_eq!(service.alerts().entries()[0].message, "System started");

        // second start is a logged no-op
        service.start();
        assert_eq!(service.alerts().len(), 1);
    }

    #[test]
    fn stop_emits_info_alert_and_is_idempotent() {
        let mut service = MonitoringService::new(SystemSettings::default(), 42);
        service.stop();
        assert!(service.alerts().is_empty());

        service.start();
        service.stop();
        assert!(!service.is_running());
        assert_eq!(service.alerts().entries()[0].message, "System stopped");
    }

    #[test]
    fn tick_while_stopped_is_ignored() {
        let mut service = MonitoringService::new(SystemSettings::default(), 42);
        assert!(service.tick().is_none());
        assert_eq!(service.tick_count(), 0);
    }

    #[test]
    fn tick_advances_counter_and_returns_snapshot() {
        let mut service = MonitoringService::new(scripted_settings(), 42);
        service.start();
        let snap = service.tick();
        assert!(snap.is_some());
        assert_eq!(snap.map(|s| s.tick), Some(0));
        assert_eq!(service.tick_count(), 1);
    }

    #[test]
    fn restart_resets_energy_tracker() {
        let t0 = Instant::now();
        let mut service = MonitoringService::new(scripted_settings(), 42);
        service.start_at(t0);
        service.tick_at(t0 + Duration::from_secs(2));
        assert!(service.energy().session_energy_kwh > 0.0);

        service.stop();
        service.start_at(t0 + Duration::from_secs(4));
        assert_eq!(service.energy().session_energy_kwh, 0.0);
    }

    #[test]
    fn energy_accrues_with_elapsed_time() {
        let t0 = Instant::now();
        let mut service = MonitoringService::new(scripted_settings(), 42);
        service.start_at(t0);
        let snap = service.tick_at(t0 + Duration::from_secs(2));
        assert_eq!(snap.as_ref().map(|s| s.elapsed_s), Some(2.0));
        // scripted normal phase: several appliances drawing > 0
        assert!(service.energy().session_energy_kwh > 0.0);
        assert!(service.energy().current_power_w > 0.0);
    }

    #[test]
    fn overload_emits_danger_alert_and_shed_plan() {
        let settings = SystemSettings {
            main_limit_a: 5.0,
            ..scripted_settings()
        };
        let mut service = MonitoringService::new(settings, 42);
        service.start();
        service.tick();

        assert!(service
            .alerts()
            .entries()
            .iter()
            .any(|a| a.message.contains("exceeded main limit") && a.severity == Severity::Danger));
        assert!(!service.shed_plan().is_empty());
    }

    #[test]
    fn shed_plan_clears_when_load_drops() {
        let settings = SystemSettings {
            main_limit_a: 5.0,
            ..scripted_settings()
        };
        let mut service = MonitoringService::new(settings, 42);
        service.start();
        service.tick();
        assert!(!service.shed_plan().is_empty());

        // raising the limit ends the overload on the next tick
        let update = SettingsUpdate {
            voltage_v: 230.0,
            main_limit_a: 500.0,
            surge_threshold_a: 3.0,
            tariff_per_kwh: 0.50,
            mode: "scripted".to_string(),
        };
        assert!(service.update_settings(&update).is_ok());
        service.tick();
        assert!(service.shed_plan().is_empty());
    }

    #[test]
    fn scripted_ac_phase_emits_surge_alert() {
        // generous rating so the surged reading stays valid
        let mut ac = Appliance::new("AC Unit", "Living Room", "Heavy Load", 50.0, Priority::NonEssential);
        ac.is_on = true;
        let groups = vec![SocketGroup::new("Heavy Load", 60.0)];
        let mut service =
            MonitoringService::with_household(scripted_settings(), 42, groups, vec![ac]);
        service.start();
        ticked(&mut service, 16); // ticks 0..=15, last one in the AC surge phase

        assert!(service
            .alerts()
            .entries()
            .iter()
            .any(|a| a.message.starts_with("Surge detected on AC Unit")));
    }

    #[test]
    fn sensor_fault_emits_warning_for_single_appliance_household() {
        let mut freezer = Appliance::new("Garage Freezer", "Garage", "Garage", 10.0, Priority::NonEssential);
        freezer.is_on = true;
        let groups = vec![SocketGroup::new("Garage", 13.0)];
        let mut service =
            MonitoringService::with_household(scripted_settings(), 42, groups, vec![freezer]);
        service.start();
        ticked(&mut service, 26); // ticks 0..=25, last one in the sensor-fault phase

        assert!(service
            .alerts()
            .entries()
            .iter()
            .any(|a| a.message == "Sensor fault on Garage Freezer. Reading ignored."));
    }

    #[test]
    fn group_danger_transition_names_highest_appliance() {
        // a 2 A circuit that the kettle alone will always overload
        let mut kettle = Appliance::new("Electric Kettle", "Kitchen", "Kitchen", 20.0, Priority::NonEssential);
        kettle.is_on = true;
        let groups = vec![SocketGroup::new("Kitchen", 2.0)];
        let mut service =
            MonitoringService::with_household(scripted_settings(), 42, groups, vec![kettle]);
        service.start();
        service.tick();

        assert!(service.alerts().entries().iter().any(|a| {
            a.message.contains("Kitchen socket group overloaded")
                && a.message.contains("Electric Kettle")
        }));
    }

    #[test]
    fn toggle_appliance_flips_state() {
        let mut service = MonitoringService::new(SystemSettings::default(), 42);
        assert_eq!(service.toggle_appliance("Microwave"), Some(true));
        assert_eq!(service.toggle_appliance("microwave"), Some(false));
        assert_eq!(service.toggle_appliance("Toaster"), None);
    }

    #[test]
    fn invalid_settings_update_is_rejected_wholesale() {
        let mut service = MonitoringService::new(SystemSettings::default(), 42);
        let before = service.settings().clone();
        let update = SettingsUpdate {
            voltage_v: -230.0,
            main_limit_a: 40.0,
            surge_threshold_a: 3.0,
            tariff_per_kwh: 0.50,
            mode: "replay".to_string(),
        };
        let errors = service.update_settings(&update).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(*service.settings(), before);
    }

    #[test]
    fn valid_settings_update_applies() {
        let mut service = MonitoringService::new(SystemSettings::default(), 42);
        let update = SettingsUpdate {
            voltage_v: 240.0,
            main_limit_a: 60.0,
            surge_threshold_a: 4.0,
            tariff_per_kwh: 0.75,
            mode: "scripted".to_string(),
        };
        assert!(service.update_settings(&update).is_ok());
        assert_eq!(service.settings().voltage_v, 240.0);
        assert_eq!(service.settings().main_limit_a, 60.0);
        assert_eq!(service.settings().simulation_mode, SimulationMode::Scripted);
    }

    #[test]
    fn clear_alerts_empties_log() {
        let mut service = MonitoringService::new(SystemSettings::default(), 42);
        service.start();
        assert!(!service.alerts().is_empty());
        service.clear_alerts();
        assert!(service.alerts().is_empty());
    }

    #[test]
    fn acknowledge_alert_by_index() {
        let mut service = MonitoringService::new(SystemSettings::default(), 42);
        service.start();
        assert!(service.acknowledge_alert(0));
        assert!(service.alerts().entries()[0].acknowledged);
        assert!(!service.acknowledge_alert(99));
    }

    #[test]
    fn state_snapshot_reflects_running_state() {
        let mut service = MonitoringService::new(scripted_settings(), 42);
        let snap = service.state_snapshot();
        assert!(!snap.running);
        assert_eq!(snap.tick, 0);

        service.start();
        service.tick();
        let snap = service.state_snapshot();
        assert!(snap.running);
        assert_eq!(snap.tick, 1);
        assert!(snap.total_current_a > 0.0);
    }
}
