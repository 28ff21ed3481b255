//! Monitoring loop driver and TUI application state.

use std::time::Instant;

use crate::model::{Alert, Appliance, SimulationMode, SocketGroup};
use crate::monitor::{MonitoringService, SettingsUpdate, ShedAction, StateSnapshot};

/// TUI application state wrapping a live monitoring service.
pub struct App {
    service: MonitoringService,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// Instant of the last completed monitoring tick.
    pub last_tick: Instant,
    /// Index of the selected appliance row.
    pub selected: usize,
}

impl App {
    /// Wraps a service, leaving it stopped until the user starts it.
    pub fn new(service: MonitoringService) -> Self {
        Self {
            service,
            quit: false,
            last_tick: Instant::now(),
            selected: 0,
        }
    }

    /// Runs one monitoring cycle.
    pub fn tick(&mut self) {
        self.service.tick();
    }

    /// Starts the service when stopped, stops it when running.
    pub fn toggle_running(&mut self) {
        if self.service.is_running() {
            self.service.stop();
        } else {
            self.service.start();
            self.last_tick = Instant::now();
        }
    }

    /// Flips the selected appliance on or off.
    pub fn toggle_selected(&mut self) {
        let Some(name) = self
            .service
            .appliances()
            .get(self.selected)
            .map(|a| a.name.clone())
        else {
            return;
        };
        self.service.toggle_appliance(&name);
    }

    /// Moves the appliance selection down one row, wrapping.
    pub fn select_next(&mut self) {
        let len = self.service.appliances().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Moves the appliance selection up one row, wrapping.
    pub fn select_prev(&mut self) {
        let len = self.service.appliances().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Switches between the random and scripted generators.
    pub fn switch_mode(&mut self) {
        let s = self.service.settings();
        let next = match s.simulation_mode {
            SimulationMode::Random => "scripted",
            SimulationMode::Scripted => "random",
        };
        let update = SettingsUpdate {
            voltage_v: s.voltage_v,
            main_limit_a: s.main_limit_a,
            surge_threshold_a: s.surge_threshold_a,
            tariff_per_kwh: s.tariff_per_kwh,
            mode: next.to_string(),
        };
        // cannot fail: every field comes from the current valid settings
        let _ = self.service.update_settings(&update);
    }

    /// Empties the alert log.
    pub fn clear_alerts(&mut self) {
        self.service.clear_alerts();
    }

    pub fn is_running(&self) -> bool {
        self.service.is_running()
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.service.settings().tick_interval_ms
    }

    pub fn mode(&self) -> SimulationMode {
        self.service.settings().simulation_mode
    }

    pub fn appliances(&self) -> &[Appliance] {
        self.service.appliances()
    }

    pub fn groups(&self) -> &[SocketGroup] {
        self.service.socket_groups()
    }

    pub fn alerts(&self) -> &[Alert] {
        self.service.alerts().entries()
    }

    pub fn shed_plan(&self) -> &[ShedAction] {
        self.service.shed_plan()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.service.state_snapshot()
    }

    pub fn formatted_energy(&self) -> String {
        self.service.energy().formatted_energy()
    }
}
