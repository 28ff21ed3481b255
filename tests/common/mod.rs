//! Shared test fixtures for integration tests.

use smartload::model::{SimulationMode, SystemSettings};
use smartload::monitor::MonitoringService;

/// Default settings switched to the deterministic scripted generator.
pub fn scripted_settings() -> SystemSettings {
    SystemSettings {
        simulation_mode: SimulationMode::Scripted,
        ..SystemSettings::default()
    }
}

/// Scripted settings with a low main limit for overload paths.
pub fn tight_limit_settings() -> SystemSettings {
    SystemSettings {
        main_limit_a: 5.0,
        ..scripted_settings()
    }
}

/// A started service over the default household (seed 42).
pub fn started_service(settings: SystemSettings) -> MonitoringService {
    let mut service = MonitoringService::new(settings, 42);
    service.start();
    service
}
