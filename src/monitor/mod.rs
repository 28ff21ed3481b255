//! Monitoring service and its supporting pieces.

/// Session energy and cost accumulation.
pub mod energy;
pub mod service;
/// Per-tick observable state records.
pub mod snapshot;
/// Greedy load-shedding recommendation.
pub mod shedding;

// Re-export the main types for convenience
pub use energy::EnergyTracker;
pub use service::{MonitoringService, SettingsUpdate};
pub use shedding::ShedAction;
pub use snapshot::{StateSnapshot, TickSnapshot};
