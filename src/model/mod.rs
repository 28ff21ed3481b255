//! Data entities for the load monitor.

/// Alert records and the bounded, deduplicating alert log.
pub mod alert;
/// Electrical appliance model and reading validity rules.
pub mod appliance;
/// Fixed startup household used when no custom layout is given.
pub mod catalog;
/// Socket group (circuit) aggregation and status thresholds.
pub mod socket_group;
/// Process-wide system settings.
pub mod settings;

// Re-export the main types for convenience
pub use alert::{Alert, AlertLog, Severity};
pub use appliance::{Appliance, ApplianceStatus, Priority};
pub use settings::{SimulationMode, SystemSettings};
pub use socket_group::{GroupStatus, SocketGroup};
