//! API request and response types.
//!
//! Field names follow CSV schema v1 conventions for consistency across
//! export formats. Enum-like fields (priority, statuses, severity) are
//! serialized as their display strings.

use serde::{Deserialize, Serialize};

use crate::model::{Alert, Appliance, Priority, SocketGroup};
use crate::monitor::{ShedAction, StateSnapshot, TickSnapshot};

/// Run state, totals, and session energy.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub running: bool,
    pub tick: u64,
    pub total_current_a: f64,
    pub total_power_w: f64,
    pub session_energy_kwh: f64,
    pub session_cost: f64,
    pub over_limit: bool,
}

impl From<StateSnapshot> for StateResponse {
    fn from(s: StateSnapshot) -> Self {
        Self {
            running: s.running,
            tick: s.tick,
            total_current_a: s.total_current_a,
            total_power_w: s.total_power_w,
            session_energy_kwh: s.session_energy_kwh,
            session_cost: s.session_cost,
            over_limit: s.over_limit,
        }
    }
}

/// One appliance's latest reading and status.
#[derive(Debug, Serialize)]
pub struct ApplianceRecord {
    pub name: String,
    pub location: String,
    pub group: String,
    pub current_a: f64,
    pub max_current_a: f64,
    pub priority: String,
    pub status: String,
    pub is_on: bool,
}

impl From<&Appliance> for ApplianceRecord {
    fn from(a: &Appliance) -> Self {
        Self {
            name: a.name.clone(),
            location: a.location.clone(),
            group: a.group.clone(),
            current_a: a.current_a,
            max_current_a: a.max_current_a,
            priority: match a.priority {
                Priority::Essential => "essential".to_string(),
                Priority::NonEssential => "non-essential".to_string(),
            },
            status: a.status.to_string(),
            is_on: a.is_on,
        }
    }
}

/// One socket group's load and status.
#[derive(Debug, Serialize)]
pub struct GroupRecord {
    pub name: String,
    pub rated_capacity_a: f64,
    pub total_current_a: f64,
    pub load_pct: f64,
    pub status: String,
}

impl From<&SocketGroup> for GroupRecord {
    fn from(g: &SocketGroup) -> Self {
        Self {
            name: g.name.clone(),
            rated_capacity_a: g.rated_capacity_a,
            total_current_a: g.total_current_a,
            load_pct: g.load_percentage(),
            status: format!("{:?}", g.status).to_ascii_lowercase(),
        }
    }
}

/// One alert log entry.
#[derive(Debug, Serialize)]
pub struct AlertRecord {
    pub timestamp: String,
    pub message: String,
    pub severity: String,
    pub affected_item: String,
    pub acknowledged: bool,
}

impl From<&Alert> for AlertRecord {
    fn from(a: &Alert) -> Self {
        Self {
            timestamp: a.formatted_timestamp(),
            message: a.message.clone(),
            severity: a.severity.to_string(),
            affected_item: a.affected_item.clone(),
            acknowledged: a.acknowledged,
        }
    }
}

/// One entry of the load-shedding recommendation.
#[derive(Debug, Serialize)]
pub struct ShedRecord {
    pub appliance: String,
    pub current_a: f64,
}

impl From<&ShedAction> for ShedRecord {
    fn from(s: &ShedAction) -> Self {
        Self {
            appliance: s.appliance.clone(),
            current_a: s.current_a,
        }
    }
}

/// One monitoring cycle's outcome, returned by `POST /tick`.
#[derive(Debug, Serialize)]
pub struct TickRecord {
    pub tick: u64,
    pub elapsed_s: f64,
    pub total_current_a: f64,
    pub total_power_w: f64,
    pub energy_kwh: f64,
    pub cost: f64,
    pub over_limit: bool,
    pub alert_count: usize,
    pub shed_count: usize,
}

impl From<&TickSnapshot> for TickRecord {
    fn from(s: &TickSnapshot) -> Self {
        Self {
            tick: s.tick,
            elapsed_s: s.elapsed_s,
            total_current_a: s.total_current_a,
            total_power_w: s.total_power_w,
            energy_kwh: s.session_energy_kwh,
            cost: s.session_cost,
            over_limit: s.over_limit,
            alert_count: s.alert_count,
            shed_count: s.shed_count,
        }
    }
}

/// Toggle outcome: the appliance and its new state.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub appliance: String,
    pub is_on: bool,
}

/// Settings update request body for `PUT /settings`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsBody {
    pub voltage_v: f64,
    pub main_limit_a: f64,
    pub surge_threshold_a: f64,
    pub tariff_per_kwh: f64,
    pub mode: String,
}

/// Error payload with one message per violated constraint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errors: Vec<String>,
}

impl ErrorResponse {
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}
