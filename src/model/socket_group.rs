use std::fmt;

use super::appliance::Appliance;

/// Load fraction of rated capacity below which a group is OK.
const OK_FRACTION: f64 = 0.77;

/// Socket-group status derived from total load vs rated capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStatus {
    /// Total below 77% of rated capacity.
    Ok,
    /// Total between 77% and 100% of rated capacity, inclusive.
    Warning,
    /// Total above rated capacity.
    Danger,
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Danger => "DANGER",
        };
        f.write_str(s)
    }
}

/// A modeled household circuit aggregating several appliances.
///
/// The group does not own its members. Appliances carry the group name,
/// and totals are recomputed each tick from the appliance slice.
#[derive(Debug, Clone)]
pub struct SocketGroup {
    /// Circuit name; appliances reference it case-insensitively.
    pub name: String,
    /// Rated capacity in amps.
    pub rated_capacity_a: f64,
    /// Sum of valid member readings from the latest tick.
    pub total_current_a: f64,
    /// Status from the latest recomputation.
    pub status: GroupStatus,
}

impl SocketGroup {
    /// Creates a new socket group with no accumulated load.
    pub fn new(name: impl Into<String>, rated_capacity_a: f64) -> Self {
        Self {
            name: name.into(),
            rated_capacity_a,
            total_current_a: 0.0,
            status: GroupStatus::Ok,
        }
    }

    /// Returns the members of this group within the appliance slice.
    pub fn members<'a>(
        &'a self,
        appliances: &'a [Appliance],
    ) -> impl Iterator<Item = &'a Appliance> {
        appliances.iter().filter(|a| a.in_group(&self.name))
    }

    /// Recomputes the total as the sum of valid member readings.
    pub fn recompute_total(&mut self, appliances: &[Appliance]) {
        self.total_current_a = self
            .members(appliances)
            .filter(|a| a.is_valid_reading())
            .map(|a| a.current_a)
            .sum();
    }

    /// Classifies a load against a rated capacity.
    ///
    /// Exactly 77% of capacity is already WARNING, not OK.
    pub fn status_for(total_a: f64, capacity_a: f64) -> GroupStatus {
        if total_a < capacity_a * OK_FRACTION {
            GroupStatus::Ok
        } else if total_a <= capacity_a {
            GroupStatus::Warning
        } else {
            GroupStatus::Danger
        }
    }

    /// Re-derives the status from the current total, returning the old one.
    pub fn update_status(&mut self) -> GroupStatus {
        let old = self.status;
        self.status = Self::status_for(self.total_current_a, self.rated_capacity_a);
        old
    }

    /// Returns the valid member drawing the most current, if any.
    pub fn highest_current_appliance<'a>(
        &self,
        appliances: &'a [Appliance],
    ) -> Option<&'a Appliance> {
        appliances
            .iter()
            .filter(|a| a.in_group(&self.name) && a.is_valid_reading())
            .max_by(|a, b| a.current_a.total_cmp(&b.current_a))
    }

    /// Current load as a percentage of rated capacity.
    pub fn load_percentage(&self) -> f64 {
        (self.total_current_a / self.rated_capacity_a) * 100.0
    }
}

impl fmt::Display for SocketGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2}/{:.2}A ({:.1}%) [{}]",
            self.name,
            self.total_current_a,
            self.rated_capacity_a,
            self.load_percentage(),
            self.status
        )
    }
}
