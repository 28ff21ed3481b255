use std::fmt;

/// Priority class used by the load-shedding recommendation.
///
/// Essential appliances are never suggested for shedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Essential,
    NonEssential,
}

/// Per-appliance status derived each tick from the latest reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplianceStatus {
    Ok,
    /// Reading above 90% of the rated maximum.
    Warning,
    Danger,
    /// Reading jumped by at least the surge threshold since the last tick.
    Surge,
    /// Reading failed the validity rule and is excluded from aggregation.
    Invalid,
}

impl fmt::Display for ApplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Danger => "DANGER",
            Self::Surge => "SURGE",
            Self::Invalid => "INVALID",
        };
        f.write_str(s)
    }
}

/// A metered household appliance attached to one socket group.
///
/// Created once at startup and mutated every tick by the simulation
/// engine. The previous-tick reading is kept for surge-delta checks.
#[derive(Debug, Clone)]
pub struct Appliance {
    /// Display name, also the appliance's identity for commands.
    pub name: String,
    /// Room the appliance lives in.
    pub location: String,
    /// Name of the socket group this appliance belongs to.
    pub group: String,
    /// Latest current reading in amps. May be transiently invalid.
    pub current_a: f64,
    /// Rated maximum current in amps.
    pub max_current_a: f64,
    /// Shedding priority class.
    pub priority: Priority,
    /// Status derived from the latest reading.
    pub status: ApplianceStatus,
    /// Whether the appliance is switched on.
    pub is_on: bool,
    previous_a: f64,
}

impl Appliance {
    /// Creates a new appliance, initially off with a zero reading.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        group: impl Into<String>,
        max_current_a: f64,
        priority: Priority,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            group: group.into(),
            current_a: 0.0,
            max_current_a,
            priority,
            status: ApplianceStatus::Ok,
            is_on: false,
            previous_a: 0.0,
        }
    }

    /// Records a new current reading, shifting the old one into the
    /// previous-tick slot.
    pub fn set_current(&mut self, current_a: f64) {
        self.previous_a = self.current_a;
        self.current_a = current_a;
    }

    /// Returns the previous-tick current reading in amps.
    pub fn previous_current(&self) -> f64 {
        self.previous_a
    }

    /// Returns `true` when the latest reading can be trusted.
    ///
    /// A reading is invalid when it is non-positive while the appliance
    /// is on, or when it exceeds the rated maximum.
    pub fn is_valid_reading(&self) -> bool {
        if self.current_a <= 0.0 && self.is_on {
            return false;
        }
        self.current_a <= self.max_current_a
    }

    /// Returns `true` when this appliance belongs to the named group
    /// (case-insensitive).
    pub fn in_group(&self, group: &str) -> bool {
        self.group.eq_ignore_ascii_case(group)
    }

    /// Instantaneous power draw in watts at the given supply voltage.
    pub fn power_w(&self, voltage_v: f64) -> f64 {
        voltage_v * self.current_a
    }
}

impl fmt::Display for Appliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {:.2}A [{}]",
            self.name, self.location, self.current_a, self.status
        )
    }
}
