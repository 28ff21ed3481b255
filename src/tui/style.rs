//! Color constants and status-to-color mapping for the dashboard.

use ratatui::style::Color;

use crate::model::{ApplianceStatus, GroupStatus, Severity};

/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Selected appliance row highlight.
pub const SELECTED_BG: Color = Color::DarkGray;
/// Overload indicator color.
pub const OVERLOAD: Color = Color::Red;

/// Returns the gauge color for a socket-group status.
pub fn group_color(status: GroupStatus) -> Color {
    match status {
        GroupStatus::Ok => Color::Green,
        GroupStatus::Warning => Color::Yellow,
        GroupStatus::Danger => Color::Red,
    }
}

/// Returns the row color for an appliance status.
pub fn appliance_color(status: ApplianceStatus) -> Color {
    match status {
        ApplianceStatus::Ok => Color::Green,
        ApplianceStatus::Warning => Color::Yellow,
        ApplianceStatus::Danger => Color::Red,
        ApplianceStatus::Surge => Color::Magenta,
        ApplianceStatus::Invalid => Color::DarkGray,
    }
}

/// Returns the list color for an alert severity.
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Warning => Color::Yellow,
        Severity::Danger => Color::Red,
    }
}
