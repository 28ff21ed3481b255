//! Smart-home electrical load monitor with a simulated sensor layer.

#[cfg(feature = "api")]
pub mod api;
/// TOML settings files, presets, and validation.
pub mod config;
pub mod io;
/// Data entities: appliances, socket groups, alerts, settings.
pub mod model;
/// Monitoring service, energy tracking, and load-shedding advice.
pub mod monitor;
pub mod runner;
/// Synthetic current-reading generation (random and scripted).
pub mod sim;
#[cfg(feature = "tui")]
pub mod tui;
