//! TOML-based monitor configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::model::{SimulationMode, SystemSettings};

/// Top-level monitor configuration parsed from TOML.
///
/// All fields have defaults matching the standard household setup. Load
/// from TOML with [`MonitorConfig::from_toml_file`] or use
/// [`MonitorConfig::standard`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    /// Electrical system parameters.
    #[serde(default)]
    pub system: SystemConfig,
    /// Simulation mode and timing.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Electrical system parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfig {
    /// Supply voltage (V, must be > 0).
    pub voltage_v: f64,
    /// Whole-house current limit (A, must be > 0).
    pub main_limit_a: f64,
    /// Tick-over-tick jump treated as a surge (A, must be > 0).
    pub surge_threshold_a: f64,
    /// Energy tariff per kWh (must be >= 0).
    pub tariff_per_kwh: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            voltage_v: 230.0,
            main_limit_a: 40.0,
            surge_threshold_a: 3.0,
            tariff_per_kwh: 0.50,
        }
    }
}

/// Simulation mode and timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Reading generator: `"random"` or `"scripted"`.
    pub mode: String,
    /// Milliseconds between monitoring ticks (must be > 0).
    pub tick_interval_ms: u64,
    /// Master random seed.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mode: "random".to_string(),
            tick_interval_ms: 2000,
            seed: 42,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"system.main_limit_a"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl MonitorConfig {
    /// Returns the standard household configuration.
    pub fn standard() -> Self {
        Self {
            system: SystemConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }

    /// Returns the scripted-demo preset: deterministic 36-tick fault
    /// timeline at a fast cadence.
    pub fn scripted_demo() -> Self {
        Self {
            system: SystemConfig::default(),
            simulation: SimulationConfig {
                mode: "scripted".to_string(),
                tick_interval_ms: 500,
                ..SimulationConfig::default()
            },
        }
    }

    /// Returns the tight-limit preset: a low main limit and expensive
    /// tariff, for exercising overload and shedding paths.
    pub fn tight_limit() -> Self {
        Self {
            system: SystemConfig {
                main_limit_a: 15.0,
                tariff_per_kwh: 0.80,
                ..SystemConfig::default()
            },
            simulation: SimulationConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["standard", "scripted_demo", "tight_limit"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "standard" => Ok(Self::standard()),
            "scripted_demo" => Ok(Self::scripted_demo()),
            "tight_limit" => Ok(Self::tight_limit()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("settings", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let sys = &self.system;

        if !(sys.voltage_v > 0.0) {
            errors.push(ConfigError::new("system.voltage_v", "must be > 0"));
        }
        if !(sys.main_limit_a > 0.0) {
            errors.push(ConfigError::new("system.main_limit_a", "must be > 0"));
        }
        if !(sys.surge_threshold_a > 0.0) {
            errors.push(ConfigError::new("system.surge_threshold_a", "must be > 0"));
        }
        if !(sys.tariff_per_kwh >= 0.0) {
            errors.push(ConfigError::new("system.tariff_per_kwh", "must be >= 0"));
        }

        let sim = &self.simulation;
        if SimulationMode::parse(&sim.mode).is_none() {
            errors.push(ConfigError::new(
                "simulation.mode",
                format!("must be \"random\" or \"scripted\", got \"{}\"", sim.mode),
            ));
        }
        if sim.tick_interval_ms == 0 {
            errors.push(ConfigError::new("simulation.tick_interval_ms", "must be > 0"));
        }

        errors
    }

    /// Builds the runtime settings from a validated configuration.
    pub fn build_settings(&self) -> SystemSettings {
        SystemSettings {
            voltage_v: self.system.voltage_v,
            main_limit_a: self.system.main_limit_a,
            surge_threshold_a: self.system.surge_threshold_a,
            tariff_per_kwh: self.system.tariff_per_kwh,
            simulation_mode: SimulationMode::parse(&self.simulation.mode)
                .unwrap_or(SimulationMode::Random),
            tick_interval_ms: self.simulation.tick_interval_ms,
        }
    }
}
