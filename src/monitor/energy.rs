use std::fmt;

/// Accumulates session energy and cost from per-tick power samples.
///
/// Session fields are monotonically non-decreasing within a run and
/// reset whenever monitoring restarts. Nothing persists across runs.
#[derive(Debug, Clone, Default)]
pub struct EnergyTracker {
    /// Energy consumed since monitoring started, in kWh.
    pub session_energy_kwh: f64,
    /// Cost of the session energy at the configured tariff.
    pub session_cost: f64,
    /// Instantaneous whole-house power from the latest sample, in watts.
    pub current_power_w: f64,
}

impl EnergyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrates one tick's power draw over the elapsed time.
    ///
    /// # Arguments
    ///
    /// * `current_a` - Whole-house total current in amps
    /// * `voltage_v` - Supply voltage in volts
    /// * `delta_s` - Elapsed time since the previous tick in seconds
    /// * `tariff_per_kwh` - Tariff used to re-derive session cost
    pub fn update(&mut self, current_a: f64, voltage_v: f64, delta_s: f64, tariff_per_kwh: f64) {
        let power_w = voltage_v * current_a;
        self.current_power_w = power_w;

        let energy_kwh = power_w * delta_s / 3600.0 / 1000.0;
        self.session_energy_kwh += energy_kwh;
        self.session_cost = self.session_energy_kwh * tariff_per_kwh;
    }

    /// Zeroes all session fields.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Energy formatted as Wh below 1 kWh, kWh above.
    pub fn formatted_energy(&self) -> String {
        if self.session_energy_kwh < 1.0 {
            format!("{:.0} Wh", self.session_energy_kwh * 1000.0)
        } else {
            format!("{:.2} kWh", self.session_energy_kwh)
        }
    }

    /// Power formatted as W below 1 kW, kW above.
    pub fn formatted_power(&self) -> String {
        if self.current_power_w < 1000.0 {
            format!("{:.0} W", self.current_power_w)
        } else {
            format!("{:.2} kW", self.current_power_w / 1000.0)
        }
    }
}

impl fmt::Display for EnergyTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Energy: {}, Cost: {:.2}, Power: {}",
            self.formatted_energy(),
            self.session_cost,
            self.formatted_power()
        )
    }
}
