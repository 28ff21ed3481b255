//! Simulation engine producing synthetic per-appliance current readings.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::model::{Appliance, ApplianceStatus, SimulationMode};

use super::profile;
use super::script::ScriptPhase;

/// Probability per appliance per tick of an injected invalid reading.
const INVALID_PROBABILITY: f64 = 0.05;
/// Probability per appliance per tick of an injected surge.
const SURGE_PROBABILITY: f64 = 0.03;
/// Maximum injected surge on top of the previous reading, in amps.
const SURGE_MAX_A: f64 = 5.0;
/// Maximum surplus above the rated maximum for an injected over-range
/// reading, in amps.
const OVER_RANGE_SURPLUS_A: f64 = 10.0;

/// Generates synthetic readings, mutating appliances in place.
///
/// Owns a seeded RNG so runs are reproducible, and a tick counter that
/// drives the scripted timeline. The two fault-injection probabilities
/// in random mode are independent per appliance per tick; when both
/// fire, the surge value wins.
pub struct SimulationEngine {
    rng: StdRng,
    tick_count: u64,
}

impl SimulationEngine {
    /// Creates an engine with a seeded RNG and a zeroed tick counter.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            tick_count: 0,
        }
    }

    /// Advances one tick, assigning a new reading to every appliance.
    ///
    /// # Arguments
    ///
    /// * `appliances` - All appliances, updated in place
    /// * `mode` - Random or scripted generation
    /// * `surge_threshold_a` - Delta that counts as a surge (random mode
    ///   status derivation)
    pub fn advance(
        &mut self,
        appliances: &mut [Appliance],
        mode: SimulationMode,
        surge_threshold_a: f64,
    ) {
        let tick = self.tick_count;
        self.tick_count += 1;

        match mode {
            SimulationMode::Random => self.advance_random(appliances, surge_threshold_a),
            SimulationMode::Scripted => self.advance_scripted(appliances, tick),
        }
    }

    /// Ticks executed so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Rewinds the tick counter, restarting the scripted timeline.
    pub fn reset(&mut self) {
        self.tick_count = 0;
    }

    fn advance_random(&mut self, appliances: &mut [Appliance], surge_threshold_a: f64) {
        for appliance in appliances.iter_mut() {
            if !appliance.is_on {
                appliance.set_current(0.0);
                appliance.status = ApplianceStatus::Ok;
                continue;
            }

            let mut current = profile::realistic_current(&mut self.rng, &appliance.name);

            if self.rng.random::<f64>() < INVALID_PROBABILITY {
                current = self.invalid_reading(appliance.max_current_a);
            }
            if self.rng.random::<f64>() < SURGE_PROBABILITY {
                current = appliance.current_a + self.rng.random::<f64>() * SURGE_MAX_A;
            }

            appliance.set_current(current);
            appliance.status = derive_status(appliance, surge_threshold_a);
        }
    }

    fn advance_scripted(&mut self, appliances: &mut [Appliance], tick: u64) {
        match ScriptPhase::at(tick) {
            ScriptPhase::Normal => self.normal_operation(appliances),
            ScriptPhase::KitchenRamp => self.kitchen_ramp(appliances),
            ScriptPhase::KitchenOverload => self.kitchen_overload(appliances),
            ScriptPhase::AcSurge => self.ac_surge(appliances),
            ScriptPhase::HouseOverload => self.house_overload(appliances),
            ScriptPhase::SensorFault => self.sensor_fault(appliances),
        }
    }

    fn normal_operation(&mut self, appliances: &mut [Appliance]) {
        for appliance in appliances.iter_mut() {
            if appliance.is_on {
                let current = profile::realistic_current(&mut self.rng, &appliance.name);
                appliance.set_current(current);
                appliance.status = ApplianceStatus::Ok;
            } else {
                appliance.set_current(0.0);
            }
        }
    }

    fn kitchen_ramp(&mut self, appliances: &mut [Appliance]) {
        for appliance in appliances.iter_mut() {
            if !appliance.is_on {
                continue;
            }
            let current = profile::realistic_current(&mut self.rng, &appliance.name);
            if appliance.in_group("kitchen") {
                appliance.set_current((current * 1.3).min(appliance.max_current_a));
            } else {
                appliance.set_current(current);
            }
        }
    }

    fn kitchen_overload(&mut self, appliances: &mut [Appliance]) {
        for appliance in appliances.iter_mut() {
            if appliance.name.to_ascii_lowercase().contains("microwave") {
                appliance.is_on = true;
                appliance.set_current(5.5);
            } else if appliance.is_on {
                let current = profile::realistic_current(&mut self.rng, &appliance.name);
                if appliance.in_group("kitchen") {
                    appliance.set_current(current * 1.4);
                } else {
                    appliance.set_current(current);
                }
            }
        }
    }

    fn ac_surge(&mut self, appliances: &mut [Appliance]) {
        for appliance in appliances.iter_mut() {
            if !appliance.is_on {
                continue;
            }
            let name = appliance.name.to_ascii_lowercase();
            if name.contains("ac") || name.contains("air con") {
                let surged = appliance.current_a + 4.2;
                appliance.set_current(surged);
                appliance.status = ApplianceStatus::Surge;
            } else {
                let current = profile::realistic_current(&mut self.rng, &appliance.name);
                appliance.set_current(current);
            }
        }
    }

    fn house_overload(&mut self, appliances: &mut [Appliance]) {
        for appliance in appliances.iter_mut() {
            if appliance.is_on {
                let current = profile::realistic_current(&mut self.rng, &appliance.name) * 1.5;
                appliance.set_current(current.min(appliance.max_current_a));
            }
        }
    }

    fn sensor_fault(&mut self, appliances: &mut [Appliance]) {
        if !appliances.is_empty() {
            let idx = self.rng.random_range(0..appliances.len());
            if appliances[idx].is_on {
                appliances[idx].set_current(-1.5);
                appliances[idx].status = ApplianceStatus::Invalid;
            }
        }

        for appliance in appliances.iter_mut() {
            if appliance.is_on && appliance.current_a >= 0.0 {
                let current = profile::realistic_current(&mut self.rng, &appliance.name);
                appliance.set_current(current);
            }
        }
    }

    /// Draws one of the three invalid-reading kinds, chosen uniformly:
    /// negative, exactly zero, or above the rated maximum.
    fn invalid_reading(&mut self, max_current_a: f64) -> f64 {
        match self.rng.random_range(0..3) {
            0 => -(self.rng.random::<f64>() * 5.0),
            1 => 0.0,
            _ => max_current_a + self.rng.random::<f64>() * OVER_RANGE_SURPLUS_A,
        }
    }
}

/// Derives the appliance status from its freshly assigned reading.
fn derive_status(appliance: &Appliance, surge_threshold_a: f64) -> ApplianceStatus {
    if !appliance.is_valid_reading() {
        ApplianceStatus::Invalid
    } else if (appliance.current_a - appliance.previous_current()).abs() >= surge_threshold_a {
        ApplianceStatus::Surge
    } else if appliance.current_a > appliance.max_current_a * 0.9 {
        ApplianceStatus::Warning
    } else {
        ApplianceStatus::Ok
    }
}
