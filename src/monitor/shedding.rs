use crate::model::{Appliance, Priority};

/// One advisory entry in a load-shedding recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct ShedAction {
    /// Appliance suggested for switch-off.
    pub appliance: String,
    /// Its current draw at recommendation time, in amps.
    pub current_a: f64,
}

/// Builds the greedy load-shedding recommendation for an overload.
///
/// Candidates are non-essential, on, and validly metered. They are
/// taken in descending order of draw until the shed total reaches the
/// excess; no further appliance is added once it does. The result is
/// advisory only and toggles nothing.
pub fn recommend(appliances: &[Appliance], excess_a: f64) -> Vec<ShedAction> {
    let mut candidates: Vec<&Appliance> = appliances
        .iter()
        .filter(|a| a.priority == Priority::NonEssential && a.is_on && a.is_valid_reading())
        .collect();
    // stable sort keeps catalog order for equal draws
    candidates.sort_by(|a, b| b.current_a.total_cmp(&a.current_a));

    let mut plan = Vec::new();
    let mut shed_total = 0.0;
    for appliance in candidates {
        if shed_total >= excess_a {
            break;
        }
        plan.push(ShedAction {
            appliance: appliance.name.clone(),
            current_a: appliance.current_a,
        });
        shed_total += appliance.current_a;
    }
    plan
}
