use rand::{Rng, rngs::StdRng};

/// Inclusive-exclusive realistic current range in amps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentRange {
    pub min_a: f64,
    pub max_a: f64,
}

const FRIDGE: CurrentRange = CurrentRange { min_a: 0.8, max_a: 2.5 };
const TV: CurrentRange = CurrentRange { min_a: 0.3, max_a: 1.2 };
const AC: CurrentRange = CurrentRange { min_a: 4.0, max_a: 8.0 };
const MICROWAVE: CurrentRange = CurrentRange { min_a: 3.0, max_a: 6.0 };
const IRON: CurrentRange = CurrentRange { min_a: 3.5, max_a: 5.0 };
const KETTLE: CurrentRange = CurrentRange { min_a: 8.0, max_a: 12.0 };
const LAPTOP: CurrentRange = CurrentRange { min_a: 0.5, max_a: 1.5 };
const LIGHT: CurrentRange = CurrentRange { min_a: 0.1, max_a: 0.5 };
const DEFAULT: CurrentRange = CurrentRange { min_a: 0.5, max_a: 3.0 };

/// Maps an appliance name to its category range.
///
/// Categories are matched by case-insensitive substring, so
/// "Refrigerator" and "Mini-Fridge" both land in the fridge range.
/// Unrecognized names fall back to a generic 0.5-3.0 A range.
pub fn range_for(name: &str) -> CurrentRange {
    let name = name.to_ascii_lowercase();
    let has = |needle: &str| name.contains(needle);

    if has("fridge") || has("refrigerator") {
        FRIDGE
    } else if has("tv") || has("television") {
        TV
    } else if has("ac") || has("air con") {
        AC
    } else if has("microwave") {
        MICROWAVE
    } else if has("iron") {
        IRON
    } else if has("kettle") {
        KETTLE
    } else if has("laptop") || has("computer") {
        LAPTOP
    } else if has("light") || has("bulb") {
        LIGHT
    } else {
        DEFAULT
    }
}

/// Draws a realistic current for the named appliance.
///
/// Uniform within the category range, then perturbed by up to +/-10%
/// of the drawn value, floored at zero.
pub fn realistic_current(rng: &mut StdRng, name: &str) -> f64 {
    let range = range_for(name);
    let base = range.min_a + rng.random::<f64>() * (range.max_a - range.min_a);
    let variation = base * 0.1 * (rng.random::<f64>() - 0.5) * 2.0;
    (base + variation).max(0.0)
}
