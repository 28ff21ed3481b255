//! Fixed startup household: four 13 A circuits and nine appliances.

use super::appliance::{Appliance, Priority};
use super::socket_group::SocketGroup;

/// Rated capacity of every default circuit in amps.
const CIRCUIT_CAPACITY_A: f64 = 13.0;

/// Returns the default socket groups.
pub fn default_socket_groups() -> Vec<SocketGroup> {
    ["Kitchen", "Living Room", "Bedroom", "AC/Heavy Load"]
        .into_iter()
        .map(|name| SocketGroup::new(name, CIRCUIT_CAPACITY_A))
        .collect()
}

/// Returns the default appliance catalog with initial on/off states.
pub fn default_appliances() -> Vec<Appliance> {
    vec![
        on(Appliance::new("Refrigerator", "Kitchen", "Kitchen", 10.0, Priority::Essential)),
        Appliance::new("Microwave", "Kitchen", "Kitchen", 8.0, Priority::NonEssential),
        Appliance::new("Electric Kettle", "Kitchen", "Kitchen", 13.0, Priority::NonEssential),
        on(Appliance::new("TV", "Living Room", "Living Room", 3.0, Priority::NonEssential)),
        on(Appliance::new("Decoder/Router", "Living Room", "Living Room", 2.0, Priority::Essential)),
        Appliance::new("Iron", "Living Room", "Living Room", 6.0, Priority::NonEssential),
        on(Appliance::new("Laptop Charger", "Bedroom", "Bedroom", 2.0, Priority::Essential)),
        on(Appliance::new("LED Lights", "Bedroom", "Bedroom", 1.0, Priority::Essential)),
        on(Appliance::new(
            "Air Conditioner",
            "Living Room",
            "AC/Heavy Load",
            10.0,
            Priority::NonEssential,
        )),
    ]
}

fn on(mut appliance: Appliance) -> Appliance {
    appliance.is_on = true;
    appliance
}
