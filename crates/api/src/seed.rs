//! Initial catalog contents.

use domain::{Component, Part};
use rust_decimal_macros::dec;

/// The parts the factory starts with.
pub fn initial_components() -> Vec<Component> {
    vec![
        Component::new(Part::face("A"), dec!(10.28), 9),
        Component::new(Part::face("B"), dec!(24.07), 7),
        Component::new(Part::face("C"), dec!(13.30), 0),
        Component::new(Part::arms("D"), dec!(28.94), 1),
        Component::new(Part::arms("E"), dec!(12.39), 3),
        Component::new(Part::mobility("F"), dec!(30.77), 2),
        Component::new(Part::mobility("G"), dec!(55.13), 15),
        Component::new(Part::mobility("H"), dec!(50.00), 7),
        Component::new(Part::material("I"), dec!(90.12), 92),
        Component::new(Part::material("J"), dec!(82.31), 15),
    ]
}
