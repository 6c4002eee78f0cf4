//! Build the same fixture type with fixed and randomized values.

use fixtory::{Factory, Fixture};

#[derive(Fixture, Debug)]
struct Order {
    reference: String,
    quantity: i32,
    unit_price: f64,
    rush: bool,
}

fn main() {
    let mut factory = Factory::<Order>::new();
    let order = factory.build().expect("order should build");
    println!("fixed:      {:?}", order);

    let mut factory = Factory::<Order>::with_seed(2024);
    factory.randomize();
    let order = factory.build().expect("order should build");
    println!("randomized: {:?}", order);

    // Re-filling draws fresh values from the same continuing sequence.
    let order = factory.build().expect("order should rebuild");
    println!("refilled:   {:?}", order);
}
