//! Plain-text day-by-day view of a running simulation.
//!
//! Reads the simulation's public queries between steps and renders a
//! compact status block to stdout. This is the only in-crate consumer of
//! the view contract; richer front ends can build on the same queries.

use crate::simulation::Simulation;

/// Print the state of `sim` as of the end of the last completed day.
pub fn render_day(sim: &Simulation) {
    println!("--- Day {}/{} ---", sim.current_time(), sim.max_time());

    let truck = sim.facilities().truck();
    println!(
        "Truck {}: load {}/{} at node {}",
        truck.id(),
        truck.load(),
        truck.capacity(),
        truck.current_node()
    );

    for bin in sim.facilities().bins() {
        let marker = if bin.is_overflowing() { " OVERFLOW" } else { "" };
        println!(
            "  {:<12} {:>4}/{:<4} {}{}",
            bin.id(),
            bin.current_fill(),
            bin.capacity(),
            bin.location(),
            marker
        );
    }

    println!(
        "Totals: distance {}, collections {}, overflow events {}",
        sim.total_distance(),
        sim.collections_completed(),
        sim.overflow_count()
    );
}
