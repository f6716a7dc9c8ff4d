//! The day-by-day collection simulation.
//!
//! Each call to [`Simulation::step`] advances one day through a fixed phase
//! order: bins fill, overflows are counted, a route is planned, the truck
//! executes it (with disposal trips whenever it fills up), the truck returns
//! to the depot, and a same-day cleanup pass runs if any bin is critical.
//! Outside observers must only read state between steps.

use crate::facilities::Facilities;
use crate::graph::Graph;
use crate::planner::RoutePlanner;
use crate::route::Route;
use crate::shortest_path::shortest_distance;
use log::info;
use std::fmt;

/// Owns the scenario state and drives it through simulated days.
#[derive(Debug)]
pub struct Simulation<'a> {
    graph: &'a Graph,
    facilities: Facilities,
    planner: RoutePlanner<'a>,
    current_time: u32,
    max_time: u32,
    overflow_count: u64,
    total_distance: u64,
    collections_completed: u64,
}

impl<'a> Simulation<'a> {
    /// Create a simulation that will run for `max_time` days.
    pub fn new(
        graph: &'a Graph,
        facilities: Facilities,
        planner: RoutePlanner<'a>,
        max_time: u32,
    ) -> Self {
        Self {
            graph,
            facilities,
            planner,
            current_time: 0,
            max_time,
            overflow_count: 0,
            total_distance: 0,
            collections_completed: 0,
        }
    }

    /// Advance the simulation by one day.
    pub fn step(&mut self) {
        // Fill phase: every bin accrues one day of waste
        for bin in self.facilities.bins_mut() {
            bin.update_fill();
        }

        // Overflow accounting, before the truck gets a chance to help
        let overflowing = self
            .facilities
            .bins()
            .iter()
            .filter(|bin| bin.is_overflowing())
            .count();
        self.overflow_count += overflowing as u64;

        // Planning is pure: entity state is untouched afterwards
        let route = self.planner.plan_route(&self.facilities);

        self.execute_route(&route);

        // End the shift back at the depot
        if let Some(depot) = self.facilities.depot_node() {
            if self.facilities.truck().current_node() != depot {
                self.travel(depot);
            }
        }

        if self.planner.has_critical_bins(&self.facilities) {
            self.emergency_cleanup();
        }

        self.current_time += 1;
    }

    /// Run day steps until the configured duration is reached.
    pub fn run(&mut self) {
        while !self.is_finished() {
            self.step();
            info!(
                "Day {}/{}: distance {}, collections {}, overflow events {}",
                self.current_time,
                self.max_time,
                self.total_distance,
                self.collections_completed,
                self.overflow_count
            );
        }
    }

    /// Drive the truck along the planned route, collecting at every stop
    /// and unloading whenever the truck fills.
    fn execute_route(&mut self, route: &Route) {
        for &index in route.stops() {
            self.visit_bin(index);
        }
    }

    /// Same-day reactive pass over a fresh plan, strictly as cleanup: only
    /// bins still overflowing get visited, anything merely close to the
    /// edge waits for the next regular route.
    fn emergency_cleanup(&mut self) {
        let route = self.planner.plan_route(&self.facilities);
        for &index in route.stops() {
            if self.facilities.bins()[index].is_overflowing() {
                self.visit_bin(index);
            }
        }
    }

    /// Drive to the bin at `index`, collect as much as fits on the truck
    /// and detour to a disposal site if that fills it.
    fn visit_bin(&mut self, index: usize) {
        let bin_node = self.facilities.bins()[index].node();
        self.travel(bin_node);

        let amount = self.facilities.bins()[index]
            .current_fill()
            .min(self.facilities.truck().remaining_capacity());
        if amount > 0 {
            self.facilities.truck_mut().collect(amount);
            self.facilities.bins_mut()[index].collect(amount);
            self.collections_completed += 1;
        }

        if self.facilities.truck().is_full() {
            self.dispose();
        }
    }

    /// Detour to the nearest disposal site and empty the truck. Without a
    /// reachable site the truck simply stays full.
    fn dispose(&mut self) {
        let from = self.facilities.truck().current_node();
        if let Some(disposal) = self.planner.find_nearest_disposal(from, &self.facilities) {
            self.travel(disposal);
            self.facilities.truck_mut().unload();
        }
    }

    /// Move the truck to `to`, adding the leg to the distance total when it
    /// is finite. Unreachable legs move the cursor without accruing
    /// distance.
    fn travel(&mut self, to: usize) {
        let from = self.facilities.truck().current_node();
        if let Some(distance) = shortest_distance(self.graph, from, to) {
            self.total_distance += distance;
        }
        self.facilities.truck_mut().move_to(to);
    }

    /// Whether the configured number of days has elapsed.
    pub fn is_finished(&self) -> bool {
        self.current_time >= self.max_time
    }

    /// Days simulated so far.
    pub fn current_time(&self) -> u32 {
        self.current_time
    }

    /// Configured duration in days.
    pub fn max_time(&self) -> u32 {
        self.max_time
    }

    /// Bin-days spent at capacity so far.
    pub fn overflow_count(&self) -> u64 {
        self.overflow_count
    }

    /// Distance travelled so far, in graph units.
    pub fn total_distance(&self) -> u64 {
        self.total_distance
    }

    /// Number of successful pickups so far.
    pub fn collections_completed(&self) -> u64 {
        self.collections_completed
    }

    /// Read-only view of the scenario entities, for display layers. Only
    /// valid between steps.
    pub fn facilities(&self) -> &Facilities {
        &self.facilities
    }

    /// Rewind the clock and zero all counters.
    ///
    /// Entity state (bin fills, truck load and position) is left as-is;
    /// callers holding an initial snapshot are responsible for restoring it
    /// before re-running.
    pub fn reset(&mut self) {
        self.current_time = 0;
        self.overflow_count = 0;
        self.total_distance = 0;
        self.collections_completed = 0;
    }

    /// Summary of the run so far.
    pub fn statistics(&self) -> Statistics {
        Statistics {
            days: self.current_time,
            total_distance: self.total_distance,
            overflow_count: self.overflow_count,
            collections_completed: self.collections_completed,
        }
    }
}

/// Aggregated outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    /// Days simulated.
    pub days: u32,
    /// Total distance travelled.
    pub total_distance: u64,
    /// Bin-days spent at capacity.
    pub overflow_count: u64,
    /// Successful pickups.
    pub collections_completed: u64,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_day = |total: u64| {
            if self.days > 0 {
                total / u64::from(self.days)
            } else {
                0
            }
        };
        writeln!(f, "======= Simulation Statistics =======")?;
        writeln!(f, "Simulation duration: {} days", self.days)?;
        writeln!(f, "Distance travelled: {} units", self.total_distance)?;
        writeln!(f, "Overflow events: {}", self.overflow_count)?;
        writeln!(f, "Collections completed: {}", self.collections_completed)?;
        writeln!(
            f,
            "Average distance per day: {} units",
            per_day(self.total_distance)
        )?;
        writeln!(
            f,
            "Average collections per day: {}",
            per_day(self.collections_completed)
        )?;
        write!(f, "=====================================")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bins::Bin;
    use crate::facility::{Facility, FacilityKind};
    use crate::fixture::{three_node_graph, three_node_scenario};
    use crate::planner::{RoutePlanner, DEFAULT_URGENCY_WEIGHT};
    use crate::predictor::OverflowPredictor;
    use crate::truck::Truck;

    fn simulation<'a>(graph: &'a Graph, facilities: Facilities, days: u32) -> Simulation<'a> {
        let planner = RoutePlanner::new(graph, OverflowPredictor::default(), DEFAULT_URGENCY_WEIGHT);
        Simulation::new(graph, facilities, planner, days)
    }

    #[test]
    fn test_single_day_collect_and_return() {
        let (graph, facilities) = three_node_scenario();
        let mut sim = simulation(&graph, facilities, 1);
        sim.run();

        // Fill 50 -> 60, one pickup, out and back over the 5-unit edge
        assert!(sim.is_finished());
        assert_eq!(sim.total_distance(), 10);
        assert_eq!(sim.collections_completed(), 1);
        assert_eq!(sim.overflow_count(), 0);
        assert_eq!(sim.facilities().bins()[0].current_fill(), 0);
        assert_eq!(sim.facilities().truck().load(), 60);
        assert_eq!(sim.facilities().truck().current_node(), 0);
    }

    #[test]
    fn test_counters_monotonic_over_run() {
        let (graph, facilities) = three_node_scenario();
        let mut sim = simulation(&graph, facilities, 5);

        let mut last = (0, 0, 0);
        while !sim.is_finished() {
            sim.step();
            let now = (
                sim.total_distance(),
                sim.collections_completed(),
                sim.overflow_count(),
            );
            assert!(now.0 >= last.0);
            assert!(now.1 >= last.1);
            assert!(now.2 >= last.2);
            last = now;
        }
        assert_eq!(sim.current_time(), 5);
    }

    #[test]
    fn test_persistent_overflow_counts_each_day() {
        // One isolated node, a bin about to clamp at capacity and a truck
        // that cannot take anything on board
        let graph = Graph::new(1);
        let mut facilities = Facilities::new(Truck::new("T1", 0, 0, 0));
        facilities.add_bin(Bin::new("B1", "", 10, 9, 5, 0));

        let mut sim = simulation(&graph, facilities, 2);
        sim.step();
        assert_eq!(sim.overflow_count(), 1);
        assert_eq!(sim.facilities().bins()[0].current_fill(), 10);

        sim.step();
        assert_eq!(sim.overflow_count(), 2);
        assert_eq!(sim.total_distance(), 0);
        assert_eq!(sim.collections_completed(), 0);
    }

    #[test]
    fn test_empty_route_still_returns_to_depot() {
        // Nothing to collect, truck parked away from the depot
        let graph = three_node_graph();
        let mut facilities = Facilities::new(Truck::new("T1", 500, 0, 2));
        facilities.add_facility(Facility::new("D1", FacilityKind::Depot, 0, None));
        facilities.add_facility(Facility::new("S1", FacilityKind::Disposal, 2, None));
        facilities.add_bin(Bin::new("B1", "", 100, 0, 0, 1));

        let mut sim = simulation(&graph, facilities, 1);
        sim.step();

        assert_eq!(sim.collections_completed(), 0);
        assert_eq!(sim.current_time(), 1);
        assert_eq!(sim.facilities().truck().current_node(), 0);
        assert_eq!(sim.total_distance(), 8); // 2 -> 1 -> 0
    }

    #[test]
    fn test_missing_disposal_truck_stays_full() {
        let graph = three_node_graph();
        let mut facilities = Facilities::new(Truck::new("T1", 30, 0, 0));
        facilities.add_facility(Facility::new("D1", FacilityKind::Depot, 0, None));
        facilities.add_bin(Bin::new("B1", "", 100, 25, 5, 1));
        facilities.add_bin(Bin::new("B2", "", 100, 25, 5, 1));

        let mut sim = simulation(&graph, facilities, 1);
        sim.step();

        // First pickup fits (30 of 30), second contributes nothing
        assert_eq!(sim.facilities().truck().load(), 30);
        assert!(sim.facilities().truck().is_full());
        assert_eq!(sim.collections_completed(), 1);
    }

    #[test]
    fn test_reset_zeroes_clock_and_counters() {
        let (graph, facilities) = three_node_scenario();
        let mut sim = simulation(&graph, facilities, 3);
        sim.run();
        assert!(sim.is_finished());
        assert!(sim.total_distance() > 0);

        sim.reset();
        assert_eq!(sim.current_time(), 0);
        assert!(!sim.is_finished());
        assert_eq!(sim.total_distance(), 0);
        assert_eq!(sim.collections_completed(), 0);
        assert_eq!(sim.overflow_count(), 0);
    }

    #[test]
    fn test_statistics_display_guards_zero_days() {
        let stats = Statistics {
            days: 0,
            total_distance: 0,
            overflow_count: 0,
            collections_completed: 0,
        };
        let text = stats.to_string();
        assert!(text.contains("0 days"));
        assert!(text.contains("Average distance per day: 0"));
    }
}
