//! Greedy per-day route construction.
//!
//! The planner walks a scratch cursor (bin fills, truck load, truck
//! position) forward through the day it is planning, so the entities it
//! reads are never mutated. Candidate bins are ranked by a combined score of
//! overflow urgency and travel distance; disposal detours are inserted
//! whenever the next pickup would not fit on the truck.

use crate::bins::Bin;
use crate::facilities::Facilities;
use crate::graph::Graph;
use crate::predictor::OverflowPredictor;
use crate::route::Route;
use crate::shortest_path::shortest_distance;

/// Default weight applied to the urgency component of the score. Urgency
/// dominates distance as long as every finite distance stays below this.
pub const DEFAULT_URGENCY_WEIGHT: f64 = 1000.0;

/// Score contribution of an unreachable candidate: large but finite, so an
/// unreachable bin still ranks behind every reachable one instead of
/// disappearing from selection altogether.
const UNREACHABLE_PENALTY: f64 = u32::MAX as f64;

/// Builds one day's collection route over a fixed road network.
#[derive(Debug)]
pub struct RoutePlanner<'a> {
    graph: &'a Graph,
    predictor: OverflowPredictor,
    urgency_weight: f64,
}

impl<'a> RoutePlanner<'a> {
    /// Create a planner over `graph`.
    pub fn new(graph: &'a Graph, predictor: OverflowPredictor, urgency_weight: f64) -> Self {
        Self {
            graph,
            predictor,
            urgency_weight,
        }
    }

    /// Shortest distance between two nodes of the planner's network.
    pub fn distance(&self, from: usize, to: usize) -> Option<u64> {
        shortest_distance(self.graph, from, to)
    }

    /// Whether any bin is overflowing or about to.
    pub fn has_critical_bins(&self, facilities: &Facilities) -> bool {
        facilities
            .bins()
            .iter()
            .any(|bin| self.predictor.is_critical(bin))
    }

    /// Combined urgency/distance score for visiting `bin` from `from`.
    /// Lower wins.
    fn priority_score(&self, bin: &Bin, from: usize) -> f64 {
        let distance = match self.distance(from, bin.node()) {
            Some(distance) => distance as f64,
            None => UNREACHABLE_PENALTY,
        };
        self.predictor.overflow_risk(bin) * self.urgency_weight + distance
    }

    /// Pick the lowest-scoring bin among those with waste, judged from the
    /// truck's current position. Ties go to the lowest index.
    pub fn select_next_bin(&self, facilities: &Facilities) -> Option<usize> {
        let fills: Vec<u32> = facilities.bins().iter().map(Bin::current_fill).collect();
        self.select_candidate(facilities, &fills, facilities.truck().current_node())
    }

    /// Candidate selection against scratch fill levels.
    ///
    /// A bin's scratch fill is either untouched or zero (already planned),
    /// so urgency can be scored from the entity itself; only the emptiness
    /// check needs the scratch value.
    fn select_candidate(&self, facilities: &Facilities, fills: &[u32], from: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, bin) in facilities.bins().iter().enumerate() {
            if fills[index] == 0 {
                continue;
            }
            let score = self.priority_score(bin, from);
            if best.map_or(true, |(_, best_score)| score < best_score) {
                best = Some((index, score));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Node of the closest reachable disposal site, ties broken by facility
    /// order. `None` when no disposal site exists or none is reachable.
    pub fn find_nearest_disposal(&self, from: usize, facilities: &Facilities) -> Option<usize> {
        let mut nearest: Option<(usize, u64)> = None;
        for node in facilities.disposal_nodes() {
            let Some(distance) = self.distance(from, node) else {
                continue;
            };
            if nearest.map_or(true, |(_, best)| distance < best) {
                nearest = Some((node, distance));
            }
        }
        nearest.map(|(node, _)| node)
    }

    /// Construct the day's route.
    ///
    /// The plan starts at the depot (or wherever the truck is, for
    /// depot-less scenarios) and repeatedly takes the best candidate. When
    /// the candidate does not fit on the truck, a disposal detour is
    /// inserted and the candidate reconsidered; if the truck is already
    /// empty and the bin alone exceeds its whole capacity, the bin is
    /// planned as a partial visit instead of detouring forever. Entity
    /// state is left untouched.
    pub fn plan_route(&self, facilities: &Facilities) -> Route {
        let truck = facilities.truck();
        let capacity = truck.capacity();
        let mut fills: Vec<u32> = facilities.bins().iter().map(Bin::current_fill).collect();
        let mut load = truck.load();
        let mut node = facilities.depot_node().unwrap_or(truck.current_node());
        let mut route = Route::new();

        loop {
            let Some(next) = self.select_candidate(facilities, &fills, node) else {
                break;
            };
            let bin = &facilities.bins()[next];
            let fill = fills[next];

            if fill > capacity - load {
                if load > 0 {
                    // Emptying the truck first may make the bin fit
                    let Some(disposal) = self.find_nearest_disposal(node, facilities) else {
                        break;
                    };
                    node = self.planned_leg(&mut route, node, disposal);
                    load = 0;
                    route.set_needs_disposal(true);
                    continue;
                }

                // The bin exceeds the truck's entire capacity: plan a
                // partial pickup, the leftovers wait for another pass
                node = self.planned_leg(&mut route, node, bin.node());
                load = capacity.min(fill);
                fills[next] = 0;
                route.add_stop(next);
                route.set_needs_disposal(true);
                continue;
            }

            node = self.planned_leg(&mut route, node, bin.node());
            load += fill;
            fills[next] = 0;
            route.add_stop(next);
        }

        route
    }

    /// Account one leg of planned travel and return the new position.
    fn planned_leg(&self, route: &mut Route, from: usize, to: usize) -> usize {
        if let Some(distance) = self.distance(from, to) {
            if distance > 0 {
                route.add_distance(distance);
            }
        }
        to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facilities::Facilities;
    use crate::facility::{Facility, FacilityKind};
    use crate::fixture::{three_node_graph, three_node_scenario};
    use crate::truck::Truck;

    fn planner(graph: &Graph) -> RoutePlanner<'_> {
        RoutePlanner::new(graph, OverflowPredictor::default(), DEFAULT_URGENCY_WEIGHT)
    }

    #[test]
    fn test_select_prefers_urgency_over_distance() {
        // Two bins equidistant from the depot; the nearly full one wins
        let mut graph = Graph::new(3);
        graph.add_bidirectional_edge(0, 1, 5);
        graph.add_bidirectional_edge(0, 2, 5);

        let mut facilities = Facilities::new(Truck::new("T1", 500, 0, 0));
        facilities.add_facility(Facility::new("D1", FacilityKind::Depot, 0, None));
        facilities.add_bin(Bin::new("B1", "", 100, 20, 5, 1));
        facilities.add_bin(Bin::new("B2", "", 100, 95, 10, 2));

        let planner = planner(&graph);
        assert_eq!(planner.select_next_bin(&facilities), Some(1));
    }

    #[test]
    fn test_select_breaks_ties_by_distance() {
        // Equal urgency; the closer bin wins
        let mut graph = Graph::new(3);
        graph.add_bidirectional_edge(0, 1, 9);
        graph.add_bidirectional_edge(0, 2, 4);

        let mut facilities = Facilities::new(Truck::new("T1", 500, 0, 0));
        facilities.add_facility(Facility::new("D1", FacilityKind::Depot, 0, None));
        facilities.add_bin(Bin::new("B1", "", 100, 50, 10, 1));
        facilities.add_bin(Bin::new("B2", "", 100, 50, 10, 2));

        let planner = planner(&graph);
        assert_eq!(planner.select_next_bin(&facilities), Some(1));
    }

    #[test]
    fn test_select_skips_empty_bins() {
        let (graph, mut facilities) = three_node_scenario();
        facilities.bins_mut()[0].collect(50);

        let planner = planner(&graph);
        assert_eq!(planner.select_next_bin(&facilities), None);
    }

    #[test]
    fn test_find_nearest_disposal() {
        let mut graph = Graph::new(4);
        graph.add_bidirectional_edge(0, 1, 2);
        graph.add_bidirectional_edge(0, 2, 6);
        // Node 3 is disconnected

        let mut facilities = Facilities::new(Truck::new("T1", 100, 0, 0));
        facilities.add_facility(Facility::new("S1", FacilityKind::Disposal, 2, None));
        facilities.add_facility(Facility::new("S2", FacilityKind::Disposal, 1, None));
        facilities.add_facility(Facility::new("S3", FacilityKind::Disposal, 3, None));

        let planner = planner(&graph);
        assert_eq!(planner.find_nearest_disposal(0, &facilities), Some(1));

        let empty = Facilities::new(Truck::new("T1", 100, 0, 0));
        assert_eq!(planner.find_nearest_disposal(0, &empty), None);
    }

    #[test]
    fn test_plan_route_leaves_entities_untouched() {
        let (graph, facilities) = three_node_scenario();
        let planner = planner(&graph);

        let fills_before: Vec<u32> = facilities.bins().iter().map(Bin::current_fill).collect();
        let load_before = facilities.truck().load();
        let node_before = facilities.truck().current_node();

        let route = planner.plan_route(&facilities);

        assert_eq!(route.stops(), [0]);
        let fills_after: Vec<u32> = facilities.bins().iter().map(Bin::current_fill).collect();
        assert_eq!(fills_before, fills_after);
        assert_eq!(facilities.truck().load(), load_before);
        assert_eq!(facilities.truck().current_node(), node_before);
    }

    #[test]
    fn test_plan_route_inserts_disposal_between_pickups() {
        // Two 40-unit bins on a 50-unit truck force a detour between them
        let graph = three_node_graph();
        let mut facilities = Facilities::new(Truck::new("T1", 50, 0, 0));
        facilities.add_facility(Facility::new("D1", FacilityKind::Depot, 0, None));
        facilities.add_facility(Facility::new("S1", FacilityKind::Disposal, 2, None));
        facilities.add_bin(Bin::new("B1", "", 100, 40, 5, 1));
        facilities.add_bin(Bin::new("B2", "", 100, 40, 5, 1));

        let planner = planner(&graph);
        let route = planner.plan_route(&facilities);

        assert_eq!(route.stops(), [0, 1]);
        assert!(route.needs_disposal());
    }

    #[test]
    fn test_plan_route_oversized_bin_becomes_partial_visit() {
        let graph = three_node_graph();
        let mut facilities = Facilities::new(Truck::new("T1", 50, 0, 0));
        facilities.add_facility(Facility::new("D1", FacilityKind::Depot, 0, None));
        facilities.add_facility(Facility::new("S1", FacilityKind::Disposal, 2, None));
        facilities.add_bin(Bin::new("B1", "", 100, 60, 10, 1));

        let planner = planner(&graph);
        let route = planner.plan_route(&facilities);

        assert_eq!(route.stops(), [0]);
        assert!(route.needs_disposal());
    }

    #[test]
    fn test_plan_route_without_disposal_stops_at_capacity() {
        // 80 units planned, then the 40-unit bin cannot fit and there is
        // nowhere to unload
        let graph = three_node_graph();
        let mut facilities = Facilities::new(Truck::new("T1", 100, 0, 0));
        facilities.add_facility(Facility::new("D1", FacilityKind::Depot, 0, None));
        facilities.add_bin(Bin::new("B1", "", 100, 80, 5, 1));
        facilities.add_bin(Bin::new("B2", "", 100, 40, 5, 1));

        let planner = planner(&graph);
        let route = planner.plan_route(&facilities);

        assert_eq!(route.stops(), [0]);
        assert!(!route.needs_disposal());
    }

    #[test]
    fn test_plan_route_empty_when_all_bins_empty() {
        let (graph, mut facilities) = three_node_scenario();
        facilities.bins_mut()[0].collect(50);

        let planner = planner(&graph);
        assert!(planner.plan_route(&facilities).is_empty());
    }

    #[test]
    fn test_plan_route_accumulates_planned_distance() {
        let (graph, facilities) = three_node_scenario();
        let planner = planner(&graph);

        // Depot at 0, single bin at 1, weight 5
        let route = planner.plan_route(&facilities);
        assert_eq!(route.total_distance(), 5);
    }
}
