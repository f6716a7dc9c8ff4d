//! Shared fixtures for unit tests.

use crate::bins::Bin;
use crate::facilities::Facilities;
use crate::facility::{Facility, FacilityKind};
use crate::graph::Graph;
use crate::truck::Truck;

/// Three nodes in a line: depot (0) -- 5 -- bin (1) -- 3 -- disposal (2).
pub fn three_node_graph() -> Graph {
    let mut graph = Graph::new(3);
    graph.add_bidirectional_edge(0, 1, 5);
    graph.add_bidirectional_edge(1, 2, 3);
    graph
}

/// The [`three_node_graph`] network populated with one half-full bin, a
/// depot, a disposal site and a roomy truck parked at the depot.
pub fn three_node_scenario() -> (Graph, Facilities) {
    let mut facilities = Facilities::new(Truck::new("T1", 500, 0, 0));
    facilities.add_facility(Facility::new("D1", FacilityKind::Depot, 0, Some((0, 0))));
    facilities.add_facility(Facility::new("S1", FacilityKind::Disposal, 2, Some((20, 0))));
    facilities.add_bin(Bin::new("B1", "High Street", 100, 50, 10, 1));
    (three_node_graph(), facilities)
}
