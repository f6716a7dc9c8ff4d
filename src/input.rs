//! Scenario loading from JSON data files.
//!
//! A scenario file carries four top-level arrays: `facilities`, `bins`,
//! `trucks` and `edges`. Locations are referenced by id strings; the
//! [`LocationMapper`] resolves them to dense node indices, numbering bins
//! first and facilities second (matching their order in the file) so the
//! resulting graph is reproducible from the file alone.
//!
//! The loader is deliberately tolerant: edges naming unknown locations are
//! skipped with a warning, an unknown truck position falls back to node 0,
//! and duplicate ids are warned about but kept. Only a missing or
//! malformed file, or an empty `trucks` array, is an error.

use crate::bins::Bin;
use crate::facilities::Facilities;
use crate::facility::{Facility, FacilityKind};
use crate::graph::Graph;
use crate::truck::Truck;
use anyhow::{ensure, Context, Result};
use indexmap::IndexMap;
use itertools::Itertools;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Maps location id strings to dense node indices, first seen first
/// numbered.
#[derive(Debug, Default)]
pub struct LocationMapper {
    nodes: IndexMap<String, usize>,
}

impl LocationMapper {
    /// Create an empty mapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Node index for `location`, allocating the next index when unseen.
    pub fn get_or_create(&mut self, location: &str) -> usize {
        if let Some(&node) = self.nodes.get(location) {
            return node;
        }
        let node = self.nodes.len();
        self.nodes.insert(location.to_string(), node);
        node
    }

    /// Node index for `location`, if it has been mapped.
    pub fn get(&self, location: &str) -> Option<usize> {
        self.nodes.get(location).copied()
    }

    /// Number of distinct locations mapped so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no locations have been mapped.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Contents of an entire scenario file.
#[derive(Debug, Deserialize)]
struct ScenarioFile {
    facilities: Vec<FacilityRecord>,
    bins: Vec<BinRecord>,
    trucks: Vec<TruckRecord>,
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Deserialize)]
struct FacilityRecord {
    id: String,
    #[serde(rename = "type")]
    kind: FacilityKind,
    x: i32,
    y: i32,
}

#[derive(Debug, Deserialize)]
struct BinRecord {
    id: String,
    location: String,
    capacity: u32,
    current_fill: u32,
    fill_rate: u32,
}

#[derive(Debug, Deserialize)]
struct TruckRecord {
    id: String,
    capacity: u32,
    current_load: u32,
    position: String,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: String,
    to: String,
    distance: u32,
}

/// A fully loaded scenario: the road network plus every entity.
#[derive(Debug)]
pub struct Scenario {
    /// The road network.
    pub graph: Graph,
    /// Bins, facilities and the truck.
    pub facilities: Facilities,
}

/// Load a scenario from the JSON file at `path`.
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Error reading {}", path.display()))?;
    let file: ScenarioFile = serde_json::from_str(&text)
        .with_context(|| format!("Error parsing {}", path.display()))?;
    build_scenario(file)
}

fn build_scenario(file: ScenarioFile) -> Result<Scenario> {
    warn_duplicate_ids(&file);

    let mut mapper = LocationMapper::new();

    let bins: Vec<Bin> = file
        .bins
        .iter()
        .map(|record| {
            let node = mapper.get_or_create(&record.id);
            Bin::new(
                record.id.clone(),
                record.location.clone(),
                record.capacity,
                record.current_fill,
                record.fill_rate,
                node,
            )
        })
        .collect();

    let facility_entities: Vec<Facility> = file
        .facilities
        .iter()
        .map(|record| {
            let node = mapper.get_or_create(&record.id);
            Facility::new(
                record.id.clone(),
                record.kind,
                node,
                Some((record.x, record.y)),
            )
        })
        .collect();

    ensure!(!file.trucks.is_empty(), "Scenario defines no trucks");
    let truck_record = &file.trucks[0];
    if file.trucks.len() > 1 {
        warn!(
            "Scenario defines {} trucks; only {} will be used",
            file.trucks.len(),
            truck_record.id
        );
    }
    let start_node = match mapper.get(&truck_record.position) {
        Some(node) => node,
        None => {
            warn!(
                "Truck position {} is not a known location; starting at node 0",
                truck_record.position
            );
            0
        }
    };
    let truck = Truck::new(
        truck_record.id.clone(),
        truck_record.capacity,
        truck_record.current_load,
        start_node,
    );

    let mut graph = Graph::new(mapper.len());
    for edge in &file.edges {
        let (Some(from), Some(to)) = (mapper.get(&edge.from), mapper.get(&edge.to)) else {
            warn!(
                "Edge {} -> {} references an unknown location; skipped",
                edge.from, edge.to
            );
            continue;
        };
        graph.add_bidirectional_edge(from, to, edge.distance);
    }

    let mut facilities = Facilities::new(truck);
    for bin in bins {
        facilities.add_bin(bin);
    }
    for facility in facility_entities {
        facilities.add_facility(facility);
    }

    if facilities.depot_node().is_none() {
        warn!("Scenario has no depot; the truck will not return home");
    }
    if facilities.disposal_nodes().is_empty() {
        warn!("Scenario has no disposal site; the truck cannot unload");
    }

    Ok(Scenario { graph, facilities })
}

fn warn_duplicate_ids(file: &ScenarioFile) {
    let bin_ids = file.bins.iter().map(|record| record.id.as_str());
    let facility_ids = file.facilities.iter().map(|record| record.id.as_str());
    for id in bin_ids.chain(facility_ids).duplicates() {
        warn!("Duplicate location id {id}; entries will share a node");
    }
}
