//! Depots and disposal sites.

use serde::Deserialize;
use std::fmt;

/// The role a facility plays in the collection service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityKind {
    /// Where the truck starts and ends each day. Scenarios are expected to
    /// contain exactly one.
    Depot,
    /// A site where the truck can empty its load.
    Disposal,
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilityKind::Depot => write!(f, "depot"),
            FacilityKind::Disposal => write!(f, "disposal"),
        }
    }
}

/// A fixed installation on the road network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    id: String,
    kind: FacilityKind,
    node: usize,
    /// Map coordinates, carried through for display layers only.
    coordinates: Option<(i32, i32)>,
}

impl Facility {
    /// Create a facility at the given road-network node.
    pub fn new(
        id: impl Into<String>,
        kind: FacilityKind,
        node: usize,
        coordinates: Option<(i32, i32)>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            node,
            coordinates,
        }
    }

    /// Identifier string, unique within a scenario.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The facility's role.
    pub fn kind(&self) -> FacilityKind {
        self.kind
    }

    /// Whether this is the depot.
    pub fn is_depot(&self) -> bool {
        self.kind == FacilityKind::Depot
    }

    /// Whether the truck can unload here.
    pub fn is_disposal(&self) -> bool {
        self.kind == FacilityKind::Disposal
    }

    /// Road-network node of the facility.
    pub fn node(&self) -> usize {
        self.node
    }

    /// Display coordinates, if the scenario provided them.
    pub fn coordinates(&self) -> Option<(i32, i32)> {
        self.coordinates
    }
}
