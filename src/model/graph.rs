//! Reconciled graph layers.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::{AccessEdge, AccessNode, Coord, RoadEdge, RoadNode};
use crate::bounds::Visibility;

/// The three drawable layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Roads,
    Buildings,
    Connectors,
}

/// Which access table pair a subgraph was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphSource {
    /// `combined_nodes_csv` / `combined_edges_csv`, classified by layer tag.
    Combined,
    /// `access_nodes_csv` / `access_edges_csv`, classified by `is_building_link`.
    Legacy,
}

/// Main road network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadGraph {
    pub nodes: HashMap<String, RoadNode>,
    pub edges: Vec<RoadEdge>,
}

impl RoadGraph {
    /// Drop edges with an endpoint that is not a known node.
    pub fn retain_resolved_edges(&mut self) -> usize {
        let before = self.edges.len();
        let nodes = &self.nodes;
        self.edges
            .retain(|e| nodes.contains_key(&e.from) && nodes.contains_key(&e.to));
        before - self.edges.len()
    }

    pub fn is_renderable(&self) -> bool {
        !self.nodes.is_empty() && !self.edges.is_empty()
    }
}

/// Building or connector layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessSubgraph {
    /// `None` when neither access source was present.
    pub source: Option<GraphSource>,
    pub nodes: HashMap<String, AccessNode>,
    pub edges: Vec<AccessEdge>,
}

impl AccessSubgraph {
    pub fn is_renderable(&self) -> bool {
        !self.nodes.is_empty() && !self.edges.is_empty()
    }

    /// Endpoints of an edge, resolved within this subgraph.
    pub fn endpoints(&self, edge: &AccessEdge) -> Option<(&AccessNode, &AccessNode)> {
        Some((self.nodes.get(&edge.from)?, self.nodes.get(&edge.to)?))
    }
}

/// The engine's graph output: three self-consistent layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciledGraph {
    pub roads: RoadGraph,
    pub buildings: AccessSubgraph,
    pub connectors: AccessSubgraph,
}

impl ReconciledGraph {
    pub fn availability(&self) -> LayerAvailability {
        LayerAvailability {
            roads: self.roads.is_renderable(),
            buildings: self.buildings.is_renderable(),
            connectors: self.connectors.is_renderable(),
        }
    }

    /// Coordinates of every node in the visible layers.
    pub fn visible_coords(&self, visibility: &Visibility) -> Vec<Coord> {
        let mut coords = Vec::new();
        if visibility.roads {
            coords.extend(self.roads.nodes.values().map(|n| n.coord));
        }
        if visibility.buildings {
            coords.extend(self.buildings.nodes.values().map(|n| n.coord));
        }
        if visibility.connectors {
            coords.extend(self.connectors.nodes.values().map(|n| n.coord));
        }
        coords
    }
}

/// Per-layer "has something to draw" flags.
///
/// A layer is available when it has at least one node and one edge.
/// Callers use this to switch off toggles of empty layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerAvailability {
    pub roads: bool,
    pub buildings: bool,
    pub connectors: bool,
}

impl LayerAvailability {
    pub fn is_available(&self, layer: Layer) -> bool {
        match layer {
            Layer::Roads => self.roads,
            Layer::Buildings => self.buildings,
            Layer::Connectors => self.connectors,
        }
    }

    pub fn any(&self) -> bool {
        self.roads || self.buildings || self.connectors
    }
}
