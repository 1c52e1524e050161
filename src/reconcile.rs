//! Layer reconciler: turns up to two decoded access sources plus the road
//! graph into three self-consistent layers.
//!
//! ```text
//! legacy  ──┐  per layer: combined if it has edges for the layer,
//! combined ─┴─ otherwise legacy ──► length filter (connectors) ──► resolve endpoints
//! ```
//!
//! Building and connector layers pick their source independently, so a
//! result may mix provenance. Duplicate edges across the two sources are not
//! merged; only one source feeds each layer.

use hashbrown::HashMap;

use crate::config::IngestConfig;
use crate::model::{
    AccessEdge, AccessNode, AccessSubgraph, GraphSource, Layer, LayerTag, ReconciledGraph,
    RoadGraph,
};

/// One decoded access table pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceGraph {
    pub kind: GraphSource,
    pub nodes: HashMap<String, AccessNode>,
    pub edges: Vec<AccessEdge>,
}

impl SourceGraph {
    pub fn new(kind: GraphSource, nodes: HashMap<String, AccessNode>, edges: Vec<AccessEdge>) -> Self {
        Self { kind, nodes, edges }
    }

    /// Layer an edge belongs to; `None` for base-layer or untagged rows.
    pub fn edge_layer(&self, edge: &AccessEdge) -> Option<Layer> {
        match self.kind {
            GraphSource::Legacy if edge.is_building_link => Some(Layer::Buildings),
            GraphSource::Legacy => Some(Layer::Connectors),
            GraphSource::Combined => tag_layer(edge.layer.as_ref()),
        }
    }

    pub fn node_layer(&self, node: &AccessNode) -> Option<Layer> {
        match self.kind {
            GraphSource::Legacy if node.node_type.is_building() => Some(Layer::Buildings),
            GraphSource::Legacy => Some(Layer::Connectors),
            GraphSource::Combined => tag_layer(node.layer.as_ref()),
        }
    }

    pub fn has_edges_for(&self, layer: Layer) -> bool {
        self.edges.iter().any(|e| self.edge_layer(e) == Some(layer))
    }

    fn edges_for(&self, layer: Layer) -> impl Iterator<Item = &AccessEdge> {
        self.edges.iter().filter(move |e| self.edge_layer(e) == Some(layer))
    }
}

fn tag_layer(tag: Option<&LayerTag>) -> Option<Layer> {
    match tag? {
        LayerTag::Building => Some(Layer::Buildings),
        LayerTag::Base => None,
        LayerTag::Other(_) => Some(Layer::Connectors),
    }
}

/// Pick the source for one layer: combined when it has edges for the
/// layer, else legacy, else whatever combined offers.
pub fn select_source<'a>(
    layer: Layer,
    combined: Option<&'a SourceGraph>,
    legacy: Option<&'a SourceGraph>,
) -> Option<&'a SourceGraph> {
    combined
        .filter(|c| c.has_edges_for(layer))
        .or(legacy)
        .or(combined)
}

/// Reconcile all layers of one payload.
pub fn reconcile(
    mut roads: RoadGraph,
    legacy: Option<&SourceGraph>,
    combined: Option<&SourceGraph>,
    config: &IngestConfig,
) -> ReconciledGraph {
    let dangling = roads.retain_resolved_edges();
    if dangling > 0 {
        tracing::debug!(dangling, "road edges dropped: endpoint not among decoded points");
    }

    let buildings = select_source(Layer::Buildings, combined, legacy)
        .map(build_buildings)
        .unwrap_or_default();
    let connectors = select_source(Layer::Connectors, combined, legacy)
        .map(|source| build_connectors(source, config.min_connector_length_m))
        .unwrap_or_default();

    tracing::debug!(
        buildings_source = ?buildings.source,
        building_edges = buildings.edges.len(),
        connectors_source = ?connectors.source,
        connector_edges = connectors.edges.len(),
        "access layers reconciled"
    );

    ReconciledGraph { roads, buildings, connectors }
}

/// Building layer: every building-classified node of the source, plus
/// the resolved endpoints of its building links.
fn build_buildings(source: &SourceGraph) -> AccessSubgraph {
    let nodes = source
        .nodes
        .values()
        .filter(|n| source.node_layer(n) == Some(Layer::Buildings))
        .map(|n| (n.id.clone(), n.clone()))
        .collect();
    let mut layer = AccessSubgraph { source: Some(source.kind), nodes, edges: Vec::new() };
    attach_edges(&mut layer, source, source.edges_for(Layer::Buildings));
    layer
}

/// Connector layer: short edges dropped, nodes limited to the endpoints of
/// surviving edges.
fn build_connectors(source: &SourceGraph, min_length_m: f64) -> AccessSubgraph {
    let mut too_short = 0usize;
    let kept = source.edges_for(Layer::Connectors).filter(|e| {
        let short = e.length_m.is_some_and(|len| len < min_length_m);
        too_short += usize::from(short);
        !short
    });
    let mut layer = AccessSubgraph { source: Some(source.kind), ..AccessSubgraph::default() };
    attach_edges(&mut layer, source, kept);
    if too_short > 0 {
        tracing::debug!(too_short, min_length_m, "connector edges below minimum length dropped");
    }
    layer
}

/// Keep edges whose endpoints both resolve in the source, pulling the
/// endpoint nodes into the layer.
fn attach_edges<'a>(
    layer: &mut AccessSubgraph,
    source: &SourceGraph,
    edges: impl Iterator<Item = &'a AccessEdge>,
) {
    for edge in edges {
        let (Some(from), Some(to)) = (source.nodes.get(&edge.from), source.nodes.get(&edge.to))
        else {
            continue;
        };
        for node in [from, to] {
            layer.nodes.entry(node.id.clone()).or_insert_with(|| node.clone());
        }
        layer.edges.push(edge.clone());
    }
}
