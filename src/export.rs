//! CSV export: serialize a reconciled graph back into payload CSV.
//!
//! Produces the same column layout the ingestion side reads, so an export
//! can be fed straight back through [`crate::Ingestor`]:
//!
//! ```text
//! ReconciledGraph → to_csv_payload() → points/edges/metrics + combined_* CSV
//!   → download, or re-ingest
//! ```
//!
//! Access layers are written as the combined table pair with an explicit
//! `layer` column (`building` / `connector`), whatever source they came from.

use crate::model::*;
use crate::payload::CsvPayload;
use crate::{Error, Result};

pub const POINT_HEADERS: &[&str] = &["id", "latitude", "longitude"];
pub const EDGE_HEADERS: &[&str] = &["id", "way_id", "source", "target", "name"];
pub const METRIC_HEADERS: &[&str] = &[
    "id", "degree", "in_degree", "out_degree", "eigenvector", "betweenness", "radius", "color",
];
pub const ACCESS_NODE_HEADERS: &[&str] = &[
    "id", "latitude", "longitude", "node_type", "source_type", "source_id", "name", "layer",
];
pub const ACCESS_EDGE_HEADERS: &[&str] = &[
    "id", "source", "target", "road_type", "name", "is_building_link", "layer", "length_m",
];

const BUILDING_LAYER: &str = "building";
const CONNECTOR_LAYER: &str = "connector";

/// Export every layer of a graph. Rows are sorted by id so exports diff cleanly.
pub fn to_csv_payload(graph: &ReconciledGraph) -> Result<CsvPayload> {
    let mut roads: Vec<&RoadNode> = graph.roads.nodes.values().collect();
    roads.sort_by(|a, b| a.id.cmp(&b.id));

    let points_csv = write_table(
        POINT_HEADERS,
        roads.iter().map(|n| vec![n.id.clone(), n.coord.lat.to_string(), n.coord.lon.to_string()]),
    )?;

    let edges_csv = write_table(
        EDGE_HEADERS,
        graph.roads.edges.iter().map(|e| {
            vec![
                opt(&e.id),
                opt(&e.way_id),
                e.from.clone(),
                e.to.clone(),
                opt(&e.name),
            ]
        }),
    )?;

    let metrics_csv = write_table(
        METRIC_HEADERS,
        roads.iter().filter(|n| !n.metrics.is_empty()).map(|n| {
            std::iter::once(n.id.clone())
                .chain(n.metrics.fields().iter().map(|(_, v)| v.unwrap_or_default().to_owned()))
                .collect()
        }),
    )?;

    // Connectors first: a node present in both layers ends up tagged as a
    // building, and the connector layer only needs its edges' endpoints.
    let mut access_nodes = Vec::new();
    for (layer, tag) in [(&graph.connectors, CONNECTOR_LAYER), (&graph.buildings, BUILDING_LAYER)] {
        let mut nodes: Vec<&AccessNode> = layer.nodes.values().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        access_nodes.extend(nodes.into_iter().map(|n| access_node_record(n, tag)));
    }
    let combined_nodes_csv = write_table(ACCESS_NODE_HEADERS, access_nodes.into_iter())?;

    let access_edges = graph
        .buildings
        .edges
        .iter()
        .map(|e| access_edge_record(e, BUILDING_LAYER))
        .chain(graph.connectors.edges.iter().map(|e| access_edge_record(e, CONNECTOR_LAYER)));
    let combined_edges_csv = write_table(ACCESS_EDGE_HEADERS, access_edges)?;

    Ok(CsvPayload {
        points_csv: Some(points_csv),
        edges_csv: Some(edges_csv),
        metrics_csv: Some(metrics_csv),
        access_nodes_csv: None,
        access_edges_csv: None,
        combined_nodes_csv: Some(combined_nodes_csv),
        combined_edges_csv: Some(combined_edges_csv),
    })
}

fn access_node_record(node: &AccessNode, layer: &str) -> Vec<String> {
    vec![
        node.id.clone(),
        node.coord.lat.to_string(),
        node.coord.lon.to_string(),
        node.node_type.as_str().to_owned(),
        opt(&node.source_type),
        opt(&node.source_id),
        opt(&node.name),
        layer.to_owned(),
    ]
}

fn access_edge_record(edge: &AccessEdge, layer: &str) -> Vec<String> {
    vec![
        opt(&edge.id),
        edge.from.clone(),
        edge.to.clone(),
        opt(&edge.road_type),
        opt(&edge.name),
        edge.is_building_link.to_string(),
        layer.to_owned(),
        edge.length_m.map(|m| m.to_string()).unwrap_or_default(),
    ]
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Write one CSV table (header + records) into a string.
fn write_table(headers: &[&str], records: impl Iterator<Item = Vec<String>>) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(headers)?;
    for record in records {
        writer.write_record(&record)?;
    }
    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
