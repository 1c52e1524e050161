//! Structured decoder: the legacy `{nodes: {...}, edges: {...}}` payload.
//!
//! Older endpoints shipped the road graph as JSON objects instead of CSV.
//! Values may be numbers or strings; strings go through the same
//! normalizer as CSV cells.

use serde_json::{Map, Value};

use super::RowDiagnostics;
use crate::config::IngestConfig;
use crate::model::{Coord, NodeMetrics, RoadEdge, RoadGraph, RoadNode};
use crate::parse::{clean_value, parse_number};

pub fn decode_structured(
    nodes: &Map<String, Value>,
    edges: &Map<String, Value>,
    config: &IngestConfig,
) -> (RoadGraph, RowDiagnostics) {
    let mut graph = RoadGraph::default();
    let mut diagnostics = RowDiagnostics::default();

    for (key, value) in nodes {
        let id = key.trim();
        match (id.is_empty(), node_coord(value)) {
            (false, Some(coord)) => {
                let node = RoadNode::new(id, coord).with_metrics(node_metrics(value));
                graph.nodes.insert(id.to_owned(), node);
            }
            (false, None) => diagnostics.record(id, config.invalid_sample_limit),
            (true, _) => diagnostics.record(value.to_string(), config.invalid_sample_limit),
        }
    }

    for (key, value) in edges {
        let from = field_text(value, &["from", "source"]).unwrap_or_default();
        let to = field_text(value, &["to", "target"]).unwrap_or_default();
        if from.is_empty() || to.is_empty() {
            continue;
        }
        graph.edges.push(RoadEdge {
            id: field_text(value, &["id"]).or_else(|| Some(key.clone())),
            way_id: field_text(value, &["way_id", "id_way"]),
            from,
            to,
            name: field_text(value, &["name"]),
        });
    }

    (graph, diagnostics)
}

fn node_coord(value: &Value) -> Option<Coord> {
    let lat = field_number(value, &["lat", "latitude"])?;
    let lon = field_number(value, &["lon", "longitude"])?;
    Coord::finite(lat, lon)
}

fn node_metrics(value: &Value) -> NodeMetrics {
    NodeMetrics {
        degree: field_text(value, &["degree_value"]),
        in_degree: field_text(value, &["in_degree_value"]),
        out_degree: field_text(value, &["out_degree_value"]),
        eigenvector: field_text(value, &["eigenvector_value"]),
        betweenness: field_text(value, &["betweenness_value"]),
        radius: field_text(value, &["radius_value"]),
        color: field_text(value, &["color_value"]),
    }
}

/// First usable number among `keys`.
fn field_number(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| match value.get(k)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_number(s),
        _ => None,
    })
}

/// First non-empty scalar among `keys`, rendered as text.
fn field_text(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| {
        let text = match value.get(k)? {
            Value::String(s) => clean_value(s),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    })
}
