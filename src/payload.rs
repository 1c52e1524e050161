//! Ingestion boundary: resolves the polymorphic graph payload once.
//!
//! The endpoint returns either CSV blobs or, for old caches, JSON node and
//! edge objects. Both converge on the same decoders downstream.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Flat CSV shape of the payload. Also what [`crate::export`] produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvPayload {
    pub points_csv: Option<String>,
    pub edges_csv: Option<String>,
    pub metrics_csv: Option<String>,
    pub access_nodes_csv: Option<String>,
    pub access_edges_csv: Option<String>,
    pub combined_nodes_csv: Option<String>,
    pub combined_edges_csv: Option<String>,
}

/// Node and edge CSV of one access source. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvPair {
    pub nodes_csv: Option<String>,
    pub edges_csv: Option<String>,
}

impl CsvPair {
    /// `None` when both halves are absent.
    pub fn new(nodes_csv: Option<String>, edges_csv: Option<String>) -> Option<Self> {
        (nodes_csv.is_some() || edges_csv.is_some()).then_some(Self { nodes_csv, edges_csv })
    }
}

/// Where the main road graph comes from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MainGraphSource {
    Csv {
        points_csv: String,
        edges_csv: String,
        metrics_csv: Option<String>,
    },
    /// Legacy `nodes` / `edges` objects, keyed by id.
    Structured {
        nodes: Map<String, Value>,
        edges: Map<String, Value>,
    },
    #[default]
    Absent,
}

/// A resolved payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphPayload {
    pub main: MainGraphSource,
    pub access: Option<CsvPair>,
    pub combined: Option<CsvPair>,
}

impl GraphPayload {
    /// Parse the endpoint's JSON. The top level must be an object; fields
    /// of the wrong type are treated as absent.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut obj = match serde_json::from_str::<Value>(json)? {
            Value::Object(obj) => obj,
            other => {
                return Err(Error::InvalidPayload(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )));
            }
        };

        let mut text = |key: &str| match obj.remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        let csv = CsvPayload {
            points_csv: text("points_csv"),
            edges_csv: text("edges_csv"),
            metrics_csv: text("metrics_csv"),
            access_nodes_csv: text("access_nodes_csv"),
            access_edges_csv: text("access_edges_csv"),
            combined_nodes_csv: text("combined_nodes_csv"),
            combined_edges_csv: text("combined_edges_csv"),
        };

        let mut payload = Self::from_csv(csv);
        if payload.main == MainGraphSource::Absent {
            let mut object = |key: &str| match obj.remove(key) {
                Some(Value::Object(m)) => Some(m),
                _ => None,
            };
            let (nodes, edges) = (object("nodes"), object("edges"));
            if nodes.is_some() || edges.is_some() {
                payload.main = MainGraphSource::Structured {
                    nodes: nodes.unwrap_or_default(),
                    edges: edges.unwrap_or_default(),
                };
            }
        }
        Ok(payload)
    }

    /// CSV road graph needs both points and edges; otherwise the main
    /// graph is absent.
    pub fn from_csv(csv: CsvPayload) -> Self {
        let main = match (csv.points_csv, csv.edges_csv) {
            (Some(points_csv), Some(edges_csv)) => MainGraphSource::Csv {
                points_csv,
                edges_csv,
                metrics_csv: csv.metrics_csv,
            },
            _ => MainGraphSource::Absent,
        };
        Self {
            main,
            access: CsvPair::new(csv.access_nodes_csv, csv.access_edges_csv),
            combined: CsvPair::new(csv.combined_nodes_csv, csv.combined_edges_csv),
        }
    }
}

impl From<CsvPayload> for GraphPayload {
    fn from(csv: CsvPayload) -> Self {
        Self::from_csv(csv)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_variant() {
        let p = GraphPayload::from_json(
            r#"{"points_csv": "id", "edges_csv": "id", "metrics_csv": null, "nodes": {}}"#,
        )
        .unwrap();
        assert_eq!(p.main, MainGraphSource::Csv {
            points_csv: "id".into(),
            edges_csv: "id".into(),
            metrics_csv: None,
        });
        assert_eq!(p.access, None);
    }

    #[test]
    fn test_structured_variant_when_csv_incomplete() {
        let p = GraphPayload::from_json(
            r#"{"points_csv": "id", "nodes": {"1": {"lat": 1, "lon": 2}}}"#,
        )
        .unwrap();
        match p.main {
            MainGraphSource::Structured { nodes, edges } => {
                assert_eq!(nodes.len(), 1);
                assert!(edges.is_empty());
            }
            other => panic!("expected structured, got {other:?}"),
        }
    }

    #[test]
    fn test_access_fields_with_structured_main() {
        let p = GraphPayload::from_json(
            r#"{"nodes": {}, "edges": {}, "access_nodes_csv": "id,lat,lon", "combined_edges_csv": 5}"#,
        )
        .unwrap();
        assert!(matches!(p.main, MainGraphSource::Structured { .. }));
        assert_eq!(p.access, Some(CsvPair { nodes_csv: Some("id,lat,lon".into()), edges_csv: None }));
        assert_eq!(p.combined, None);
    }

    #[test]
    fn test_absent_main() {
        let p = GraphPayload::from_json(r#"{"nodes": [1, 2]}"#).unwrap();
        assert_eq!(p.main, MainGraphSource::Absent);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(matches!(
            GraphPayload::from_json("\"csv\""),
            Err(Error::InvalidPayload(_))
        ));
        assert!(matches!(GraphPayload::from_json("{"), Err(Error::Json(_))));
    }
}
