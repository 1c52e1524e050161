//! Nodes of the road graph and of the access (building / connector) layers.

use serde::{Deserialize, Serialize};

use super::LayerTag;

/// A WGS84 position. Both components are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `None` unless both components are finite.
    pub fn finite(lat: f64, lon: f64) -> Option<Self> {
        (lat.is_finite() && lon.is_finite()).then_some(Self { lat, lon })
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Precomputed per-node metrics, passed through untouched.
///
/// Values are whatever the upstream source wrote; nothing here is
/// parsed or validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMetrics {
    pub degree: Option<String>,
    pub in_degree: Option<String>,
    pub out_degree: Option<String>,
    pub eigenvector: Option<String>,
    pub betweenness: Option<String>,
    pub radius: Option<String>,
    pub color: Option<String>,
}

impl NodeMetrics {
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_none())
    }

    /// `(column name, value)` pairs in export order.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("degree", self.degree.as_deref()),
            ("in_degree", self.in_degree.as_deref()),
            ("out_degree", self.out_degree.as_deref()),
            ("eigenvector", self.eigenvector.as_deref()),
            ("betweenness", self.betweenness.as_deref()),
            ("radius", self.radius.as_deref()),
            ("color", self.color.as_deref()),
        ]
    }
}

/// An intersection of the road network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadNode {
    pub id: String,
    pub coord: Coord,
    pub metrics: NodeMetrics,
}

impl RoadNode {
    pub fn new(id: impl Into<String>, coord: Coord) -> Self {
        Self {
            id: id.into(),
            coord,
            metrics: NodeMetrics::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: NodeMetrics) -> Self {
        self.metrics = metrics;
        self
    }
}

/// Kind of an access node.
///
/// Unknown kinds are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Intersection,
    Building,
    Connector,
    Other(String),
}

impl NodeType {
    /// Parse a `node_type` cell, falling back to `default` when it is blank.
    pub fn parse_or(raw: &str, default: NodeType) -> Self {
        if raw.is_empty() {
            default
        } else {
            NodeType::from(raw.to_owned())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Intersection => "intersection",
            NodeType::Building => "building",
            NodeType::Connector => "connector",
            NodeType::Other(s) => s,
        }
    }

    pub fn is_building(&self) -> bool {
        matches!(self, NodeType::Building)
    }
}

impl From<String> for NodeType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "intersection" => NodeType::Intersection,
            "building" => NodeType::Building,
            "connector" => NodeType::Connector,
            _ => NodeType::Other(s),
        }
    }
}

impl From<NodeType> for String {
    fn from(t: NodeType) -> Self {
        match t {
            NodeType::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

/// A node of the legacy access graph or of the combined layer graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessNode {
    pub id: String,
    pub coord: Coord,
    pub node_type: NodeType,
    /// Provenance, e.g. `osm_way` / `123456`.
    pub source_type: Option<String>,
    pub source_id: Option<String>,
    pub name: Option<String>,
    /// Only set for combined-source rows.
    pub layer: Option<LayerTag>,
}

impl AccessNode {
    pub fn new(id: impl Into<String>, coord: Coord, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            coord,
            node_type,
            source_type: None,
            source_id: None,
            name: None,
            layer: None,
        }
    }

    pub fn with_layer(mut self, layer: LayerTag) -> Self {
        self.layer = Some(layer);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_parse_or() {
        assert_eq!(NodeType::parse_or("", NodeType::Intersection), NodeType::Intersection);
        assert_eq!(NodeType::parse_or("building", NodeType::Connector), NodeType::Building);
        assert_eq!(
            NodeType::parse_or("entrance", NodeType::Connector),
            NodeType::Other("entrance".into())
        );
    }

    #[test]
    fn test_node_type_serde_as_string() {
        let json = serde_json::to_string(&NodeType::Other("entrance".into())).unwrap();
        assert_eq!(json, "\"entrance\"");
        let back: NodeType = serde_json::from_str("\"building\"").unwrap();
        assert_eq!(back, NodeType::Building);
    }

    #[test]
    fn test_coord_finite() {
        assert!(Coord::finite(1.0, 2.0).is_some());
        assert!(Coord::finite(f64::NAN, 2.0).is_none());
        assert!(Coord::finite(1.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_metrics_is_empty() {
        assert!(NodeMetrics::default().is_empty());
        let m = NodeMetrics { color: Some("#fff".into()), ..Default::default() };
        assert!(!m.is_empty());
    }
}
