//! Edges of the road graph and of the access layers.

use serde::{Deserialize, Serialize};

/// Explicit layer classification carried by combined-source rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayerTag {
    Building,
    /// Base road layer, duplicated in the combined tables and never drawn from them.
    Base,
    Other(String),
}

impl LayerTag {
    /// Lowercase a `layer` cell. Blank cells carry no tag.
    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.to_lowercase();
        (!lowered.is_empty()).then(|| LayerTag::from(lowered))
    }

    pub fn as_str(&self) -> &str {
        match self {
            LayerTag::Building => "building",
            LayerTag::Base => "base",
            LayerTag::Other(s) => s,
        }
    }
}

impl From<String> for LayerTag {
    fn from(s: String) -> Self {
        match s.as_str() {
            "building" => LayerTag::Building,
            "base" => LayerTag::Base,
            _ => LayerTag::Other(s),
        }
    }
}

impl From<LayerTag> for String {
    fn from(t: LayerTag) -> Self {
        match t {
            LayerTag::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

/// A road segment between two intersections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadEdge {
    pub id: Option<String>,
    pub way_id: Option<String>,
    pub from: String,
    pub to: String,
    pub name: Option<String>,
}

impl RoadEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: None,
            way_id: None,
            from: from.into(),
            to: to.into(),
            name: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A building link or pedestrian connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessEdge {
    pub id: Option<String>,
    pub from: String,
    pub to: String,
    pub road_type: Option<String>,
    pub name: Option<String>,
    pub is_building_link: bool,
    /// Only set for combined-source rows.
    pub layer: Option<LayerTag>,
    /// Meters; explicit or haversine between the endpoints.
    /// `None` when neither is available.
    pub length_m: Option<f64>,
}

impl AccessEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: None,
            from: from.into(),
            to: to.into(),
            road_type: None,
            name: None,
            is_building_link: false,
            layer: None,
            length_m: None,
        }
    }

    pub fn with_layer(mut self, layer: LayerTag) -> Self {
        self.layer = Some(layer);
        self
    }

    pub fn with_length(mut self, length_m: f64) -> Self {
        self.length_m = Some(length_m);
        self
    }

    pub fn building_link(mut self) -> Self {
        self.is_building_link = true;
        self
    }
}
