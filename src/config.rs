//! Ingestion thresholds.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Connector edges shorter than this are noise from the access-graph builder.
pub const MIN_CONNECTOR_LENGTH_M: f64 = 15.0;
/// Half-size of the box drawn around a single point.
pub const DEFAULT_BOUNDS_MARGIN_DEG: f64 = 0.001;
pub const DEFAULT_SAMPLE_LIMIT: usize = 5;

/// Tunable knobs of the pipeline. Every field has a default, so a partial
/// JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Connector edges with a known length below this are dropped.
    pub min_connector_length_m: f64,
    /// Inflation applied to a degenerate (single point) bounds box.
    pub bounds_margin_deg: f64,
    /// Offending ids kept per decoder.
    pub invalid_sample_limit: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            min_connector_length_m: MIN_CONNECTOR_LENGTH_M,
            bounds_margin_deg: DEFAULT_BOUNDS_MARGIN_DEG,
            invalid_sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }
}

impl IngestConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_min_connector_length(mut self, meters: f64) -> Self {
        self.min_connector_length_m = meters;
        self
    }

    pub fn with_bounds_margin(mut self, degrees: f64) -> Self {
        self.bounds_margin_deg = degrees;
        self
    }

    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.invalid_sample_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = IngestConfig::from_json(r#"{"min_connector_length_m": 5.0}"#).unwrap();
        assert_eq!(cfg.min_connector_length_m, 5.0);
        assert_eq!(cfg.bounds_margin_deg, DEFAULT_BOUNDS_MARGIN_DEG);
        assert_eq!(cfg.invalid_sample_limit, 5);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(IngestConfig::from_json("{min:").is_err());
    }
}
