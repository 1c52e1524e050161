//! # road-graph-ingest: Road & Pedestrian Graph Ingestion
//!
//! Decodes road-network, building-link and pedestrian-connector graphs
//! delivered as CSV text blobs (or legacy structured node/edge maps),
//! reconciles the overlapping layers and computes a viewport box.
//!
//! ## Design Principles
//!
//! 1. **Pure pipeline**: payload → rows → typed records → reconciled layers.
//!    No I/O, no shared state, nothing survives between payloads.
//! 2. **Partial-data tolerance**: malformed rows are skipped, counted and
//!    sampled. They never abort a decode.
//! 3. **Independent layer provenance**: building and connector subgraphs each
//!    pick their own source.
//!
//! ## Quick Start
//!
//! ```rust
//! use road_graph_ingest::{Ingestor, GraphStatus, Visibility};
//!
//! # fn example() -> road_graph_ingest::Result<()> {
//! let payload = r#"{
//!     "points_csv": "id,lat,lon\n1,55.75,37.61\n2,55.76,37.62",
//!     "edges_csv": "id,source,target\ne1,1,2"
//! }"#;
//!
//! let output = Ingestor::default().ingest_json(payload)?;
//! assert_eq!(output.status(), GraphStatus::Renderable);
//! assert!(output.bounds(&Visibility::default()).is_some());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Input Sources
//!
//! | Field pair | Layer(s) | Classified by |
//! |------------|----------|---------------|
//! | `points_csv` / `edges_csv` / `metrics_csv` | roads | |
//! | `nodes` / `edges` (objects) | roads | legacy shape |
//! | `access_nodes_csv` / `access_edges_csv` | buildings, connectors | `is_building_link` |
//! | `combined_nodes_csv` / `combined_edges_csv` | buildings, connectors | `layer` column |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod parse;
pub mod decode;
pub mod reconcile;
pub mod geometry;
pub mod bounds;
pub mod payload;
pub mod config;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Coord, RoadNode, RoadEdge, AccessNode, AccessEdge, NodeMetrics,
    NodeType, LayerTag, RoadGraph, AccessSubgraph, ReconciledGraph,
    GraphSource, Layer, LayerAvailability,
};

// ============================================================================
// Re-exports: Pipeline stages
// ============================================================================

pub use bounds::{BoundsBox, Visibility, compute_bounds};
pub use config::IngestConfig;
pub use decode::RowDiagnostics;
pub use geometry::haversine_m;
pub use payload::{GraphPayload, MainGraphSource, CsvPair, CsvPayload};

use decode::access::AccessFlavor;
use reconcile::SourceGraph;
use serde::{Deserialize, Serialize};

// ============================================================================
// Ingestor: the pipeline handle
// ============================================================================

/// The primary entry point. An `Ingestor` carries the thresholds and turns
/// one payload into one [`IngestOutput`].
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    config: IngestConfig,
}

impl Ingestor {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Decode a JSON payload as delivered by the graph endpoint, then ingest it.
    pub fn ingest_json(&self, json: &str) -> Result<IngestOutput> {
        let payload = GraphPayload::from_json(json)?;
        Ok(self.ingest(&payload))
    }

    /// Run every stage over an already resolved payload.
    pub fn ingest(&self, payload: &GraphPayload) -> IngestOutput {
        let config = &self.config;

        // Stage 1: main road graph
        let (roads, points) = match &payload.main {
            MainGraphSource::Csv { points_csv, edges_csv, metrics_csv } => {
                let metric_rows = parse::parse_document(metrics_csv.as_deref().unwrap_or_default());
                let metrics = decode::metrics::decode_metrics(&metric_rows);
                let point_rows = parse::parse_document(points_csv);
                let (nodes, diagnostics) = decode::points::decode_points(&point_rows, &metrics, config);
                let edges = decode::edges::decode_road_edges(&parse::parse_document(edges_csv));
                (RoadGraph { nodes, edges }, diagnostics)
            }
            MainGraphSource::Structured { nodes, edges } => {
                decode::structured::decode_structured(nodes, edges, config)
            }
            MainGraphSource::Absent => (RoadGraph::default(), RowDiagnostics::default()),
        };
        points.report("road points");

        // Stage 2: access layers
        let (legacy, access) = decode_source(payload.access.as_ref(), AccessFlavor::Legacy, config);
        access.report("legacy access nodes");
        let (combined, combined_diag) =
            decode_source(payload.combined.as_ref(), AccessFlavor::Combined, config);
        combined_diag.report("combined access nodes");

        // Stage 3: reconcile
        let graph = reconcile::reconcile(roads, legacy.as_ref(), combined.as_ref(), config);

        IngestOutput {
            graph,
            diagnostics: IngestDiagnostics { points, access, combined: combined_diag },
            bounds_margin_deg: config.bounds_margin_deg,
        }
    }
}

fn decode_source(
    pair: Option<&CsvPair>,
    flavor: AccessFlavor,
    config: &IngestConfig,
) -> (Option<SourceGraph>, RowDiagnostics) {
    let Some(pair) = pair else {
        return (None, RowDiagnostics::default());
    };
    let node_rows = parse::parse_document(pair.nodes_csv.as_deref().unwrap_or_default());
    let (nodes, diagnostics) = decode::access::decode_access_nodes(&node_rows, flavor, config);
    let edge_rows = parse::parse_document(pair.edges_csv.as_deref().unwrap_or_default());
    let edges = decode::access::decode_access_edges(&edge_rows, flavor, &nodes);
    (Some(SourceGraph::new(flavor.source(), nodes, edges)), diagnostics)
}

/// Convenience: ingest with default thresholds.
pub fn ingest(payload: &GraphPayload) -> IngestOutput {
    Ingestor::default().ingest(payload)
}

// ============================================================================
// Output
// ============================================================================

/// Skipped-row counters for every decoder that validates coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestDiagnostics {
    /// Road points (CSV or structured).
    pub points: RowDiagnostics,
    /// Legacy access nodes.
    pub access: RowDiagnostics,
    /// Combined-layer nodes.
    pub combined: RowDiagnostics,
}

impl IngestDiagnostics {
    pub fn has_malformed_rows(&self) -> bool {
        self.points.skipped > 0 || self.access.skipped > 0 || self.combined.skipped > 0
    }
}

/// Whether the payload produced anything worth drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphStatus {
    Renderable,
    /// No layer has both nodes and edges. `malformed_rows` is set when some
    /// rows were skipped, i.e. the source data is the likely culprit.
    NoData { malformed_rows: bool },
}

/// Everything one payload yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestOutput {
    pub graph: ReconciledGraph,
    pub diagnostics: IngestDiagnostics,
    bounds_margin_deg: f64,
}

impl IngestOutput {
    pub fn status(&self) -> GraphStatus {
        if self.graph.availability().any() {
            GraphStatus::Renderable
        } else {
            GraphStatus::NoData { malformed_rows: self.diagnostics.has_malformed_rows() }
        }
    }

    pub fn availability(&self) -> LayerAvailability {
        self.graph.availability()
    }

    /// Viewport over the layers the caller currently shows.
    pub fn bounds(&self, visibility: &Visibility) -> Option<BoundsBox> {
        compute_bounds(self.graph.visible_coords(visibility), self.bounds_margin_deg)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Exported CSV is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
