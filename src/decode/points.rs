//! Point decoder: road intersections from `points_csv`.

use hashbrown::HashMap;

use super::metrics::MetricLookup;
use super::{POINT_LAT, POINT_LON, RowDiagnostics, row_coord};
use crate::config::IngestConfig;
use crate::model::RoadNode;
use crate::parse::CsvRow;

/// Decode road nodes, attaching metrics by id.
///
/// Rows without an id are skipped silently. Rows with an id but without
/// both coordinates are skipped and counted.
pub fn decode_points(
    rows: &[CsvRow],
    metrics: &MetricLookup,
    config: &IngestConfig,
) -> (HashMap<String, RoadNode>, RowDiagnostics) {
    let mut nodes = HashMap::with_capacity(rows.len());
    let mut diagnostics = RowDiagnostics::default();

    for row in rows {
        let Some(id) = row.id() else {
            continue;
        };
        let Some(coord) = row_coord(row, POINT_LAT, POINT_LON) else {
            diagnostics.record(id, config.invalid_sample_limit);
            continue;
        };
        let node = RoadNode::new(id, coord)
            .with_metrics(metrics.get(id).cloned().unwrap_or_default());
        nodes.insert(id.to_owned(), node);
    }

    (nodes, diagnostics)
}
