//! Metric decoder: side lookup of precomputed node metrics.

use hashbrown::HashMap;

use crate::model::NodeMetrics;
use crate::parse::CsvRow;

/// Node id → metrics. Later rows win.
pub type MetricLookup = HashMap<String, NodeMetrics>;

pub fn decode_metrics(rows: &[CsvRow]) -> MetricLookup {
    rows.iter()
        .filter_map(|row| {
            let id = row.id()?;
            let metrics = NodeMetrics {
                degree: row.optional("degree"),
                in_degree: row.optional("in_degree"),
                out_degree: row.optional("out_degree"),
                eigenvector: row.optional("eigenvector"),
                betweenness: row.optional("betweenness"),
                radius: row.optional("radius"),
                color: row.optional("color"),
            };
            Some((id.to_owned(), metrics))
        })
        .collect()
}
