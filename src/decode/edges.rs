//! Road edge decoder.
//!
//! Edges are advisory: a row without both endpoint ids is dropped without
//! being counted. Whether the endpoints exist is checked later, when the
//! road subgraph is finalized.

use super::{ROAD_FROM, ROAD_TO, ROAD_WAY};
use crate::model::RoadEdge;
use crate::parse::CsvRow;

pub fn decode_road_edges(rows: &[CsvRow]) -> Vec<RoadEdge> {
    rows.iter()
        .filter_map(|row| {
            let from = row.first_of(ROAD_FROM);
            let to = row.first_of(ROAD_TO);
            if from.is_empty() || to.is_empty() {
                return None;
            }
            let way_id = row.first_of(ROAD_WAY);
            Some(RoadEdge {
                id: row.optional("id"),
                way_id: (!way_id.is_empty()).then(|| way_id.to_owned()),
                from: from.to_owned(),
                to: to.to_owned(),
                name: row.optional("name"),
            })
        })
        .collect()
}
