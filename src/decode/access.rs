//! Access decoder: building links and pedestrian connectors.
//!
//! The same code decodes the legacy `access_*` tables and the layer-tagged
//! `combined_*` tables; [`AccessFlavor`] selects the defaults that differ.

use hashbrown::HashMap;

use super::{
    ACCESS_FROM, ACCESS_LAT, ACCESS_LENGTH, ACCESS_LON, ACCESS_TO, RowDiagnostics, row_coord,
};
use crate::config::IngestConfig;
use crate::geometry::haversine_m;
use crate::model::{AccessEdge, AccessNode, GraphSource, LayerTag, NodeType};
use crate::parse::{CsvRow, parse_bool, parse_number};

/// Which table pair a row comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessFlavor {
    Legacy,
    Combined,
}

impl AccessFlavor {
    pub fn source(self) -> GraphSource {
        match self {
            AccessFlavor::Legacy => GraphSource::Legacy,
            AccessFlavor::Combined => GraphSource::Combined,
        }
    }

    fn default_node_type(self) -> NodeType {
        match self {
            AccessFlavor::Legacy => NodeType::Intersection,
            AccessFlavor::Combined => NodeType::Connector,
        }
    }

    /// Only combined rows carry a layer tag.
    fn layer(self, row: &CsvRow) -> Option<LayerTag> {
        match self {
            AccessFlavor::Legacy => None,
            AccessFlavor::Combined => LayerTag::parse(row.get("layer")),
        }
    }
}

pub fn decode_access_nodes(
    rows: &[CsvRow],
    flavor: AccessFlavor,
    config: &IngestConfig,
) -> (HashMap<String, AccessNode>, RowDiagnostics) {
    let mut nodes = HashMap::with_capacity(rows.len());
    let mut diagnostics = RowDiagnostics::default();

    for row in rows {
        let Some(id) = row.id() else {
            continue;
        };
        let Some(coord) = row_coord(row, ACCESS_LAT, ACCESS_LON) else {
            diagnostics.record(id, config.invalid_sample_limit);
            continue;
        };
        let node = AccessNode {
            id: id.to_owned(),
            coord,
            node_type: NodeType::parse_or(row.get("node_type"), flavor.default_node_type()),
            source_type: row.optional("source_type"),
            source_id: row.optional("source_id"),
            name: row.optional("name"),
            layer: flavor.layer(row),
        };
        nodes.insert(id.to_owned(), node);
    }

    (nodes, diagnostics)
}

/// Decode access edges. `nodes` is the node table of the same source and
/// only serves the length fallback.
pub fn decode_access_edges(
    rows: &[CsvRow],
    flavor: AccessFlavor,
    nodes: &HashMap<String, AccessNode>,
) -> Vec<AccessEdge> {
    rows.iter()
        .filter_map(|row| {
            let from = row.first_of(ACCESS_FROM);
            let to = row.first_of(ACCESS_TO);
            if from.is_empty() || to.is_empty() {
                return None;
            }
            let length_m = parse_number(row.first_of(ACCESS_LENGTH))
                .or_else(|| Some(haversine_m(nodes.get(from)?.coord, nodes.get(to)?.coord)));
            Some(AccessEdge {
                id: row.optional("id"),
                from: from.to_owned(),
                to: to.to_owned(),
                road_type: row.optional("road_type"),
                name: row.optional("name"),
                is_building_link: parse_bool(row.get("is_building_link")),
                layer: flavor.layer(row),
                length_m,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coord;
    use crate::parse::parse_document;

    fn nodes(csv: &str, flavor: AccessFlavor) -> (HashMap<String, AccessNode>, RowDiagnostics) {
        decode_access_nodes(&parse_document(csv), flavor, &IngestConfig::default())
    }

    #[test]
    fn test_legacy_node_defaults() {
        let (n, diag) = nodes(
            "id,lat,lon,node_type,source_type,source_id,name,layer\n\
             a,1,2,,osm_way,42,Gate,building\n\
             b,1,2,building,,,,",
            AccessFlavor::Legacy,
        );
        assert!(diag.is_clean());
        assert_eq!(n["a"].node_type, NodeType::Intersection);
        assert_eq!(n["a"].source_type.as_deref(), Some("osm_way"));
        assert_eq!(n["a"].source_id.as_deref(), Some("42"));
        assert_eq!(n["a"].name.as_deref(), Some("Gate"));
        assert_eq!(n["a"].layer, None);
        assert_eq!(n["b"].node_type, NodeType::Building);
    }

    #[test]
    fn test_combined_node_defaults() {
        let (n, _) = nodes(
            "id,latitude,longitude,layer\na,1,2,Building\nb,1,2,",
            AccessFlavor::Combined,
        );
        assert_eq!(n["a"].node_type, NodeType::Connector);
        assert_eq!(n["a"].layer, Some(LayerTag::Building));
        assert_eq!(n["b"].layer, None);
    }

    #[test]
    fn test_invalid_access_rows_counted() {
        let (n, diag) = nodes("id,lat,lon\na,1,\nb,,2\nc,1,2", AccessFlavor::Combined);
        assert_eq!(n.len(), 1);
        assert_eq!(diag.skipped, 2);
        assert_eq!(diag.samples.as_slice(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_access_rows_without_id_not_counted() {
        for flavor in [AccessFlavor::Legacy, AccessFlavor::Combined] {
            let (n, diag) = nodes("id,lat,lon\n,1,2\n,,\nc,1,2", flavor);
            assert_eq!(n.len(), 1);
            assert!(diag.is_clean());
        }
    }

    #[test]
    fn test_explicit_length_preferred() {
        let (n, _) = nodes("id,lat,lon\na,0,0\nb,0,1", AccessFlavor::Legacy);
        let rows = parse_document("source,target,length_m,distance\na,b,,\"12,5\"\na,b,3,");
        let edges = decode_access_edges(&rows, AccessFlavor::Legacy, &n);
        assert_eq!(edges[0].length_m, Some(12.5));
        assert_eq!(edges[1].length_m, Some(3.0));
    }

    #[test]
    fn test_length_falls_back_to_haversine() {
        let (n, _) = nodes("id,lat,lon\na,0,0\nb,0,1", AccessFlavor::Legacy);
        let rows = parse_document("source,target,length\na,b,n/a\na,zzz,");
        let edges = decode_access_edges(&rows, AccessFlavor::Legacy, &n);
        let expected = haversine_m(Coord::new(0.0, 0.0), Coord::new(0.0, 1.0));
        assert_eq!(edges[0].length_m, Some(expected));
        assert_eq!(edges[1].length_m, None);
    }

    #[test]
    fn test_edge_flags_and_aliases() {
        let rows = parse_document(
            "id,from,id_dst,is_building_link,road_type,layer\n\
             e1,a,b,YES,footway,Connector\n\
             e2,a,,true,,\n\
             e3,a,b,0,,base",
        );
        let edges = decode_access_edges(&rows, AccessFlavor::Combined, &HashMap::new());
        assert_eq!(edges.len(), 2);
        assert!(edges[0].is_building_link);
        assert_eq!(edges[0].road_type.as_deref(), Some("footway"));
        assert_eq!(edges[0].layer, Some(LayerTag::Other("connector".into())));
        assert!(!edges[1].is_building_link);
        assert_eq!(edges[1].layer, Some(LayerTag::Base));
    }
}
