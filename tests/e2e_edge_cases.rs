//! End-to-end tests for messy real-world CSV.
//!
//! BOMs, CRLF line endings, comma decimals, no-break spaces, quoted cells,
//! historical column names and half-broken rows, all through the public
//! ingest path.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use road_graph_ingest::decode::edges::decode_road_edges;
use road_graph_ingest::parse::{clean_value, parse_document, parse_number, tokenize_line};
use road_graph_ingest::{Coord, CsvPayload, GraphPayload, GraphStatus, IngestConfig, Ingestor, ingest};

fn csv(points: &str, edges: &str) -> GraphPayload {
    GraphPayload::from(CsvPayload {
        points_csv: Some(points.into()),
        edges_csv: Some(edges.into()),
        ..CsvPayload::default()
    })
}

// ============================================================================
// 1. Cell-level normalization
// ============================================================================

#[test]
fn test_quoted_field_with_comma_and_quote() {
    let fields = tokenize_line(r#"e1,"Main, St""""#);
    assert_eq!(fields[1], "Main, St\"");
    assert_eq!(clean_value(&fields[1]), "Main, St\"");
}

#[test]
fn test_comma_decimal() {
    assert_eq!(parse_number("55,7522"), Some(55.7522));
}

#[test]
fn test_no_break_space_in_number_rejected() {
    // cleaned into a regular space first, which is not a digit separator
    assert_eq!(parse_number("1\u{a0}234"), None);
    assert_eq!(parse_number("\u{a0}12,5\u{a0}"), Some(12.5));
}

// ============================================================================
// 2. Document-level quirks
// ============================================================================

#[test]
fn test_bom_and_crlf_document() {
    let points = "\u{feff}Id;x,LAT,LONGTITUDE\r\n1;a,\"55,75\",\"37,61\"\r\n\r\n";
    let rows = parse_document(points);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("lat"), "55,75");
    assert_eq!(rows[0].get("longtitude"), "37,61");
}

#[test]
fn test_uppercase_headers_and_misspelled_longitude() {
    let out = ingest(&csv(
        "\u{feff}ID,LAT,LONGTITUDE\r\n1,\"55,75\",\"37,61\"\r\n2,55.76,37.62\r\n",
        "SOURCE,TARGET\r\n1,2\r\n",
    ));
    assert_eq!(out.status(), GraphStatus::Renderable);
    assert_eq!(out.graph.roads.nodes["1"].coord, Coord::new(55.75, 37.61));
}

#[test]
fn test_quoted_ids_and_padding() {
    let out = ingest(&csv(
        "id,lat,lon\n\" 7 \",1,2\n\"8\",3,4",
        "source,target\n7,8",
    ));
    assert!(out.graph.roads.nodes.contains_key("7"));
    assert!(out.graph.roads.nodes.contains_key("8"));
    assert_eq!(out.graph.roads.edges.len(), 1);
}

#[test]
fn test_unterminated_quote_does_not_abort() {
    let out = ingest(&csv(
        "id,lat,lon,name\n1,1,2,\"broken, name\n2,3,4,ok",
        "source,target\n1,2",
    ));
    assert_eq!(out.graph.roads.nodes.len(), 2);
    assert!(out.diagnostics.points.is_clean());
}

#[test]
fn test_sample_limit_is_configurable() {
    let points = (0..10).fold(String::from("id,lat,lon"), |acc, i| acc + &format!("\np{i},,"));
    let out = Ingestor::new(IngestConfig::default().with_sample_limit(2))
        .ingest(&csv(&points, "source,target"));
    assert_eq!(out.diagnostics.points.skipped, 10);
    assert_eq!(out.diagnostics.points.samples.as_slice(), ["p0".to_string(), "p1".to_string()]);
}

// ============================================================================
// 3. Edge presence property
// ============================================================================

proptest! {
    /// An edge row survives decoding iff both endpoint cells are non-empty,
    /// whether or not the ids exist anywhere.
    #[test]
    fn prop_edge_presence_iff_both_endpoints(
        rows in prop::collection::vec(("[a-z0-9]{0,3}", "[a-z0-9]{0,3}"), 0..25)
    ) {
        let doc = rows.iter().fold(String::from("source,target"), |acc, (a, b)| acc + &format!("\n{a},{b}"));
        let edges = decode_road_edges(&parse_document(&doc));
        // blank lines ("," is not blank) are never produced here
        let expected: Vec<(String, String)> = rows
            .iter()
            .filter(|(a, b)| !a.is_empty() && !b.is_empty())
            .cloned()
            .collect();
        let got: Vec<(String, String)> = edges.into_iter().map(|e| (e.from, e.to)).collect();
        prop_assert_eq!(got, expected);
    }
}
