//! # Row Decoders
//!
//! Header-mapped rows → typed records. Every decoder that validates
//! coordinates hands back a [`RowDiagnostics`] accumulator next to its
//! collection, so no counter state lives outside the call.

pub mod points;
pub mod edges;
pub mod metrics;
pub mod access;
pub mod structured;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::DEFAULT_SAMPLE_LIMIT;
use crate::model::Coord;
use crate::parse::{CsvRow, parse_number};

// ============================================================================
// Column aliases
// ============================================================================

pub const POINT_LAT: &[&str] = &["latitude", "lat", "latitude_value"];
/// `longtitude` is a historical misspelling still found in exports.
pub const POINT_LON: &[&str] = &["longitude", "long", "longitude_value", "longtitude"];

pub const ROAD_FROM: &[&str] = &["source", "from", "id_src"];
pub const ROAD_TO: &[&str] = &["target", "to", "id_dist"];
pub const ROAD_WAY: &[&str] = &["id_way", "way_id"];

pub const ACCESS_LAT: &[&str] = &["latitude", "lat"];
pub const ACCESS_LON: &[&str] = &["longitude", "lon"];
pub const ACCESS_FROM: &[&str] = &["source", "from", "id_src"];
pub const ACCESS_TO: &[&str] = &["target", "to", "id_dst"];
pub const ACCESS_LENGTH: &[&str] = &["length_m", "length", "distance"];

/// Both coordinates of a row, or `None` if either fails to normalize.
pub(crate) fn row_coord(row: &CsvRow, lat: &[&str], lon: &[&str]) -> Option<Coord> {
    let lat = parse_number(row.first_of(lat))?;
    let lon = parse_number(row.first_of(lon))?;
    Coord::finite(lat, lon)
}

// ============================================================================
// Diagnostics accumulator
// ============================================================================

/// Skipped-row counter with a bounded list of offending ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowDiagnostics {
    pub skipped: usize,
    /// Ids of the first skipped rows. A structured node with a blank key is
    /// sampled as its JSON value.
    pub samples: SmallVec<[String; DEFAULT_SAMPLE_LIMIT]>,
}

impl RowDiagnostics {
    /// Count one skipped row; keep its sample while under `limit`.
    pub fn record(&mut self, sample: impl Into<String>, limit: usize) {
        self.skipped += 1;
        if self.samples.len() < limit {
            self.samples.push(sample.into());
        }
    }

    pub fn is_clean(&self) -> bool {
        self.skipped == 0
    }

    /// Emit one warning for the whole decode, nothing when clean.
    pub fn report(&self, what: &str) {
        if !self.is_clean() {
            tracing::warn!(
                skipped = self.skipped,
                samples = ?self.samples,
                "{what}: rows skipped due to invalid coordinates"
            );
        }
    }
}
