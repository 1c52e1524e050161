//! Viewport bounds over the visible layers.

use serde::{Deserialize, Serialize};

use crate::model::{Coord, LayerAvailability};

/// Layer toggles, owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub roads: bool,
    pub buildings: bool,
    pub connectors: bool,
}

impl Default for Visibility {
    /// Roads and buildings on, connectors off.
    fn default() -> Self {
        Self { roads: true, buildings: true, connectors: false }
    }
}

impl Visibility {
    pub fn all() -> Self {
        Self { roads: true, buildings: true, connectors: true }
    }

    /// Switch off toggles of layers with nothing to draw. Never turns a
    /// toggle on.
    pub fn restricted_to(self, availability: &LayerAvailability) -> Self {
        Self {
            roads: self.roads && availability.roads,
            buildings: self.buildings && availability.buildings,
            connectors: self.connectors && availability.connectors,
        }
    }
}

/// South-west / north-east corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsBox {
    pub min: Coord,
    pub max: Coord,
}

impl BoundsBox {
    pub fn contains(&self, c: Coord) -> bool {
        (self.min.lat..=self.max.lat).contains(&c.lat)
            && (self.min.lon..=self.max.lon).contains(&c.lon)
    }
}

/// Min/max box over `coords`.
///
/// No coordinates → `None`. A single distinct point is inflated by
/// `margin_deg` on every side so the box has an area.
pub fn compute_bounds(coords: impl IntoIterator<Item = Coord>, margin_deg: f64) -> Option<BoundsBox> {
    let mut iter = coords.into_iter();
    let first = iter.next()?;
    let (min, max) = iter.fold((first, first), |(min, max), c| {
        (
            Coord::new(min.lat.min(c.lat), min.lon.min(c.lon)),
            Coord::new(max.lat.max(c.lat), max.lon.max(c.lon)),
        )
    });

    if min == max {
        return Some(BoundsBox {
            min: Coord::new(min.lat - margin_deg, min.lon - margin_deg),
            max: Coord::new(max.lat + margin_deg, max.lon + margin_deg),
        });
    }
    Some(BoundsBox { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_bounds() {
        assert_eq!(compute_bounds(Vec::new(), 0.001), None);
    }

    #[test]
    fn test_single_point_inflated() {
        let p = Coord::new(55.75, 37.61);
        let b = compute_bounds([p], 0.001).unwrap();
        assert_eq!(b.min, Coord::new(55.75 - 0.001, 37.61 - 0.001));
        assert_eq!(b.max, Coord::new(55.75 + 0.001, 37.61 + 0.001));
    }

    #[test]
    fn test_repeated_point_is_degenerate() {
        let p = Coord::new(1.0, 2.0);
        let b = compute_bounds([p, p, p], 0.5).unwrap();
        assert_eq!(b.min, Coord::new(0.5, 1.5));
        assert_eq!(b.max, Coord::new(1.5, 2.5));
    }

    #[test]
    fn test_raw_box() {
        let b = compute_bounds(
            [Coord::new(1.0, 5.0), Coord::new(-2.0, 7.0), Coord::new(0.0, 6.0)],
            0.001,
        )
        .unwrap();
        assert_eq!(b.min, Coord::new(-2.0, 5.0));
        assert_eq!(b.max, Coord::new(1.0, 7.0));
        assert!(b.contains(Coord::new(0.0, 6.0)));
        assert!(!b.contains(Coord::new(2.0, 6.0)));
    }

    #[test]
    fn test_collinear_points_not_inflated() {
        // same latitude, different longitude: only one axis is flat
        let b = compute_bounds([Coord::new(1.0, 1.0), Coord::new(1.0, 2.0)], 0.001).unwrap();
        assert_eq!(b.min, Coord::new(1.0, 1.0));
        assert_eq!(b.max, Coord::new(1.0, 2.0));
    }

    #[test]
    fn test_restricted_to() {
        let avail = LayerAvailability { roads: true, buildings: false, connectors: true };
        let v = Visibility::default().restricted_to(&avail);
        assert_eq!(v, Visibility { roads: true, buildings: false, connectors: false });
    }
}
