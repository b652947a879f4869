//! Geographic bounding boxes for camera framing.

use crate::domain::Coordinate;

/// An axis-aligned lat/lon bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    /// The tightest box containing all points; `None` for an empty set.
    pub fn from_points(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            south: first.lat(),
            west: first.lon(),
            north: first.lat(),
            east: first.lon(),
        };
        for point in &points[1..] {
            bounds.south = bounds.south.min(point.lat());
            bounds.west = bounds.west.min(point.lon());
            bounds.north = bounds.north.max(point.lat());
            bounds.east = bounds.east.max(point.lon());
        }
        Some(bounds)
    }

    /// Whether the box contains the point (inclusive edges).
    pub fn contains(&self, point: Coordinate) -> bool {
        point.lat() >= self.south
            && point.lat() <= self.north
            && point.lon() >= self.west
            && point.lon() <= self.east
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn empty_set_has_no_bounds() {
        assert_eq!(GeoBounds::from_points(&[]), None);
    }

    #[test]
    fn single_point_is_degenerate_box() {
        let bounds = GeoBounds::from_points(&[point(40.4, -3.7)]).unwrap();
        assert_eq!(bounds.south, 40.4);
        assert_eq!(bounds.north, 40.4);
        assert_eq!(bounds.west, -3.7);
        assert_eq!(bounds.east, -3.7);
    }

    #[test]
    fn box_spans_all_points() {
        let bounds = GeoBounds::from_points(&[
            point(40.40, -3.72),
            point(40.45, -3.68),
            point(40.42, -3.75),
        ])
        .unwrap();
        assert_eq!(bounds.south, 40.40);
        assert_eq!(bounds.north, 40.45);
        assert_eq!(bounds.west, -3.75);
        assert_eq!(bounds.east, -3.68);

        assert!(bounds.contains(point(40.42, -3.70)));
        assert!(!bounds.contains(point(40.50, -3.70)));
    }
}
