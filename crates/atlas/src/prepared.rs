//! Polygon set prepared for repeated point queries
//!
//! Each part keeps its bounding rectangle so most misses are rejected with
//! four comparisons before the exact test runs. A point is contained by the
//! set when any part contains it.

use geo::{BoundingRect, Contains, Point, Polygon, Rect};

struct PreparedPart {
    bbox: Option<Rect<f64>>,
    polygon: Polygon<f64>,
}

impl PreparedPart {
    fn contains(&self, point: &Point<f64>) -> bool {
        if let Some(bbox) = &self.bbox {
            let (min, max) = (bbox.min(), bbox.max());
            if point.x() < min.x || point.x() > max.x || point.y() < min.y || point.y() > max.y {
                return false;
            }
        }
        self.polygon.contains(point)
    }
}

/// Single polygons queried as one set
pub struct PolygonSet {
    parts: Vec<PreparedPart>,
}

impl PolygonSet {
    /// Build the set; with `prepare` the bounding rectangles are computed now
    pub fn new(polygons: Vec<Polygon<f64>>, prepare: bool) -> Self {
        let parts = polygons
            .into_iter()
            .map(|polygon| PreparedPart {
                bbox: if prepare { polygon.bounding_rect() } else { None },
                polygon,
            })
            .collect();
        Self { parts }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether any part contains `point`
    pub fn contains(&self, point: &Point<f64>) -> bool {
        self.parts.iter().any(|part| part.contains(point))
    }
}
