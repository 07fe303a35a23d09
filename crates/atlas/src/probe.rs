//! Timed contains loop

use std::time::{Duration, Instant};

use geo::Point;

use crate::prepared::PolygonSet;

/// Outcome of one timed pass over the points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub elapsed: Duration,
    pub contained: u64,
    pub points: u64,
}

impl Measurement {
    /// Elapsed time in whole milliseconds, truncated toward zero
    pub fn elapsed_ms(&self) -> u64 {
        truncate_millis(self.elapsed)
    }
}

/// Whole milliseconds in `elapsed`, never rounded up
pub fn truncate_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Test every point against the polygon set.
///
/// Only the predicate loop is inside the timed interval.
pub fn measure_contains(points: &[Point<f64>], polygons: &PolygonSet) -> Measurement {
    let start = Instant::now();
    let mut contained = 0u64;
    for point in points {
        if polygons.contains(point) {
            contained += 1;
        }
    }
    let elapsed = start.elapsed();

    Measurement {
        elapsed,
        contained: std::hint::black_box(contained),
        points: points.len() as u64,
    }
}
