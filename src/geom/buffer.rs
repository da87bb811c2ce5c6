use std::f64::consts::FRAC_PI_2;

use geo::{Coord, LineString, Polygon};

use crate::error::{MapError, MapResult};

/// Segments used per quarter circle when approximating a disk.
pub const BUFFER_QUADRANT_SEGMENTS: usize = 16;

/// Closed ring approximating a disk of `radius` around `center`.
///
/// The disk is built in the plane of the input coordinates, so for lon/lat input
/// it is a circle in degree space rather than on the ground. The ring starts at
/// `(x + r, y)`, runs clockwise and repeats its first coordinate at the end.
pub fn buffer_ring(center: Coord<f64>, radius: f64) -> MapResult<LineString<f64>> {
    if !center.x.is_finite() || !center.y.is_finite() {
        return Err(MapError::data(format!("cannot buffer non-finite point ({}, {})", center.x, center.y)));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(MapError::config(format!("buffer radius must be positive, got {radius}")));
    }

    let segments = 4 * BUFFER_QUADRANT_SEGMENTS;
    let step = FRAC_PI_2 / BUFFER_QUADRANT_SEGMENTS as f64;

    let mut coords = Vec::with_capacity(segments + 1);
    for i in 0..segments {
        let angle = -(i as f64) * step;
        coords.push(Coord {
            x: center.x + radius * angle.cos(),
            y: center.y + radius * angle.sin(),
        });
    }
    coords.push(coords[0]);

    Ok(LineString(coords))
}

/// Polygon form of [`buffer_ring`] with no holes.
pub fn buffer_polygon(center: Coord<f64>, radius: f64) -> MapResult<Polygon<f64>> {
    Ok(Polygon::new(buffer_ring(center, radius)?, vec![]))
}
