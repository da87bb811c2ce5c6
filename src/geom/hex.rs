use geo::{Coord, LineString};
use h3o::{CellIndex, LatLng, Resolution};

use crate::error::{MapError, MapResult};

/// Hexagonal grid cell containing the point at the given resolution.
pub fn hex_cell(latitude: f64, longitude: f64, resolution: Resolution) -> MapResult<CellIndex> {
    let ll = LatLng::new(latitude, longitude)
        .map_err(|e| MapError::data(format!("invalid coordinate ({latitude}, {longitude}): {e}")))?;
    Ok(ll.to_cell(resolution))
}

/// Boundary of the cell containing the point, as a closed ring of `[lon, lat]` coordinates
/// in counter-clockwise (GeoJSON) order.
pub fn hex_cell_ring(latitude: f64, longitude: f64, resolution: Resolution) -> MapResult<(CellIndex, LineString<f64>)> {
    let cell = hex_cell(latitude, longitude, resolution)?;

    let mut coords: Vec<Coord<f64>> = cell.boundary().iter()
        .map(|vertex| Coord { x: vertex.lng(), y: vertex.lat() })
        .collect();
    if let Some(&first) = coords.first() {
        coords.push(first);
    }

    Ok((cell, LineString(coords)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Contains, Point, Polygon};

    #[test]
    fn ring_is_closed_and_contains_point() {
        let (cell, ring) = hex_cell_ring(-6.2, 106.8, Resolution::Seven).unwrap();
        assert_eq!(cell.resolution(), Resolution::Seven);
        assert!(ring.0.len() >= 7);
        assert_eq!(ring.0.first(), ring.0.last());

        let polygon = Polygon::new(ring, vec![]);
        assert!(polygon.contains(&Point::new(106.8, -6.2)));
    }

    #[test]
    fn finer_resolution_gives_smaller_cells() {
        use geo::Area;
        let (_, coarse) = hex_cell_ring(-6.2, 106.8, Resolution::Six).unwrap();
        let (_, fine) = hex_cell_ring(-6.2, 106.8, Resolution::Nine).unwrap();
        let coarse = Polygon::new(coarse, vec![]).unsigned_area();
        let fine = Polygon::new(fine, vec![]).unsigned_area();
        assert!(fine < coarse);
    }

    #[test]
    fn rejects_non_finite() {
        assert!(matches!(hex_cell(f64::NAN, 0.0, Resolution::Seven), Err(MapError::Data(_))));
    }
}
