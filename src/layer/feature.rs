use geo::{Coord, LineString, Point, Polygon};
use serde_json::{json, Value};

use crate::record::{tags_text, PointRecord, Tags};

/// Geometry derived for a single record.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Polygon(Polygon<f64>),
    Point(Point<f64>),
}

impl FeatureGeometry {
    fn to_geojson(&self) -> Value {
        match self {
            Self::Polygon(polygon) => {
                let mut rings = vec![ring_to_geojson(polygon.exterior())];
                rings.extend(polygon.interiors().iter().map(ring_to_geojson));
                json!({ "type": "Polygon", "coordinates": rings })
            }
            Self::Point(point) => json!({ "type": "Point", "coordinates": [point.x(), point.y()] }),
        }
    }
}

fn ring_to_geojson(ring: &LineString<f64>) -> Vec<[f64; 2]> {
    ring.coords().map(|&Coord { x, y }| [x, y]).collect()
}

/// A geometry tagged with the originating record's name and tags for tooltips.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: FeatureGeometry,
    pub name: Option<String>,
    pub tags: Tags,
}

impl Feature {
    /// Feature carrying `geometry` and the tooltip fields of `record`.
    pub fn from_record(record: &PointRecord, geometry: FeatureGeometry) -> Self {
        Self { geometry, name: record.name.clone(), tags: record.tags.clone() }
    }

    pub fn to_geojson(&self) -> Value {
        json!({
            "type": "Feature",
            "geometry": self.geometry.to_geojson(),
            "properties": {
                "name": self.name,
                "tags": tags_text(&self.tags),
            },
        })
    }
}

/// Ordered collection of features; order follows the input records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self { Self { features } }

    #[inline] pub fn len(&self) -> usize { self.features.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.features.is_empty() }

    pub fn to_geojson(&self) -> Value {
        json!({
            "type": "FeatureCollection",
            "features": self.features.iter().map(Feature::to_geojson).collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_feature_to_geojson() {
        let ring = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let record = PointRecord::new("Guardian Pharmacy", 0.5, 0.5)
            .with_tags(Tags::from([("amenity".into(), Some("pharmacy".into()))]));
        let feature = Feature::from_record(&record, FeatureGeometry::Polygon(Polygon::new(ring, vec![])));

        let value = feature.to_geojson();
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "Polygon");
        assert_eq!(value["geometry"]["coordinates"][0][2], json!([1.0, 1.0]));
        assert_eq!(value["properties"]["name"], "Guardian Pharmacy");
        assert_eq!(value["properties"]["tags"], r#"{"amenity":"pharmacy"}"#);
    }

    #[test]
    fn point_feature_and_null_name() {
        let record = PointRecord { name: None, latitude: -6.2, longitude: 106.8, tags: Tags::new() };
        let feature = Feature::from_record(&record, FeatureGeometry::Point(Point::new(106.8, -6.2)));
        let value = FeatureCollection::new(vec![feature]).to_geojson();
        assert_eq!(value["features"][0]["geometry"]["coordinates"], json!([106.8, -6.2]));
        assert!(value["features"][0]["properties"]["name"].is_null());
    }
}
