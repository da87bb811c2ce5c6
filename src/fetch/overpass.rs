use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::record::Tags;

/// Public Overpass interpreter endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://overpass-api.de/api/interpreter";

/// Name given to elements without a `name` tag.
pub const UNKNOWN_NAME: &str = "Unknown Pharmacy";

/// Amenity search within a named administrative area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassQuery {
    pub area: String,
    pub amenity: String,
    pub timeout_secs: u32,
}

impl Default for OverpassQuery {
    fn default() -> Self {
        Self {
            area: "Daerah Khusus ibukota Jakarta".into(),
            amenity: "pharmacy".into(),
            timeout_secs: 25,
        }
    }
}

impl OverpassQuery {
    /// Overpass QL text: nodes, ways and relations with centers and tags.
    pub fn to_ql(&self) -> String {
        let area = escape_ql(&self.area);
        let amenity = escape_ql(&self.amenity);
        let selectors: String = ["node", "way", "relation"].iter()
            .map(|kind| format!("{kind}['amenity'='{amenity}'](area.a);"))
            .collect();
        format!(
            "[out:json][timeout:{}];area['name'='{area}']->.a;({selectors});out center tags;",
            self.timeout_secs
        )
    }
}

fn escape_ql(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type", default)]
    pub element_type: String,
    pub id: Option<i64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl OverpassElement {
    /// Node position, or the computed center of a way/relation.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => Some((lat, lon)),
            (_, _, Some(Center { lat, lon })) => Some((lat, lon)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// A point extracted from the upstream response, shaped like the points table.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedPoint {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub tags: Tags,
}

impl StagedPoint {
    /// Location in WKT, longitude first.
    pub fn wkt(&self) -> String { format!("POINT({} {})", self.longitude, self.latitude) }
}

/// Keep elements with an id and a finite position.
pub fn extract_points(response: &OverpassResponse) -> Vec<StagedPoint> {
    let mut points = Vec::with_capacity(response.elements.len());
    for element in &response.elements {
        let (Some(id), Some((latitude, longitude))) = (element.id, element.position()) else {
            warn!("[overpass] skipping {} element without id or position", element.element_type);
            continue;
        };
        if !latitude.is_finite() || !longitude.is_finite() {
            warn!("[overpass] skipping element {id} with non-finite position");
            continue;
        }

        let name = element.tags.get("name").cloned().unwrap_or_else(|| UNKNOWN_NAME.to_string());
        let tags = element.tags.iter()
            .map(|(k, v)| (k.clone(), Some(v.clone())))
            .collect();

        points.push(StagedPoint { id, name, latitude, longitude, tags });
    }
    points
}
