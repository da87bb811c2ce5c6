use std::collections::BTreeMap;

use geo::Coord;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{MapError, MapResult};

/// Free-form key/value tags attached to a point, e.g. OpenStreetMap tags.
/// Ordered so that serialized output is stable between render passes.
pub type Tags = BTreeMap<String, Option<String>>;

/// A single point of interest as read back from the warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub tags: Tags,
}

impl PointRecord {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self { name: Some(name.into()), latitude, longitude, tags: Tags::new() }
    }

    /// Attach tags, replacing any existing ones.
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Position as a planar coordinate (`x = longitude`, `y = latitude`).
    #[inline]
    pub fn coord(&self) -> Coord<f64> { Coord { x: self.longitude, y: self.latitude } }

    /// Fail with a data error unless both coordinates are finite and in range.
    pub fn validate(&self) -> MapResult<()> {
        let label = self.name.as_deref().unwrap_or("<unnamed>");
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(MapError::data(format!(
                "non-finite coordinate for {label}: ({}, {})", self.latitude, self.longitude
            )));
        }
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(MapError::data(format!(
                "coordinate out of range for {label}: ({}, {})", self.latitude, self.longitude
            )));
        }
        Ok(())
    }

    /// Tags as JSON object text, the form tooltips interpolate.
    pub fn tags_text(&self) -> String { tags_text(&self.tags) }

    /// Case-insensitive substring match on the name. `needle` must already be lowercase.
    /// Records without a name never match.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.as_deref()
            .is_some_and(|name| name.to_lowercase().contains(needle))
    }
}

/// Serialize tags to JSON object text.
pub fn tags_text(tags: &Tags) -> String { json!(tags).to_string() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_non_finite() {
        let record = PointRecord::new("Apotek", f64::NAN, 106.8);
        assert!(matches!(record.validate(), Err(MapError::Data(_))));

        let record = PointRecord::new("Apotek", -6.2, f64::INFINITY);
        assert!(matches!(record.validate(), Err(MapError::Data(_))));
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let record = PointRecord::new("Apotek", 91.0, 106.8);
        assert!(matches!(record.validate(), Err(MapError::Data(_))));
        assert!(PointRecord::new("Apotek", -6.2, 106.8).validate().is_ok());
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let record = PointRecord::new("Apotek Kimia Farma", -6.2, 106.8);
        assert!(record.name_contains("farma"));
        assert!(record.name_contains("kimia f"));
        assert!(!record.name_contains("guardian"));
    }

    #[test]
    fn tags_text_is_json_object() {
        let record = PointRecord::new("Apotek", -6.2, 106.8)
            .with_tags(Tags::from([("amenity".into(), Some("pharmacy".into())), ("level".into(), None)]));
        assert_eq!(record.tags_text(), r#"{"amenity":"pharmacy","level":null}"#);
        assert_eq!(PointRecord::new("a", 0.0, 0.0).tags_text(), "{}");
    }

    #[test]
    fn unnamed_record_never_matches() {
        let record = PointRecord { name: None, latitude: 0.0, longitude: 0.0, tags: Tags::new() };
        assert!(!record.name_contains("a"));
    }
}
