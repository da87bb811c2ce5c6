//! Staging and read-back of fetched points.
//!
//! Raw upstream documents are staged untouched, a refresh materializes the points table
//! from them, and the pipeline reads points back through [`rows_to_records`], which is
//! where rows without usable coordinates are dropped.

mod local;
mod sql;

use anyhow::Result;
use log::warn;
use serde_json::Value;

use crate::record::{PointRecord, Tags};

pub use local::LocalWarehouse;
pub use sql::{SqlExecutor, SqlWarehouse, Statement, TableRef, WarehouseTables};

/// One row of the points table as returned by the read-back query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadRow {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Tags as JSON object text.
    pub tags: Option<String>,
}

/// Storage for staged points.
pub trait Warehouse {
    /// Empty the raw staging table.
    fn truncate_raw(&mut self) -> Result<()>;

    /// Stage one raw upstream document.
    fn insert_raw(&mut self, payload: &Value) -> Result<()>;

    /// Rebuild the points table from staged documents; returns the number of rows written.
    fn refresh(&mut self) -> Result<usize>;

    /// Read back points with usable coordinates.
    fn select_points(&mut self) -> Result<Vec<PointRecord>>;
}

/// Convert read-back rows into records, dropping rows without finite coordinates.
pub fn rows_to_records(rows: Vec<ReadRow>) -> Vec<PointRecord> {
    rows.into_iter()
        .filter_map(|row| {
            let (Some(latitude), Some(longitude)) = (row.latitude, row.longitude) else { return None };
            if !latitude.is_finite() || !longitude.is_finite() { return None }
            let tags = row.tags.as_deref().map(parse_tags).unwrap_or_default();
            Some(PointRecord { name: row.name, latitude, longitude, tags })
        })
        .collect()
}

/// Decode a tags object. Non-string values are kept as their JSON text.
fn parse_tags(text: &str) -> Tags {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map.into_iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::Null => None,
                    Value::String(s) => Some(s),
                    other => Some(other.to_string()),
                };
                (k, v)
            })
            .collect(),
        Ok(Value::Null) => Tags::new(),
        Ok(other) => {
            warn!("[warehouse] tags are not an object: {other}");
            Tags::new()
        }
        Err(e) => {
            warn!("[warehouse] unreadable tags {text:?}: {e}");
            Tags::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_without_coordinates_are_dropped() {
        let rows = vec![
            ReadRow { name: Some("a".into()), latitude: Some(-6.2), longitude: Some(106.8), tags: None },
            ReadRow { name: Some("b".into()), latitude: None, longitude: Some(106.8), tags: None },
            ReadRow { name: Some("c".into()), latitude: Some(f64::NAN), longitude: Some(106.8), tags: None },
            ReadRow { name: None, latitude: Some(-6.3), longitude: Some(106.9), tags: None },
        ];
        let records = rows_to_records(rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.as_deref(), Some("a"));
        assert!(records[1].name.is_none());
    }

    #[test]
    fn tags_are_decoded() {
        let tags = parse_tags(r#"{"amenity":"pharmacy","opening_hours":null,"level":1}"#);
        assert_eq!(tags.get("amenity"), Some(&Some("pharmacy".to_string())));
        assert_eq!(tags.get("opening_hours"), Some(&None));
        assert_eq!(tags.get("level"), Some(&Some("1".to_string())));
        assert!(parse_tags("not json").is_empty());
    }
}
