use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use polars::{
    frame::DataFrame,
    io::{SerReader, SerWriter},
    prelude::{Column, DataType, JsonWriter},
};
use serde_json::Value;

use crate::common::{ensure_dir_exists, write_atomic};
use crate::fetch::{extract_points, OverpassResponse, StagedPoint};
use crate::record::PointRecord;
use crate::warehouse::{rows_to_records, ReadRow, Warehouse};

/// Staged raw documents, stored as a JSON array.
pub const RAW_FILE: &str = "tb_apt_raw.json";

/// Materialized points table, stored as JSON lines.
pub const POINTS_FILE: &str = "tb_apt.jsonl";

/// Directory-backed [`Warehouse`].
#[derive(Debug, Clone)]
pub struct LocalWarehouse {
    dir: PathBuf,
}

impl LocalWarehouse {
    /// Open (creating if needed) a warehouse rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        ensure_dir_exists(&dir)?;
        Ok(Self { dir })
    }

    #[inline] pub fn dir(&self) -> &Path { &self.dir }

    fn raw_path(&self) -> PathBuf { self.dir.join(RAW_FILE) }

    fn points_path(&self) -> PathBuf { self.dir.join(POINTS_FILE) }

    /// Staged raw documents, oldest first.
    pub fn raw_documents(&self) -> Result<Vec<Value>> {
        let path = self.raw_path();
        if !path.exists() { return Ok(Vec::new()) }
        let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn write_raw_documents(&self, docs: &[Value]) -> Result<()> {
        let bytes = serde_json::to_vec(docs).context("Failed to serialize raw documents")?;
        write_atomic(&self.raw_path(), &bytes)
    }
}

impl Warehouse for LocalWarehouse {
    fn truncate_raw(&mut self) -> Result<()> {
        self.write_raw_documents(&[])
    }

    fn insert_raw(&mut self, payload: &Value) -> Result<()> {
        let mut docs = self.raw_documents()?;
        docs.push(payload.clone());
        self.write_raw_documents(&docs)?;
        info!("[stage] {} raw document(s) in {}", docs.len(), self.raw_path().display());
        Ok(())
    }

    fn refresh(&mut self) -> Result<usize> {
        let mut points = Vec::new();
        for (idx, doc) in self.raw_documents()?.into_iter().enumerate() {
            let response: OverpassResponse = serde_json::from_value(doc)
                .with_context(|| format!("Staged document {idx} is not an Overpass response"))?;
            points.extend(extract_points(&response));
        }

        let mut df = points_frame(&points)?;
        let mut out = Vec::new();
        JsonWriter::new(&mut out)
            .with_json_format(polars::io::json::JsonFormat::JsonLines)
            .finish(&mut df)?;
        write_atomic(&self.points_path(), &out)?;

        info!("[refresh] {} points -> {}", points.len(), self.points_path().display());
        Ok(points.len())
    }

    fn select_points(&mut self) -> Result<Vec<PointRecord>> {
        let path = self.points_path();
        if !path.exists() { return Ok(Vec::new()) }
        let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) { return Ok(Vec::new()) }

        let df = polars::io::json::JsonReader::new(Cursor::new(bytes))
            .with_json_format(polars::io::json::JsonFormat::JsonLines)
            .finish()
            .with_context(|| format!("Failed to read points table {}", path.display()))?;

        let rows = read_rows(&df)?;
        debug!("[select] {} of {} rows have coordinates", rows.len(), df.height());
        Ok(rows_to_records(rows))
    }
}

/// Points table columns: id, name, latitude, longitude, tags (JSON text), geo (WKT).
fn points_frame(points: &[StagedPoint]) -> Result<DataFrame> {
    let ids: Vec<i64> = points.iter().map(|p| p.id).collect();
    let names: Vec<String> = points.iter().map(|p| p.name.clone()).collect();
    let lats: Vec<f64> = points.iter().map(|p| p.latitude).collect();
    let lons: Vec<f64> = points.iter().map(|p| p.longitude).collect();
    let tags = points.iter()
        .map(|p| serde_json::to_string(&p.tags))
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to serialize tags")?;
    let geo: Vec<String> = points.iter().map(StagedPoint::wkt).collect();

    Ok(DataFrame::new(vec![
        Column::new("id".into(), ids),
        Column::new("name".into(), names),
        Column::new("latitude".into(), lats),
        Column::new("longitude".into(), lons),
        Column::new("tags".into(), tags),
        Column::new("geo".into(), geo),
    ])?)
}

/// Rows with both coordinates present, i.e. `WHERE latitude IS NOT NULL AND longitude IS NOT NULL`.
fn read_rows(df: &DataFrame) -> Result<Vec<ReadRow>> {
    let lat = df.column("latitude")?.cast(&DataType::Float64)?;
    let lon = df.column("longitude")?.cast(&DataType::Float64)?;
    let mask = lat.is_not_null() & lon.is_not_null();
    let df = df.filter(&mask)?;

    let names = df.column("name")?.cast(&DataType::String)?;
    let names = names.str()?;
    let lats = df.column("latitude")?.cast(&DataType::Float64)?;
    let lats = lats.f64()?;
    let lons = df.column("longitude")?.cast(&DataType::Float64)?;
    let lons = lons.f64()?;
    let tags = match df.column("tags") {
        Ok(col) => Some(col.cast(&DataType::String)?),
        Err(_) => None,
    };
    let tags = tags.as_ref().map(|col| col.str()).transpose()?;

    Ok((0..df.height())
        .map(|i| ReadRow {
            name: names.get(i).map(str::to_string),
            latitude: lats.get(i),
            longitude: lons.get(i),
            tags: tags.and_then(|t| t.get(i)).map(str::to_string),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response() -> Value {
        json!({
            "elements": [
                {"type": "node", "id": 1, "lat": -6.2, "lon": 106.8, "tags": {"amenity": "pharmacy", "name": "Apotek Kimia Farma"}},
                {"type": "way", "id": 2, "center": {"lat": -6.3, "lon": 106.9}, "tags": {"name": "Guardian Pharmacy"}},
                {"type": "relation", "id": 3, "tags": {"name": "Nowhere"}}
            ]
        })
    }

    #[test]
    fn stage_refresh_select() {
        let dir = tempfile::tempdir().unwrap();
        let mut warehouse = LocalWarehouse::open(dir.path().join("wh")).unwrap();

        warehouse.truncate_raw().unwrap();
        warehouse.insert_raw(&response()).unwrap();
        assert_eq!(warehouse.refresh().unwrap(), 2);

        let points = warehouse.select_points().unwrap();
        let names: Vec<_> = points.iter().map(|p| p.name.as_deref()).collect();
        assert_eq!(names, [Some("Apotek Kimia Farma"), Some("Guardian Pharmacy")]);
        assert_eq!((points[1].latitude, points[1].longitude), (-6.3, 106.9));
        assert_eq!(points[0].tags.get("amenity"), Some(&Some("pharmacy".to_string())));
    }

    #[test]
    fn truncate_clears_staged_documents() {
        let dir = tempfile::tempdir().unwrap();
        let mut warehouse = LocalWarehouse::open(dir.path()).unwrap();

        warehouse.insert_raw(&response()).unwrap();
        warehouse.insert_raw(&response()).unwrap();
        assert_eq!(warehouse.raw_documents().unwrap().len(), 2);

        warehouse.truncate_raw().unwrap();
        assert!(warehouse.raw_documents().unwrap().is_empty());
        assert_eq!(warehouse.refresh().unwrap(), 0);
        assert!(warehouse.select_points().unwrap().is_empty());
    }

    #[test]
    fn coordinates_survive_stage_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut warehouse = LocalWarehouse::open(dir.path()).unwrap();
        let payload: Value = serde_json::from_str(
            r#"{"elements": [{"type": "node", "id": 7, "lat": -6.200000000000001, "lon": 106.80000000000001}]}"#,
        ).unwrap();

        warehouse.insert_raw(&payload).unwrap();
        warehouse.refresh().unwrap();
        let points = warehouse.select_points().unwrap();
        assert_eq!(points[0].latitude, "-6.200000000000001".parse::<f64>().unwrap());
        assert_eq!(points[0].longitude, "106.80000000000001".parse::<f64>().unwrap());
    }

    #[test]
    fn select_before_refresh_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut warehouse = LocalWarehouse::open(dir.path()).unwrap();
        assert!(warehouse.select_points().unwrap().is_empty());
    }

    #[test]
    fn null_coordinates_are_excluded_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut warehouse = LocalWarehouse::open(dir.path()).unwrap();
        fs::write(
            dir.path().join(POINTS_FILE),
            concat!(
                r#"{"id":1,"name":"a","latitude":-6.2,"longitude":106.8,"tags":"{}","geo":"POINT(106.8 -6.2)"}"#, "\n",
                r#"{"id":2,"name":"b","latitude":null,"longitude":106.8,"tags":"{}","geo":null}"#, "\n",
            ),
        ).unwrap();

        let points = warehouse.select_points().unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].name.as_deref(), Some("a"));
    }
}
