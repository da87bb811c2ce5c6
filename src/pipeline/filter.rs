use crate::record::PointRecord;

/// Records whose name contains `search` (case-insensitive).
/// An absent or empty search keeps every record; unnamed records are dropped by a non-empty search.
pub fn filter_by_name(records: &[PointRecord], search: Option<&str>) -> Vec<PointRecord> {
    match search.filter(|s| !s.is_empty()) {
        None => records.to_vec(),
        Some(search) => {
            let needle = search.to_lowercase();
            records.iter()
                .filter(|record| record.name_contains(&needle))
                .cloned()
                .collect()
        }
    }
}
