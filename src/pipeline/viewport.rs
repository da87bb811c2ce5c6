use serde::Serialize;

use crate::record::PointRecord;

/// Center used when there is nothing to show (central Jakarta).
pub const FALLBACK_LATITUDE: f64 = -6.2088;
pub const FALLBACK_LONGITUDE: f64 = 106.8456;

pub const EMPTY_ZOOM: f64 = 5.0;
pub const SMALL_SET_ZOOM: f64 = 14.0;
pub const DEFAULT_ZOOM: f64 = 12.0;

/// Record count at or below which the view zooms in close.
pub const SMALL_SET_MAX: usize = 10;

/// Initial camera for the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

impl ViewportState {
    /// Center on the mean coordinate of `records`, or the fallback center when empty.
    pub fn fit(records: &[PointRecord]) -> Self {
        if records.is_empty() {
            return Self { latitude: FALLBACK_LATITUDE, longitude: FALLBACK_LONGITUDE, zoom: EMPTY_ZOOM, pitch: 0.0 };
        }

        let n = records.len() as f64;
        let latitude = records.iter().map(|r| r.latitude).sum::<f64>() / n;
        let longitude = records.iter().map(|r| r.longitude).sum::<f64>() / n;
        let zoom = if records.len() <= SMALL_SET_MAX { SMALL_SET_ZOOM } else { DEFAULT_ZOOM };

        Self { latitude, longitude, zoom, pitch: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_uses_fallback() {
        let view = ViewportState::fit(&[]);
        assert_eq!((view.latitude, view.longitude, view.zoom), (FALLBACK_LATITUDE, FALLBACK_LONGITUDE, EMPTY_ZOOM));
    }

    #[test]
    fn center_is_mean() {
        let records = [PointRecord::new("a", -6.0, 106.0), PointRecord::new("b", -6.4, 107.0)];
        let view = ViewportState::fit(&records);
        assert!((view.latitude + 6.2).abs() < 1e-12);
        assert!((view.longitude - 106.5).abs() < 1e-12);
        assert_eq!(view.zoom, SMALL_SET_ZOOM);
        assert_eq!(view.pitch, 0.0);
    }

    #[test]
    fn zoom_threshold() {
        let ten: Vec<_> = (0..10).map(|i| PointRecord::new(format!("p{i}"), -6.2, 106.8)).collect();
        assert_eq!(ViewportState::fit(&ten).zoom, SMALL_SET_ZOOM);

        let eleven: Vec<_> = (0..11).map(|i| PointRecord::new(format!("p{i}"), -6.2, 106.8)).collect();
        assert_eq!(ViewportState::fit(&eleven).zoom, DEFAULT_ZOOM);
    }
}
