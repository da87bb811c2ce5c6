use std::fmt;
use std::str::FromStr;

use h3o::Resolution;
use serde::{Deserialize, Serialize};

use crate::error::{MapError, MapResult};

/// Meters spanned by one degree, used for the flat buffer conversion.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Selects which overlay is derived from the points on a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualizationMode {
    Buffer,
    HexBin,
    Heatmap,
}

impl VisualizationMode {
    pub const ALL: [VisualizationMode; 3] = [Self::Buffer, Self::HexBin, Self::Heatmap];

    /// Label shown in the mode selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Buffer => "Buffer",
            Self::HexBin => "H3 Hexagons",
            Self::Heatmap => "Heatmap",
        }
    }
}

impl fmt::Display for VisualizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VisualizationMode {
    type Err = MapError;

    fn from_str(s: &str) -> MapResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buffer" => Ok(Self::Buffer),
            "h3 hexagons" | "hexbin" | "h3" => Ok(Self::HexBin),
            "heatmap" => Ok(Self::Heatmap),
            _ => Err(MapError::config(format!("unknown visualization mode: {s:?}"))),
        }
    }
}

/// Buffer circle radius, entered in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferParams {
    pub distance_meters: f64,
}

impl BufferParams {
    pub const MIN_METERS: f64 = 100.0;
    pub const MAX_METERS: f64 = 1000.0;
    pub const STEP_METERS: f64 = 50.0;

    pub fn validate(&self) -> MapResult<()> {
        let m = self.distance_meters;
        if !m.is_finite() || !(Self::MIN_METERS..=Self::MAX_METERS).contains(&m) {
            return Err(MapError::config(format!(
                "buffer distance {m} m outside {}..={} m", Self::MIN_METERS, Self::MAX_METERS
            )));
        }
        if (m / Self::STEP_METERS).fract() != 0.0 {
            return Err(MapError::config(format!(
                "buffer distance {m} m is not a multiple of {} m", Self::STEP_METERS
            )));
        }
        Ok(())
    }

    /// Radius in degrees (flat conversion).
    #[inline]
    pub fn distance_degrees(&self) -> f64 { self.distance_meters / METERS_PER_DEGREE }
}

impl Default for BufferParams {
    fn default() -> Self { Self { distance_meters: 500.0 } }
}

/// Hexagonal grid resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexBinParams {
    pub resolution: u8,
}

impl HexBinParams {
    pub const RESOLUTIONS: [u8; 4] = [6, 7, 8, 9];

    /// Validated grid resolution.
    pub fn resolution(&self) -> MapResult<Resolution> {
        if !Self::RESOLUTIONS.contains(&self.resolution) {
            return Err(MapError::config(format!(
                "hex resolution {} not one of {:?}", self.resolution, Self::RESOLUTIONS
            )));
        }
        Resolution::try_from(self.resolution)
            .map_err(|e| MapError::config(format!("hex resolution {}: {e}", self.resolution)))
    }
}

impl Default for HexBinParams {
    fn default() -> Self { Self { resolution: 7 } }
}

/// Heatmap kernel settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapParams {
    pub radius_pixels: u32,
    pub intensity: u32,
    pub opacity: f64,
}

impl HeatmapParams {
    pub fn validate(&self) -> MapResult<()> {
        if !(10..=100).contains(&self.radius_pixels) {
            return Err(MapError::config(format!("heatmap radius {} outside 10..=100", self.radius_pixels)));
        }
        if !(1..=10).contains(&self.intensity) {
            return Err(MapError::config(format!("heatmap intensity {} outside 1..=10", self.intensity)));
        }
        if !self.opacity.is_finite() || !(0.1..=1.0).contains(&self.opacity) {
            return Err(MapError::config(format!("heatmap opacity {} outside 0.1..=1.0", self.opacity)));
        }
        Ok(())
    }
}

impl Default for HeatmapParams {
    fn default() -> Self { Self { radius_pixels: 50, intensity: 5, opacity: 0.5 } }
}

/// Current value of every mode-specific control.
/// Only the block belonging to the active mode is validated and read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeParameters {
    pub buffer: BufferParams,
    pub hex: HexBinParams,
    pub heatmap: HeatmapParams,
}

/// Basemap selection passed straight through to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapStyle {
    #[default]
    Streets,
    Satellite,
    Dark,
    Light,
}

impl MapStyle {
    pub const ALL: [MapStyle; 4] = [Self::Streets, Self::Satellite, Self::Dark, Self::Light];

    /// Short name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Streets => "streets",
            Self::Satellite => "satellite",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn url(self) -> &'static str {
        match self {
            Self::Streets => "mapbox://styles/mapbox/streets-v11",
            Self::Satellite => "mapbox://styles/mapbox/satellite-v9",
            Self::Dark => "mapbox://styles/mapbox/dark-v10",
            Self::Light => "mapbox://styles/mapbox/light-v9",
        }
    }
}

impl FromStr for MapStyle {
    type Err = MapError;

    /// Accepts either the short name or the full style URL.
    fn from_str(s: &str) -> MapResult<Self> {
        let s = s.trim();
        Self::ALL.into_iter()
            .find(|style| style.url() == s || style.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MapError::config(format!("unknown map style: {s:?}")))
    }
}
