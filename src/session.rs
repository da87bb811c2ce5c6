use log::{debug, warn};

use crate::deck::Deck;
use crate::error::MapResult;
use crate::mode::{BufferParams, HeatmapParams, HexBinParams, MapStyle, ModeParameters, VisualizationMode};
use crate::pipeline::render;
use crate::record::PointRecord;

/// Raw control values as entered by the user, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub mode: String,
    pub map_style: String,
    pub search: String,
    pub buffer_meters: f64,
    pub hex_resolution: u8,
    pub heatmap_radius: u32,
    pub heatmap_intensity: u32,
    pub heatmap_opacity: f64,
}

impl Default for Controls {
    fn default() -> Self {
        let params = ModeParameters::default();
        Self {
            mode: VisualizationMode::Buffer.label().to_string(),
            map_style: MapStyle::default().url().to_string(),
            search: String::new(),
            buffer_meters: params.buffer.distance_meters,
            hex_resolution: params.hex.resolution,
            heatmap_radius: params.heatmap.radius_pixels,
            heatmap_intensity: params.heatmap.intensity,
            heatmap_opacity: params.heatmap.opacity,
        }
    }
}

impl Controls {
    pub fn mode(&self) -> MapResult<VisualizationMode> { self.mode.parse() }

    pub fn map_style(&self) -> MapResult<MapStyle> { self.map_style.parse() }

    pub fn parameters(&self) -> ModeParameters {
        ModeParameters {
            buffer: BufferParams { distance_meters: self.buffer_meters },
            hex: HexBinParams { resolution: self.hex_resolution },
            heatmap: HeatmapParams {
                radius_pixels: self.heatmap_radius,
                intensity: self.heatmap_intensity,
                opacity: self.heatmap_opacity,
            },
        }
    }

    pub fn search(&self) -> Option<&str> {
        Some(self.search.as_str()).filter(|s| !s.is_empty())
    }
}

/// Holds the last successfully rendered deck across control changes.
///
/// The host calls [`MapSession::render_pass`] whenever an input changes. A failed pass
/// returns its error and leaves the previous deck current.
#[derive(Debug, Default)]
pub struct MapSession {
    current: Option<Deck>,
    total_records: usize,
    passes: u64,
}

impl MapSession {
    pub fn new() -> Self { Self::default() }

    /// Deck from the most recent successful pass.
    #[inline] pub fn current(&self) -> Option<&Deck> { self.current.as_ref() }

    /// Size of the unfiltered record set given to the most recent pass.
    #[inline] pub fn total_records(&self) -> usize { self.total_records }

    /// Number of passes attempted, failed ones included.
    #[inline] pub fn passes(&self) -> u64 { self.passes }

    pub fn render_pass(&mut self, records: &[PointRecord], controls: &Controls) -> MapResult<&Deck> {
        self.passes += 1;
        self.total_records = records.len();

        match Self::build(records, controls) {
            Ok(deck) => {
                debug!("[session] pass {} ok, {} layers", self.passes, deck.layers.len());
                Ok(self.current.insert(deck))
            }
            Err(e) => {
                warn!("[session] pass {} failed: {e}", self.passes);
                Err(e)
            }
        }
    }

    fn build(records: &[PointRecord], controls: &Controls) -> MapResult<Deck> {
        let mode = controls.mode()?;
        let map_style = controls.map_style()?;
        let output = render(records, mode, &controls.parameters(), controls.search())?;
        Ok(Deck::new(output, map_style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapError;

    fn records() -> Vec<PointRecord> {
        vec![PointRecord::new("Apotek Kimia Farma", -6.2, 106.8), PointRecord::new("Guardian Pharmacy", -6.3, 106.9)]
    }

    #[test]
    fn failed_pass_keeps_previous_deck() {
        let mut session = MapSession::new();
        let first = session.render_pass(&records(), &Controls::default()).unwrap().clone();

        let bad = Controls { mode: "Choropleth".into(), ..Default::default() };
        let err = session.render_pass(&records(), &bad).unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
        assert_eq!(session.current(), Some(&first));
        assert_eq!(session.passes(), 2);
    }

    #[test]
    fn unknown_mode_produces_no_deck() {
        let mut session = MapSession::new();
        let bad = Controls { mode: "Voronoi".into(), ..Default::default() };
        assert!(session.render_pass(&records(), &bad).is_err());
        assert!(session.current().is_none());
    }

    #[test]
    fn total_records_ignores_search() {
        let mut session = MapSession::new();
        let controls = Controls { search: "guardian".into(), ..Default::default() };
        let deck = session.render_pass(&records(), &controls).unwrap();
        assert_eq!(deck.layers[0].data.len(), 1);
        assert_eq!(session.total_records(), 2);
    }

    #[test]
    fn bad_map_style_is_config_error() {
        let mut session = MapSession::new();
        let bad = Controls { map_style: "mapbox://styles/mapbox/neon".into(), ..Default::default() };
        assert!(matches!(session.render_pass(&records(), &bad), Err(MapError::Config(_))));
    }
}
