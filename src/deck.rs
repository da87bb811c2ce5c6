use serde_json::{json, Value};

use crate::layer::LayerDescriptor;
use crate::mode::MapStyle;
use crate::pipeline::{RenderOutput, ViewportState};

/// Tooltip shown when hovering a pickable feature.
pub const TOOLTIP_HTML: &str = "<b>Pharmacy Name:</b> {name}<b><br>Tags:</b> {tags}";

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub layers: Vec<LayerDescriptor>,
    pub view_state: ViewportState,
    pub map_style: MapStyle,
}

impl Deck {
    pub fn new(output: RenderOutput, map_style: MapStyle) -> Self {
        Self { layers: output.layers, view_state: output.viewport, map_style }
    }

    /// Declarative deck description.
    pub fn to_json(&self) -> Value {
        json!({
            "initialViewState": {
                "latitude": self.view_state.latitude,
                "longitude": self.view_state.longitude,
                "zoom": self.view_state.zoom,
                "pitch": self.view_state.pitch,
            },
            "layers": self.layers.iter().map(LayerDescriptor::to_json).collect::<Vec<_>>(),
            "mapStyle": self.map_style.url(),
            "tooltip": {
                "html": TOOLTIP_HTML,
                "style": { "backgroundColor": "steelblue", "color": "white" },
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{ModeParameters, VisualizationMode};
    use crate::pipeline::render;
    use crate::record::PointRecord;

    #[test]
    fn deck_json_shape() {
        let records = [PointRecord::new("Apotek", -6.2, 106.8)];
        let output = render(&records, VisualizationMode::HexBin, &ModeParameters::default(), None).unwrap();
        let value = Deck::new(output, MapStyle::Dark).to_json();

        assert_eq!(value["mapStyle"], "mapbox://styles/mapbox/dark-v10");
        assert_eq!(value["initialViewState"]["zoom"], 14.0);
        assert_eq!(value["initialViewState"]["pitch"], 0.0);
        assert_eq!(value["layers"].as_array().unwrap().len(), 2);
        assert_eq!(value["layers"][1]["@@type"], "GeoJsonLayer");
        assert_eq!(value["tooltip"]["html"], TOOLTIP_HTML);
    }
}
