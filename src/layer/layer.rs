use serde_json::{json, Value};

use crate::layer::{FeatureCollection, Rgba};
use crate::record::PointRecord;

/// Visual encoding of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Scatter,
    BufferPolygon,
    HexPolygon,
    Heatmap,
}

impl LayerKind {
    /// Layer class name understood by the renderer.
    pub fn renderer_type(self) -> &'static str {
        match self {
            Self::Scatter => "ScatterplotLayer",
            Self::BufferPolygon | Self::HexPolygon => "GeoJsonLayer",
            Self::Heatmap => "HeatmapLayer",
        }
    }

    /// Stable layer id.
    pub fn id(self) -> &'static str {
        match self {
            Self::Scatter => "scatter",
            Self::BufferPolygon => "buffer",
            Self::HexPolygon => "h3",
            Self::Heatmap => "heatmap",
        }
    }
}

/// Data a layer is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerData {
    Points(Vec<PointRecord>),
    Features(FeatureCollection),
}

impl LayerData {
    pub fn len(&self) -> usize {
        match self {
            Self::Points(points) => points.len(),
            Self::Features(features) => features.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    fn to_json(&self) -> Value {
        match self {
            Self::Points(points) => Value::Array(points.iter().map(|p| json!({
                "name": p.name,
                "latitude": p.latitude,
                "longitude": p.longitude,
                "tags": p.tags_text(),
            })).collect()),
            Self::Features(features) => features.to_geojson(),
        }
    }
}

/// Style attributes; `None` fields are not emitted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerStyle {
    pub fill_color: Option<Rgba>,
    pub line_color: Option<Rgba>,
    pub opacity: Option<f64>,
    pub radius: Option<f64>,
    pub radius_pixels: Option<u32>,
    pub intensity: Option<u32>,
    pub weight: Option<f64>,
    pub pickable: bool,
    pub stroked: bool,
    pub filled: bool,
}

/// A named layer bound to its data, ready to hand to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDescriptor {
    pub kind: LayerKind,
    pub data: LayerData,
    pub style: LayerStyle,
}

impl LayerDescriptor {
    pub fn new(kind: LayerKind, data: LayerData, style: LayerStyle) -> Self {
        Self { kind, data, style }
    }

    #[inline] pub fn id(&self) -> &'static str { self.kind.id() }

    /// Declarative layer description, keyed the way deck.gl layer props are.
    pub fn to_json(&self) -> Value {
        let mut layer = serde_json::Map::new();
        layer.insert("@@type".into(), json!(self.kind.renderer_type()));
        layer.insert("id".into(), json!(self.id()));
        layer.insert("data".into(), self.data.to_json());

        if matches!(self.data, LayerData::Points(_)) {
            layer.insert("getPosition".into(), json!("@@=[longitude, latitude]"));
        }

        let style = &self.style;
        let optional = [
            ("getFillColor", style.fill_color.map(|c| json!(c))),
            ("getLineColor", style.line_color.map(|c| json!(c))),
            ("opacity", style.opacity.map(|v| json!(v))),
            ("getRadius", style.radius.map(|v| json!(v))),
            ("radiusPixels", style.radius_pixels.map(|v| json!(v))),
            ("intensity", style.intensity.map(|v| json!(v))),
            ("getWeight", style.weight.map(|v| json!(v))),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                layer.insert(key.into(), value);
            }
        }

        layer.insert("pickable".into(), json!(style.pickable));
        if matches!(self.data, LayerData::Features(_)) {
            layer.insert("stroked".into(), json!(style.stroked));
            layer.insert("filled".into(), json!(style.filled));
        }

        Value::Object(layer)
    }
}
