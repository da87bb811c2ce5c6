use geo::Polygon;
use h3o::Resolution;
use log::debug;

use crate::error::MapResult;
use crate::geom::{buffer_polygon, hex_cell_ring};
use crate::layer::{
    Feature, FeatureCollection, FeatureGeometry, LayerData, LayerDescriptor, LayerKind, LayerStyle, Rgba,
    BUFFER_FILL, BUFFER_LINE, HEX_FILL, HEX_LINE, SCATTER_FILL,
};
use crate::mode::{ModeParameters, VisualizationMode};
use crate::record::PointRecord;

/// Scatter marker radius.
pub const SCATTER_RADIUS: f64 = 50.0;

/// Opacity of polygon overlays.
pub const POLYGON_OPACITY: f64 = 0.4;

/// Builds the mode-specific layer drawn over the scatter points.
pub trait OverlayBuilder {
    fn kind(&self) -> LayerKind;

    fn build(&self, records: &[PointRecord]) -> MapResult<LayerDescriptor>;
}

/// Validate the active mode's parameters and pick its overlay.
/// Parameters of the other modes are neither read nor validated.
pub fn overlay_for(mode: VisualizationMode, params: &ModeParameters) -> MapResult<Box<dyn OverlayBuilder>> {
    let overlay: Box<dyn OverlayBuilder> = match mode {
        VisualizationMode::Buffer => {
            params.buffer.validate()?;
            Box::new(BufferOverlay { radius_degrees: params.buffer.distance_degrees() })
        }
        VisualizationMode::HexBin => {
            Box::new(HexBinOverlay { resolution: params.hex.resolution()? })
        }
        VisualizationMode::Heatmap => {
            let heatmap = params.heatmap;
            heatmap.validate()?;
            Box::new(HeatmapOverlay {
                radius_pixels: heatmap.radius_pixels,
                intensity: heatmap.intensity,
                opacity: heatmap.opacity,
            })
        }
    };
    Ok(overlay)
}

/// One marker per record at its raw coordinate.
pub fn scatter_layer(records: &[PointRecord]) -> LayerDescriptor {
    LayerDescriptor::new(
        LayerKind::Scatter,
        LayerData::Points(records.to_vec()),
        LayerStyle {
            fill_color: Some(SCATTER_FILL),
            radius: Some(SCATTER_RADIUS),
            pickable: true,
            ..Default::default()
        },
    )
}

fn polygon_layer(kind: LayerKind, features: Vec<Feature>, fill: Rgba, line: Rgba) -> LayerDescriptor {
    LayerDescriptor::new(
        kind,
        LayerData::Features(FeatureCollection::new(features)),
        LayerStyle {
            fill_color: Some(fill),
            line_color: Some(line),
            opacity: Some(POLYGON_OPACITY),
            pickable: true,
            stroked: true,
            filled: true,
            ..Default::default()
        },
    )
}

/// Flat degree-space disk around each record.
#[derive(Debug, Clone, Copy)]
pub struct BufferOverlay {
    pub radius_degrees: f64,
}

impl OverlayBuilder for BufferOverlay {
    fn kind(&self) -> LayerKind { LayerKind::BufferPolygon }

    fn build(&self, records: &[PointRecord]) -> MapResult<LayerDescriptor> {
        let features = records.iter()
            .map(|record| {
                let polygon = buffer_polygon(record.coord(), self.radius_degrees)?;
                Ok(Feature::from_record(record, FeatureGeometry::Polygon(polygon)))
            })
            .collect::<MapResult<Vec<_>>>()?;

        debug!("[buffer] {} polygons, radius {:.6} deg", features.len(), self.radius_degrees);
        Ok(polygon_layer(self.kind(), features, BUFFER_FILL, BUFFER_LINE))
    }
}

/// Boundary of the grid cell holding each record.
/// Records sharing a cell each get their own (identical) polygon.
#[derive(Debug, Clone, Copy)]
pub struct HexBinOverlay {
    pub resolution: Resolution,
}

impl OverlayBuilder for HexBinOverlay {
    fn kind(&self) -> LayerKind { LayerKind::HexPolygon }

    fn build(&self, records: &[PointRecord]) -> MapResult<LayerDescriptor> {
        let features = records.iter()
            .map(|record| {
                let (_, ring) = hex_cell_ring(record.latitude, record.longitude, self.resolution)?;
                Ok(Feature::from_record(record, FeatureGeometry::Polygon(Polygon::new(ring, vec![]))))
            })
            .collect::<MapResult<Vec<_>>>()?;

        debug!("[h3] {} cells at resolution {}", features.len(), u8::from(self.resolution));
        Ok(polygon_layer(self.kind(), features, HEX_FILL, HEX_LINE))
    }
}

/// Density surface over the raw points, unit weight each.
#[derive(Debug, Clone, Copy)]
pub struct HeatmapOverlay {
    pub radius_pixels: u32,
    pub intensity: u32,
    pub opacity: f64,
}

impl OverlayBuilder for HeatmapOverlay {
    fn kind(&self) -> LayerKind { LayerKind::Heatmap }

    fn build(&self, records: &[PointRecord]) -> MapResult<LayerDescriptor> {
        Ok(LayerDescriptor::new(
            self.kind(),
            LayerData::Points(records.to_vec()),
            LayerStyle {
                opacity: Some(self.opacity),
                radius_pixels: Some(self.radius_pixels),
                intensity: Some(self.intensity),
                weight: Some(1.0),
                ..Default::default()
            },
        ))
    }
}
