use log::debug;

use crate::error::MapResult;
use crate::layer::LayerDescriptor;
use crate::mode::{ModeParameters, VisualizationMode};
use crate::pipeline::{filter_by_name, overlay_for, scatter_layer, ViewportState};
use crate::record::PointRecord;

/// Result of one render pass: layers in draw order plus the initial camera.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub layers: Vec<LayerDescriptor>,
    pub viewport: ViewportState,
}

/// Turn a record set into renderable layers for `mode`.
///
/// Every input record is checked before anything is built, so a bad coordinate fails the
/// whole pass. The output is `[scatter]` for an empty (filtered) set and `[scatter, overlay]`
/// otherwise; only the active mode's geometry is derived.
pub fn render(
    records: &[PointRecord],
    mode: VisualizationMode,
    params: &ModeParameters,
    search: Option<&str>,
) -> MapResult<RenderOutput> {
    for record in records {
        record.validate()?;
    }
    let overlay = overlay_for(mode, params)?;

    let filtered = filter_by_name(records, search);
    debug!("[render] mode={mode} records={} filtered={}", records.len(), filtered.len());

    let viewport = ViewportState::fit(&filtered);

    let mut layers = vec![scatter_layer(&filtered)];
    if !filtered.is_empty() {
        layers.push(overlay.build(&filtered)?);
    }

    Ok(RenderOutput { layers, viewport })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapError;
    use crate::layer::LayerKind;
    use crate::mode::HeatmapParams;

    #[test]
    fn empty_set_renders_scatter_only() {
        for mode in VisualizationMode::ALL {
            let out = render(&[], mode, &ModeParameters::default(), None).unwrap();
            assert_eq!(out.layers.len(), 1);
            assert_eq!(out.layers[0].kind, LayerKind::Scatter);
            assert_eq!(out.viewport, ViewportState::fit(&[]));
        }
    }

    #[test]
    fn one_overlay_per_mode() {
        let records = [PointRecord::new("Apotek", -6.2, 106.8)];
        let expected = [
            (VisualizationMode::Buffer, LayerKind::BufferPolygon),
            (VisualizationMode::HexBin, LayerKind::HexPolygon),
            (VisualizationMode::Heatmap, LayerKind::Heatmap),
        ];
        for (mode, kind) in expected {
            let out = render(&records, mode, &ModeParameters::default(), None).unwrap();
            let kinds: Vec<_> = out.layers.iter().map(|l| l.kind).collect();
            assert_eq!(kinds, [LayerKind::Scatter, kind]);
        }
    }

    #[test]
    fn non_finite_record_fails_pass() {
        let records = [PointRecord::new("ok", -6.2, 106.8), PointRecord::new("bad", f64::NAN, 106.8)];
        let err = render(&records, VisualizationMode::Heatmap, &ModeParameters::default(), Some("ok")).unwrap_err();
        assert!(matches!(err, MapError::Data(_)));
    }

    #[test]
    fn out_of_range_parameter_fails_even_when_empty() {
        let params = ModeParameters {
            heatmap: HeatmapParams { opacity: 1.5, ..Default::default() },
            ..Default::default()
        };
        let err = render(&[], VisualizationMode::Heatmap, &params, None).unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
    }

    #[test]
    fn filter_applies_before_viewport() {
        let records = [PointRecord::new("Apotek", -6.0, 106.0), PointRecord::new("Guardian", -7.0, 107.0)];
        let out = render(&records, VisualizationMode::Buffer, &ModeParameters::default(), Some("guard")).unwrap();
        assert_eq!((out.viewport.latitude, out.viewport.longitude), (-7.0, 107.0));
        assert_eq!(out.layers[0].data.len(), 1);
        assert_eq!(out.layers[1].data.len(), 1);
    }
}
