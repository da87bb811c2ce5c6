mod filter;
mod overlay;
mod render;
mod viewport;

pub use filter::filter_by_name;
pub use overlay::{
    overlay_for, scatter_layer, BufferOverlay, HeatmapOverlay, HexBinOverlay, OverlayBuilder,
    POLYGON_OPACITY, SCATTER_RADIUS,
};
pub use render::{render, RenderOutput};
pub use viewport::*;
