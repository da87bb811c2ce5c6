#![doc = "poimap public API"]
mod common;
mod deck;
mod error;
mod layer;
mod mode;
mod record;
mod session;

pub mod fetch;
pub mod geom;
pub mod pipeline;
pub mod warehouse;

#[doc(inline)]
pub use error::{MapError, MapResult};

#[doc(inline)]
pub use record::{PointRecord, Tags};

#[doc(inline)]
pub use mode::{BufferParams, HeatmapParams, HexBinParams, MapStyle, ModeParameters, VisualizationMode, METERS_PER_DEGREE};

#[doc(inline)]
pub use geom::{buffer_polygon, buffer_ring, hex_cell, hex_cell_ring};

#[doc(inline)]
pub use layer::{Feature, FeatureCollection, FeatureGeometry, LayerData, LayerDescriptor, LayerKind, LayerStyle, Rgba};

#[doc(inline)]
pub use pipeline::{render, RenderOutput, ViewportState};

#[doc(inline)]
pub use deck::{Deck, TOOLTIP_HTML};

#[doc(inline)]
pub use session::{Controls, MapSession};
