mod color;
mod feature;
mod layer;

pub use color::*;
pub use feature::{Feature, FeatureCollection, FeatureGeometry};
pub use layer::{LayerData, LayerDescriptor, LayerKind, LayerStyle};
