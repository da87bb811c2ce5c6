//! Fixed colors used by the rendered layers.

use serde::{Serialize, Serializer, Deserialize, Deserializer};

/// RGBA color, serialized as `[r, g, b, a]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self { Self { r, g, b, a } }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self { Self::new(r, g, b, 255) }

    pub fn to_array(self) -> [u8; 4] { [self.r, self.g, self.b, self.a] }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [r, g, b, a] = <[u8; 4]>::deserialize(deserializer)?;
        Ok(Self { r, g, b, a })
    }
}

/// Point markers.
pub const SCATTER_FILL: Rgba = Rgba::new(0, 0, 255, 200);

/// Buffer zones.
pub const BUFFER_FILL: Rgba = Rgba::new(255, 0, 0, 100);
pub const BUFFER_LINE: Rgba = Rgba::opaque(255, 0, 0);

/// Hexagon cells.
pub const HEX_FILL: Rgba = Rgba::new(0, 128, 255, 100);
pub const HEX_LINE: Rgba = Rgba::opaque(0, 128, 255);
