mod buffer;
mod hex;

pub use buffer::{buffer_polygon, buffer_ring, BUFFER_QUADRANT_SEGMENTS};
pub use hex::{hex_cell, hex_cell_ring};
