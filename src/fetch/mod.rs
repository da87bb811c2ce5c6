#[cfg(feature = "download")]
mod client;
mod overpass;

#[cfg(feature = "download")]
pub use client::OverpassClient;
pub use overpass::*;
