use thiserror::Error;

/// Errors surfaced at the boundary of a fetch or render pass.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapError {
    /// Upstream query service answered with a non-success status or could not be reached.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// A record reached the pipeline with unusable coordinates.
    #[error("invalid record: {0}")]
    Data(String),

    /// Unknown mode label or a parameter outside its documented range.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type MapResult<T> = Result<T, MapError>;

impl MapError {
    pub(crate) fn config(msg: impl Into<String>) -> Self { Self::Config(msg.into()) }

    pub(crate) fn data(msg: impl Into<String>) -> Self { Self::Data(msg.into()) }

    #[cfg_attr(not(feature = "download"), allow(dead_code))]
    pub(crate) fn fetch(msg: impl Into<String>) -> Self { Self::Fetch(msg.into()) }
}
