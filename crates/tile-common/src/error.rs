//! Error types for the tile rendering pipeline.

use thiserror::Error;

/// Result type alias using TileError.
pub type TileResult<T> = Result<T, TileError>;

/// Primary error type for tile requests.
///
/// Every stage of the pipeline maps into one of these variants; the HTTP
/// boundary collapses all of them into a single opaque 404 response while
/// logging the original detail.
#[derive(Debug, Error)]
pub enum TileError {
    #[error("Invalid tile path: {0}")]
    PathParse(String),

    #[error("Aggregate query failed: {0}")]
    Query(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

impl TileError {
    /// Short error kind label for structured logging.
    pub fn kind(&self) -> &'static str {
        match self {
            TileError::PathParse(_) => "path_parse",
            TileError::Query(_) => "query",
            TileError::Render(_) => "render",
            TileError::Encode(_) => "encode",
        }
    }
}
