//! Common types shared across the orientation-tiles services.

pub mod error;
pub mod tile;

pub use error::{TileError, TileResult};
pub use tile::{AngleCountRow, TileCoord};
