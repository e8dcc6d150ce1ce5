//! Tile coordinates and per-tile aggregate rows.

use serde::{Deserialize, Serialize};

/// A tile coordinate (zoom/x/y) in the standard tile pyramid.
///
/// Coordinates are treated as opaque keys into the aggregate store; no
/// range validation against the zoom level is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level
    pub zoom: u32,
    /// Column (x)
    pub x: i64,
    /// Row (y)
    pub y: i64,
}

impl TileCoord {
    pub fn new(zoom: u32, x: i64, y: i64) -> Self {
        Self { zoom, x, y }
    }

    /// The "zoom/x/y" form used in tile labels and log messages.
    pub fn path_key(&self) -> String {
        format!("{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// One aggregate row: the number of building-facade segments observed at a
/// given compass angle within a tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleCountRow {
    /// Compass angle in degrees. Stored as-is; values outside [0, 360) are
    /// plotted without wraparound normalization.
    pub angle: f64,
    /// Observation count, >= 0.
    pub count: i64,
}

impl AngleCountRow {
    pub fn new(angle: f64, count: i64) -> Self {
        Self { angle, count }
    }
}
