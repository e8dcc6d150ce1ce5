//! Tile image rendering for building-orientation data.
//!
//! Three stages:
//! - `polar`: polar line chart of angle/count rows
//! - `compose`: border, label, and chart pasted onto the 256x256 tile canvas
//! - `png`: PNG serialization of the finished canvas

pub mod compose;
pub mod png;
pub mod polar;

pub use compose::{compose_tile, TILE_SIZE};
pub use png::encode_png;
pub use polar::{render_polar_chart, CHART_SIZE};
