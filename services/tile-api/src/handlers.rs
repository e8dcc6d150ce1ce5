//! HTTP request handlers for the tile endpoint and health checks.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;

use renderer::{compose_tile, encode_png, render_polar_chart, TILE_SIZE};
use tile_common::{TileCoord, TileError, TileResult};

use crate::state::AppState;

/// GET /health - Basic health check
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /ready - Readiness check (verifies store connectivity)
pub async fn ready_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    match state.store.aggregate(TileCoord::new(0, 0, 0)).await {
        Ok(_) => (StatusCode::OK, "Ready"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "Not ready"),
    }
}

/// GET /{zoom}/{x}/{y}.{ext} - Render one tile.
///
/// Any failure along the pipeline collapses to an opaque 404; the original
/// error is logged with its kind so operators can tell a malformed path
/// from a storage fault.
pub async fn tile_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((zoom, x, y)): Path<(String, String, String)>,
) -> Response {
    match render_tile(&state, &zoom, &x, &y).await {
        Ok(png) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "image/png")
            .body(Body::from(png))
            .unwrap(),
        Err(err) => {
            error!(kind = err.kind(), error = %err, "tile request failed");
            not_found()
        }
    }
}

fn not_found() -> Response {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("Not found"))
        .unwrap()
}

/// Parse path segments into a tile coordinate. The file extension on the
/// y segment is split off and discarded without validation.
fn parse_coord(zoom: &str, x: &str, y: &str) -> TileResult<TileCoord> {
    let (y, _ext) = y.rsplit_once('.').unwrap_or((y, ""));

    let zoom = zoom
        .parse::<u32>()
        .map_err(|_| TileError::PathParse(format!("zoom is not an integer: {:?}", zoom)))?;
    let x = x
        .parse::<i64>()
        .map_err(|_| TileError::PathParse(format!("x is not an integer: {:?}", x)))?;
    let y = y
        .parse::<i64>()
        .map_err(|_| TileError::PathParse(format!("y is not an integer: {:?}", y)))?;

    Ok(TileCoord::new(zoom, x, y))
}

/// Query -> render -> compose -> encode. The chart renderer is only
/// invoked when the tile has a positive aggregate count.
async fn render_tile(state: &AppState, zoom: &str, x: &str, y: &str) -> TileResult<Vec<u8>> {
    let coord = parse_coord(zoom, x, y)?;

    let (total, rows) = state.store.aggregate(coord).await?;

    let chart = if total > 0 {
        Some(render_polar_chart(&rows)?)
    } else {
        None
    };

    let tile = compose_tile(total, coord, chart.as_ref());

    encode_png(tile.as_raw(), TILE_SIZE as usize, TILE_SIZE as usize).map_err(TileError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_coord_accepts_extension_on_y() {
        let coord = parse_coord("14", "8189", "5448.png").unwrap();
        assert_eq!(coord, TileCoord::new(14, 8189, 5448));
    }

    #[test]
    fn parse_coord_accepts_missing_extension() {
        let coord = parse_coord("3", "-1", "2").unwrap();
        assert_eq!(coord, TileCoord::new(3, -1, 2));
    }

    #[test]
    fn parse_coord_ignores_unknown_extensions() {
        let coord = parse_coord("0", "0", "0.whatever").unwrap();
        assert_eq!(coord, TileCoord::new(0, 0, 0));
    }

    #[test]
    fn parse_coord_rejects_non_integer_segments() {
        assert!(matches!(
            parse_coord("abc", "def", "ghi.png"),
            Err(TileError::PathParse(_))
        ));
        assert!(matches!(
            parse_coord("14", "8189", "not-a-number.png"),
            Err(TileError::PathParse(_))
        ));
    }

    #[test]
    fn parse_coord_rejects_negative_zoom() {
        assert!(matches!(
            parse_coord("-1", "0", "0.png"),
            Err(TileError::PathParse(_))
        ));
    }
}
