//! Aggregate store queries against the SQLite `angles` table.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use tile_common::{AngleCountRow, TileCoord, TileError, TileResult};

/// Database connection pool over the read-only aggregate store.
///
/// The store is populated out of band; this handle never writes. Pooled
/// connections mean no two in-flight requests share a cursor.
pub struct AngleStore {
    pool: SqlitePool,
}

#[derive(Debug, FromRow)]
struct AngleRow {
    angle: f64,
    count: i64,
}

impl From<AngleRow> for AngleCountRow {
    fn from(row: AngleRow) -> Self {
        AngleCountRow::new(row.angle, row.count)
    }
}

impl AngleStore {
    /// Open a read-only pool on the SQLite database at `path`.
    pub async fn connect(path: &str) -> TileResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| TileError::Query(format!("Connection failed: {}", e)))?;

        Ok(Self { pool })
    }

    /// Total count and angle/count rows for a tile, rows ordered by
    /// ascending angle.
    ///
    /// A tile with no rows and a tile whose rows sum to zero both report a
    /// total of 0; in either case no rows are fetched, since the caller
    /// skips chart rendering entirely for empty tiles.
    pub async fn aggregate(&self, coord: TileCoord) -> TileResult<(i64, Vec<AngleCountRow>)> {
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(count) FROM angles WHERE zoom = ? AND x = ? AND y = ?",
        )
        .bind(coord.zoom as i64)
        .bind(coord.x)
        .bind(coord.y)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TileError::Query(format!("Sum query failed: {}", e)))?;

        let total = total.unwrap_or(0);
        if total <= 0 {
            return Ok((0, Vec::new()));
        }

        let rows = sqlx::query_as::<_, AngleRow>(
            "SELECT angle, count FROM angles WHERE zoom = ? AND x = ? AND y = ? ORDER BY angle",
        )
        .bind(coord.zoom as i64)
        .bind(coord.x)
        .bind(coord.y)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TileError::Query(format!("Rows query failed: {}", e)))?;

        tracing::debug!(
            tile = %coord.path_key(),
            total,
            rows = rows.len(),
            "aggregate query"
        );

        Ok((total, rows.into_iter().map(|r| r.into()).collect()))
    }
}
