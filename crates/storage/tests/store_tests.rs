//! Tests for the aggregate store against scratch SQLite databases.

use std::path::Path;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use storage::AngleStore;
use tile_common::{TileCoord, TileError};

// ============================================================================
// Helpers
// ============================================================================

/// Create a database at `path` with the `angles` schema and the given
/// (zoom, x, y, angle, count) rows, deliberately inserted out of order.
async fn seed_db(path: &Path, rows: &[(i64, i64, i64, f64, i64)]) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await.unwrap();

    sqlx::query(
        "CREATE TABLE angles (zoom INTEGER, x INTEGER, y INTEGER, angle REAL, count INTEGER)",
    )
    .execute(&pool)
    .await
    .unwrap();

    for (zoom, x, y, angle, count) in rows {
        sqlx::query("INSERT INTO angles (zoom, x, y, angle, count) VALUES (?, ?, ?, ?, ?)")
            .bind(zoom)
            .bind(x)
            .bind(y)
            .bind(angle)
            .bind(count)
            .execute(&pool)
            .await
            .unwrap();
    }

    pool.close().await;
}

// ============================================================================
// Aggregate queries
// ============================================================================

#[tokio::test]
async fn aggregate_sums_counts_and_orders_rows_by_angle() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("angles.db");
    seed_db(
        &db,
        &[
            (14, 100, 200, 270.0, 1),
            (14, 100, 200, 10.0, 5),
            (14, 100, 200, 90.0, 2),
        ],
    )
    .await;

    let store = AngleStore::connect(db.to_str().unwrap()).await.unwrap();
    let (total, rows) = store
        .aggregate(TileCoord::new(14, 100, 200))
        .await
        .unwrap();

    assert_eq!(total, 8);
    let pairs: Vec<(f64, i64)> = rows.iter().map(|r| (r.angle, r.count)).collect();
    assert_eq!(pairs, vec![(10.0, 5), (90.0, 2), (270.0, 1)]);
}

#[tokio::test]
async fn aggregate_of_missing_tile_is_zero_with_no_rows() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("angles.db");
    seed_db(&db, &[(14, 100, 200, 45.0, 3)]).await;

    let store = AngleStore::connect(db.to_str().unwrap()).await.unwrap();
    let (total, rows) = store.aggregate(TileCoord::new(14, 1, 2)).await.unwrap();

    assert_eq!(total, 0);
    assert!(rows.is_empty());
}

#[tokio::test]
async fn rows_with_zero_counts_report_zero_total() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("angles.db");
    seed_db(&db, &[(5, 1, 1, 30.0, 0), (5, 1, 1, 60.0, 0)]).await;

    let store = AngleStore::connect(db.to_str().unwrap()).await.unwrap();
    let (total, rows) = store.aggregate(TileCoord::new(5, 1, 1)).await.unwrap();

    // Present-but-zero rows must look the same as absent rows.
    assert_eq!(total, 0);
    assert!(rows.is_empty());
}

#[tokio::test]
async fn queries_are_scoped_to_the_requested_tile() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("angles.db");
    seed_db(
        &db,
        &[
            (14, 100, 200, 10.0, 5),
            (14, 100, 201, 10.0, 7),
            (15, 100, 200, 10.0, 9),
        ],
    )
    .await;

    let store = AngleStore::connect(db.to_str().unwrap()).await.unwrap();
    let (total, rows) = store
        .aggregate(TileCoord::new(14, 100, 200))
        .await
        .unwrap();

    assert_eq!(total, 5);
    assert_eq!(rows.len(), 1);
}

// ============================================================================
// Failure modes
// ============================================================================

#[tokio::test]
async fn connect_to_missing_database_fails_with_query_error() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("does-not-exist.db");

    let err = AngleStore::connect(db.to_str().unwrap())
        .await
        .err()
        .expect("connect should fail for a missing read-only database");
    assert!(matches!(err, TileError::Query(_)));
}

#[tokio::test]
async fn missing_angles_table_surfaces_as_query_error() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("empty.db");

    // Valid SQLite file without the expected schema.
    let options = SqliteConnectOptions::new()
        .filename(&db)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await.unwrap();
    sqlx::query("CREATE TABLE unrelated (id INTEGER)")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    let store = AngleStore::connect(db.to_str().unwrap()).await.unwrap();
    let err = store
        .aggregate(TileCoord::new(1, 0, 0))
        .await
        .err()
        .expect("query against missing table should fail");
    assert!(matches!(err, TileError::Query(_)));
}
