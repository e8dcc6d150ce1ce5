//! Application state and shared resources.

use storage::AngleStore;
use tile_common::TileResult;

/// Shared application state: the read-only aggregate store handle.
pub struct AppState {
    pub store: AngleStore,
}

impl AppState {
    pub async fn new(database: &str) -> TileResult<Self> {
        let store = AngleStore::connect(database).await?;
        Ok(Self { store })
    }
}
