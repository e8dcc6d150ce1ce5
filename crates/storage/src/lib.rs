//! Read-only access to the building-angle aggregate store.

pub mod store;

pub use store::AngleStore;
