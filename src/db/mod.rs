//! Catalog store layer
//!
//! Models and the in-memory [`CatalogStore`]. The store is the single owner
//! of catalog state; engines read immutable snapshots ([`ItemDetail`]) and
//! only booking inserts and soft-deletes mutate it.

pub mod models;
pub mod seed;
pub mod store;

pub use store::{CatalogStore, ItemDetail, StoreError, StoreResult};
