//! HTTP API modules
//!
//! One module per resource; each exposes a `router()` merged by the server.

pub mod addons;
pub mod booking;
pub mod categories;
pub mod health;
pub mod items;
pub mod subcategories;
