//! Venue Server - café and meeting-room catalog and booking API
//!
//! # Architecture overview
//!
//! - **Catalog store** (`db`): categories, subcategories, items, pricing
//!   configurations, add-ons, availability windows and bookings, held in an
//!   in-memory store with soft-delete semantics
//! - **Pricing resolver** (`pricing`): per-item price computation across the
//!   five pricing strategies with tax inheritance and add-on totals
//! - **Booking engine** (`booking`): weekly availability windows intersected
//!   with existing reservations; per-item serialized booking creation
//! - **Search engine** (`search`): in-memory filter/sort/paginate over
//!   representative prices
//! - **HTTP API** (`api`): RESTful JSON interface
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # config, state, server bootstrap
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and catalog store
//! ├── pricing/       # pricing resolution
//! ├── booking/       # availability and booking
//! ├── search/        # item search
//! └── utils/         # errors, logging, time helpers
//! ```

pub mod api;
pub mod booking;
pub mod core;
pub mod db;
pub mod pricing;
pub mod search;
pub mod utils;

// Re-export public types
pub use booking::{BookingEngine, BookingError};
pub use crate::core::{Config, Server, ServerState};
pub use db::{CatalogStore, ItemDetail};
pub use pricing::{resolve_price, PriceRequest, PriceResult, PricingError};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// Set up the process environment: dotenv and logging.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
 _    __
| |  / /__  ____  __  _____
| | / / _ \/ __ \/ / / / _ \
| |/ /  __/ / / / /_/ /  __/
|___/\___/_/ /_/\__,_/\___/
    "#
    );
}
