//! Pricing resolution
//!
//! Resolves the effective price of an item at a point in time, per the
//! item's pricing strategy, then layers selected add-ons and tax on top.
//! Uses rust_decimal for precision calculations.

mod resolver;

pub use resolver::{
    effective_tax_percentage, resolve_item_price, resolve_price, to_decimal, to_f64, AddonLine,
    PriceRequest, PriceResult, PricingDetails, PricingError,
};
