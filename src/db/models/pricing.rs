//! Pricing configuration models
//!
//! The five pricing strategies are mutually exclusive, so the configuration
//! is a tagged enum: exactly one variant is populated by construction, and
//! matching on it is exhaustive — adding a strategy is a compile-time-checked
//! change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PricingType;

/// Discount flavor for [`PricingConfig::Discounted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountType {
    /// Subtract a fixed amount from the base price
    Flat,
    /// Subtract a percentage of the base price
    Percent,
}

/// One usage tier: the tier covers any usage up to and including `max_usage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    pub max_usage: u32,
    pub price: f64,
}

/// One time window during which a dynamic item is sellable at `price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicWindow {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub price: f64,
    /// Tie-break for overlapping windows: most recently created wins
    pub created_at: DateTime<Utc>,
}

impl DynamicWindow {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>, price: f64) -> Self {
        Self {
            start_time,
            end_time,
            price,
            created_at: Utc::now(),
        }
    }
}

/// Pricing configuration for an item, one variant per strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum PricingConfig {
    Static {
        price: f64,
    },
    #[serde(rename_all = "camelCase")]
    Discounted {
        base_price: f64,
        discount_type: DiscountType,
        discount_value: f64,
    },
    Tiered {
        tiers: Vec<PricingTier>,
    },
    Dynamic {
        windows: Vec<DynamicWindow>,
    },
    Free,
}

impl PricingConfig {
    /// The strategy tag this configuration carries. Must agree with the
    /// owning item's `pricing_type`.
    pub fn pricing_type(&self) -> PricingType {
        match self {
            PricingConfig::Static { .. } => PricingType::Static,
            PricingConfig::Discounted { .. } => PricingType::Discounted,
            PricingConfig::Tiered { .. } => PricingType::Tiered,
            PricingConfig::Dynamic { .. } => PricingType::Dynamic,
            PricingConfig::Free => PricingType::Free,
        }
    }
}
