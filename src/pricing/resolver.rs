//! Price resolution engine
//!
//! Pure functions from a catalog snapshot to a priced quote:
//! 1. Resolve the base price per the item's pricing strategy
//! 2. Add selected add-ons
//! 3. Apply tax (subcategory settings win over category)
//!
//! All arithmetic goes through rust_decimal; f64 only at the boundaries.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use serde::Serialize;

use crate::db::models::{DiscountType, DynamicWindow, PricingConfig, PricingType};
use crate::db::{CatalogStore, ItemDetail};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for responses, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Item not found")]
    NotFound,

    #[error("Pricing configuration missing")]
    ConfigMissing,

    #[error("Usage parameter required for tiered pricing")]
    UsageRequired,

    #[error("No pricing tier available for given usage")]
    NoTierAvailable,

    #[error("Item not available at this time")]
    NotAvailableNow,
}

/// Inputs to a price resolution.
#[derive(Debug, Clone, Default)]
pub struct PriceRequest {
    /// Usage quantity (headcount, hours); required for tiered items
    pub usage: Option<u32>,
    /// Ids of add-ons the client selected; unknown ids are ignored
    pub selected_addon_ids: Vec<String>,
    /// Evaluation instant for dynamic windows
    pub now: DateTime<Utc>,
}

impl PriceRequest {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            ..Default::default()
        }
    }
}

/// How the base price was derived, echoed back to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "rule")]
pub enum PricingDetails {
    #[serde(rename = "STATIC")]
    Static { price: f64 },
    #[serde(rename = "DISCOUNTED", rename_all = "camelCase")]
    Discounted {
        base_price: f64,
        discount_type: DiscountType,
        discount_value: f64,
        discount_amount: f64,
    },
    #[serde(rename = "TIERED", rename_all = "camelCase")]
    Tiered { usage: u32, max_usage: u32, price: f64 },
    #[serde(rename = "DYNAMIC", rename_all = "camelCase")]
    Dynamic {
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        price: f64,
    },
    #[serde(rename = "COMPLIMENTARY")]
    Free,
}

/// A selected add-on as it appears in the quote.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonLine {
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// A fully resolved price quote.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResult {
    pub item_id: String,
    pub name: String,
    pub pricing_type: PricingType,
    pub pricing_details: PricingDetails,
    pub base_price: f64,
    pub addons: Vec<AddonLine>,
    pub addon_total: f64,
    pub tax_percentage: f64,
    pub tax: f64,
    /// Base price plus tax, before add-ons
    pub grand_total: f64,
    pub final_price: f64,
}

/// Effective tax percentage for an item: subcategory tax settings take
/// precedence over the category's; a non-applicable or missing percentage
/// reads as 0.
pub fn effective_tax_percentage(detail: &ItemDetail) -> f64 {
    let (applicable, percentage) = match &detail.subcategory {
        Some(sub) => (sub.tax_applicable, sub.tax_percentage),
        None => (detail.category.tax_applicable, detail.category.tax_percentage),
    };
    if applicable {
        percentage.unwrap_or(0.0)
    } else {
        0.0
    }
}

/// Resolve the price of an item by id. Soft-deleted items (or items under a
/// deactivated category chain) read as not found.
pub fn resolve_item_price(
    store: &CatalogStore,
    item_id: &str,
    request: &PriceRequest,
) -> Result<PriceResult, PricingError> {
    let detail = store
        .item_detail(item_id)
        .filter(ItemDetail::is_visible)
        .ok_or(PricingError::NotFound)?;
    resolve_price(&detail, request)
}

/// Resolve the price of an item snapshot. Pure: same snapshot and request
/// always produce the same quote.
pub fn resolve_price(
    detail: &ItemDetail,
    request: &PriceRequest,
) -> Result<PriceResult, PricingError> {
    let config = detail.pricing.as_ref().ok_or(PricingError::ConfigMissing)?;

    let (base_price, details) = resolve_base(config, request)?;

    let addons = select_addons(detail, &request.selected_addon_ids);
    let addon_total = addons
        .iter()
        .fold(Decimal::ZERO, |acc, a| acc + to_decimal(a.price));

    // Tax applies to the base price only; add-ons join after tax
    let tax_percentage = effective_tax_percentage(detail);
    let tax = base_price * to_decimal(tax_percentage) / Decimal::ONE_HUNDRED;
    let grand_total = base_price + tax;

    Ok(PriceResult {
        item_id: detail.item.id.clone(),
        name: detail.item.name.clone(),
        pricing_type: detail.item.pricing_type,
        pricing_details: details,
        base_price: to_f64(base_price),
        addons,
        addon_total: to_f64(addon_total),
        tax_percentage,
        tax: to_f64(tax),
        grand_total: to_f64(grand_total),
        final_price: to_f64(grand_total + addon_total),
    })
}

/// Resolve the pre-addon, pre-tax base price per strategy.
fn resolve_base(
    config: &PricingConfig,
    request: &PriceRequest,
) -> Result<(Decimal, PricingDetails), PricingError> {
    match config {
        PricingConfig::Static { price } => Ok((
            to_decimal(*price),
            PricingDetails::Static { price: *price },
        )),

        PricingConfig::Discounted {
            base_price,
            discount_type,
            discount_value,
        } => {
            let base = to_decimal(*base_price);
            let value = to_decimal(*discount_value);
            let amount = match discount_type {
                DiscountType::Flat => value,
                DiscountType::Percent => base * value / Decimal::ONE_HUNDRED,
            };
            // A discount never drives the price below zero
            let discounted = (base - amount).max(Decimal::ZERO);
            Ok((
                discounted,
                PricingDetails::Discounted {
                    base_price: *base_price,
                    discount_type: *discount_type,
                    discount_value: *discount_value,
                    discount_amount: to_f64(base - discounted),
                },
            ))
        }

        PricingConfig::Tiered { tiers } => {
            // Zero usage counts as missing
            let usage = request
                .usage
                .filter(|u| *u > 0)
                .ok_or(PricingError::UsageRequired)?;
            // Smallest tier that still covers the usage
            let tier = tiers
                .iter()
                .filter(|t| t.max_usage >= usage)
                .min_by_key(|t| t.max_usage)
                .ok_or(PricingError::NoTierAvailable)?;
            Ok((
                to_decimal(tier.price),
                PricingDetails::Tiered {
                    usage,
                    max_usage: tier.max_usage,
                    price: tier.price,
                },
            ))
        }

        PricingConfig::Dynamic { windows } => {
            let window = active_window(windows, request.now)
                .ok_or(PricingError::NotAvailableNow)?;
            Ok((
                to_decimal(window.price),
                PricingDetails::Dynamic {
                    window_start: window.start_time,
                    window_end: window.end_time,
                    price: window.price,
                },
            ))
        }

        PricingConfig::Free => Ok((Decimal::ZERO, PricingDetails::Free)),
    }
}

/// The window containing `now` (bounds inclusive). When windows overlap, the
/// most recently created one wins.
fn active_window(windows: &[DynamicWindow], now: DateTime<Utc>) -> Option<&DynamicWindow> {
    windows
        .iter()
        .filter(|w| w.start_time <= now && now <= w.end_time)
        .max_by_key(|w| w.created_at)
}

fn select_addons(detail: &ItemDetail, selected_ids: &[String]) -> Vec<AddonLine> {
    if selected_ids.is_empty() {
        return vec![];
    }
    detail
        .addon_groups
        .iter()
        .flat_map(|g| g.addons.iter())
        .filter(|a| selected_ids.iter().any(|id| id == &a.id))
        .map(|a| AddonLine {
            id: a.id.clone(),
            name: a.name.clone(),
            price: a.price,
        })
        .collect()
}
