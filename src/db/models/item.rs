//! Item and add-on models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pricing strategy tag carried on the item. The populated
/// [`PricingConfig`](super::PricingConfig) variant must agree with this tag;
/// the store enforces the match at insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PricingType {
    Static,
    Discounted,
    Tiered,
    Dynamic,
    Free,
}

/// A sellable (and possibly bookable) catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<String>,
    pub pricing_type: PricingType,
    pub is_bookable: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        category_id: impl Into<String>,
        pricing_type: PricingType,
        is_bookable: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category_id: category_id.into(),
            subcategory_id: None,
            pricing_type,
            is_bookable,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn with_subcategory(mut self, subcategory_id: impl Into<String>) -> Self {
        self.subcategory_id = Some(subcategory_id.into());
        self
    }
}

/// A single selectable add-on (e.g. "Extra Shot").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl Addon {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            price,
        }
    }
}

/// A named group of add-ons belonging to one item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonGroup {
    pub id: String,
    pub item_id: String,
    pub name: String,
    pub required: bool,
    pub addons: Vec<Addon>,
}

impl AddonGroup {
    pub fn new(
        item_id: impl Into<String>,
        name: impl Into<String>,
        required: bool,
        addons: Vec<Addon>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            item_id: item_id.into(),
            name: name.into(),
            required,
            addons,
        }
    }
}
