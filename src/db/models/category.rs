//! Category and Subcategory models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-level catalog grouping. Soft-deleted only: `is_active = false` hides
/// the category and everything under it from read, pricing and booking paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub tax_applicable: bool,
    /// Tax percentage in [0, 100]; `None` is treated as 0
    pub tax_percentage: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>, tax_applicable: bool, tax_percentage: Option<f64>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            is_active: true,
            tax_applicable,
            tax_percentage,
            created_at: Utc::now(),
        }
    }
}

/// Second-level grouping, belongs to exactly one [`Category`]. Its tax
/// settings take precedence over the parent category's.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub is_active: bool,
    pub tax_applicable: bool,
    pub tax_percentage: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Subcategory {
    pub fn new(
        category_id: impl Into<String>,
        name: impl Into<String>,
        tax_applicable: bool,
        tax_percentage: Option<f64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            category_id: category_id.into(),
            name: name.into(),
            is_active: true,
            tax_applicable,
            tax_percentage,
            created_at: Utc::now(),
        }
    }
}
