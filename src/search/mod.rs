//! Catalog search
//!
//! Filters the visible catalog by name, category, tax flag and price range,
//! then sorts and paginates. Works on item snapshots so one request sees one
//! consistent catalog state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::{PricingConfig, PricingType};
use crate::db::ItemDetail;
use crate::pricing::{to_decimal, to_f64};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SortBy {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "createdAt")]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

/// Search parameters, deserialized straight from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Case-insensitive substring match on the item name
    pub q: Option<String>,
    pub category_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub tax_applicable: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub sort_dir: Option<SortDir>,
}

impl SearchQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self, default: u32, max: u32) -> u32 {
        self.limit.unwrap_or(default).clamp(1, max)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    pub pricing_type: PricingType,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Representative price used for range filtering
    pub price: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub items: Vec<SearchHit>,
}

/// A single comparable price per item for filtering and display:
/// the discounted price for DISCOUNTED, the cheapest tier for TIERED, the
/// window price containing `now` (else 0) for DYNAMIC, 0 for FREE.
pub fn representative_price(config: &PricingConfig, now: DateTime<Utc>) -> f64 {
    match config {
        PricingConfig::Static { price } => *price,
        PricingConfig::Discounted {
            base_price,
            discount_type,
            discount_value,
        } => {
            let base = to_decimal(*base_price);
            let value = to_decimal(*discount_value);
            let amount = match discount_type {
                crate::db::models::DiscountType::Flat => value,
                crate::db::models::DiscountType::Percent => {
                    base * value / rust_decimal::Decimal::ONE_HUNDRED
                }
            };
            to_f64((base - amount).max(rust_decimal::Decimal::ZERO))
        }
        PricingConfig::Tiered { tiers } => tiers
            .iter()
            .min_by_key(|t| t.max_usage)
            .map(|t| t.price)
            .unwrap_or(0.0),
        PricingConfig::Dynamic { windows } => windows
            .iter()
            .filter(|w| w.start_time <= now && now <= w.end_time)
            .max_by_key(|w| w.created_at)
            .map(|w| w.price)
            .unwrap_or(0.0),
        PricingConfig::Free => 0.0,
    }
}

fn effective_tax_applicable(detail: &ItemDetail) -> bool {
    match &detail.subcategory {
        Some(sub) => sub.tax_applicable,
        None => detail.category.tax_applicable,
    }
}

/// Filter, sort and paginate visible item snapshots.
pub fn search(details: &[ItemDetail], query: &SearchQuery, now: DateTime<Utc>, limit: u32) -> SearchPage {
    let needle = query.q.as_deref().map(str::to_lowercase);

    let mut hits: Vec<(&ItemDetail, f64)> = details
        .iter()
        .filter(|d| match &needle {
            Some(n) => d.item.name.to_lowercase().contains(n),
            None => true,
        })
        .filter(|d| match &query.category_id {
            Some(id) => &d.item.category_id == id,
            None => true,
        })
        .filter(|d| match query.tax_applicable {
            Some(wanted) => effective_tax_applicable(d) == wanted,
            None => true,
        })
        .filter_map(|d| {
            // Items without a pricing config never surface in search
            let config = d.pricing.as_ref()?;
            Some((d, representative_price(config, now)))
        })
        .filter(|(_, price)| query.min_price.map_or(true, |min| *price >= min))
        .filter(|(_, price)| query.max_price.map_or(true, |max| *price <= max))
        .collect();

    let sort_by = query.sort_by.unwrap_or(SortBy::CreatedAt);
    let order = query.sort_dir.unwrap_or(SortDir::Asc);
    hits.sort_by(|(a, _), (b, _)| {
        let ordering = match sort_by {
            SortBy::Name => a
                .item
                .name
                .to_lowercase()
                .cmp(&b.item.name.to_lowercase()),
            // Price ordering uses the static list price; strategies without
            // one sort as 0
            SortBy::Price => {
                let a_static = static_price(a).unwrap_or(0.0);
                let b_static = static_price(b).unwrap_or(0.0);
                a_static
                    .partial_cmp(&b_static)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }
            SortBy::CreatedAt => a.item.created_at.cmp(&b.item.created_at),
        };
        match order {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    });

    let total = hits.len();
    let page = query.page();
    // Widen before multiplying; a huge page must not overflow
    let offset = (page as usize)
        .saturating_sub(1)
        .saturating_mul(limit as usize);

    let items = hits
        .into_iter()
        .skip(offset)
        .take(limit as usize)
        .map(|(d, price)| SearchHit {
            id: d.item.id.clone(),
            name: d.item.name.clone(),
            pricing_type: d.item.pricing_type,
            category: d.category.name.clone(),
            subcategory: d.subcategory.as_ref().map(|s| s.name.clone()),
            price,
        })
        .collect();

    SearchPage {
        total,
        page,
        limit,
        items,
    }
}

fn static_price(detail: &ItemDetail) -> Option<f64> {
    match detail.pricing.as_ref()? {
        PricingConfig::Static { price } => Some(*price),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Category, DynamicWindow, Item, PricingTier};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap()
    }

    fn detail(name: &str, category: &Category, config: PricingConfig) -> ItemDetail {
        let item = Item::new(name, &category.id, config.pricing_type(), false);
        ItemDetail {
            item,
            category: category.clone(),
            subcategory: None,
            pricing: Some(config),
            addon_groups: vec![],
            availabilities: vec![],
            bookings: vec![],
        }
    }

    fn catalog() -> Vec<ItemDetail> {
        let cafe = Category::new("Café", true, Some(18.0));
        let rooms = Category::new("Meeting Rooms", false, None);
        vec![
            detail("Coffee", &cafe, PricingConfig::Static { price: 200.0 }),
            detail(
                "Room A",
                &rooms,
                PricingConfig::Tiered {
                    tiers: vec![
                        PricingTier { max_usage: 1, price: 300.0 },
                        PricingTier { max_usage: 4, price: 800.0 },
                    ],
                },
            ),
            detail(
                "Breakfast Combo",
                &cafe,
                PricingConfig::Dynamic {
                    windows: vec![DynamicWindow::new(
                        now() - Duration::hours(1),
                        now() + Duration::hours(2),
                        199.0,
                    )],
                },
            ),
            detail("Tap Water", &cafe, PricingConfig::Free),
        ]
    }

    #[test]
    fn test_name_filter_case_insensitive() {
        let catalog = catalog();
        let query = SearchQuery {
            q: Some("cOfF".into()),
            ..Default::default()
        };

        let page = search(&catalog, &query, now(), 10);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Coffee");
    }

    #[test]
    fn test_representative_prices() {
        let catalog = catalog();
        let page = search(&catalog, &SearchQuery::default(), now(), 10);

        let price_of = |name: &str| {
            page.items
                .iter()
                .find(|h| h.name == name)
                .map(|h| h.price)
                .unwrap()
        };
        // Tiered items surface their cheapest tier
        assert_eq!(price_of("Room A"), 300.0);
        // Dynamic items surface the window active right now
        assert_eq!(price_of("Breakfast Combo"), 199.0);
        assert_eq!(price_of("Tap Water"), 0.0);
    }

    #[test]
    fn test_price_range_filter() {
        let catalog = catalog();
        let query = SearchQuery {
            min_price: Some(100.0),
            max_price: Some(250.0),
            ..Default::default()
        };

        let page = search(&catalog, &query, now(), 10);
        let names: Vec<&str> = page.items.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Coffee"));
        assert!(names.contains(&"Breakfast Combo"));
    }

    #[test]
    fn test_dynamic_outside_window_reads_zero() {
        let catalog = catalog();
        let later = now() + Duration::hours(5);
        let query = SearchQuery {
            q: Some("breakfast".into()),
            ..Default::default()
        };

        let page = search(&catalog, &query, later, 10);
        assert_eq!(page.items[0].price, 0.0);
    }

    #[test]
    fn test_tax_applicable_filter() {
        let catalog = catalog();
        let query = SearchQuery {
            tax_applicable: Some(false),
            ..Default::default()
        };

        let page = search(&catalog, &query, now(), 10);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Room A");
    }

    #[test]
    fn test_sort_by_name_desc() {
        let catalog = catalog();
        let query = SearchQuery {
            sort_by: Some(SortBy::Name),
            sort_dir: Some(SortDir::Desc),
            ..Default::default()
        };

        let page = search(&catalog, &query, now(), 10);
        assert_eq!(page.items[0].name, "Tap Water");
    }

    #[test]
    fn test_pagination() {
        let catalog = catalog();
        let query = SearchQuery {
            sort_by: Some(SortBy::Name),
            page: Some(2),
            ..Default::default()
        };

        let page = search(&catalog, &query, now(), 2);
        assert_eq!(page.total, 4);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 2);

        // Past the last page is empty, not an error
        let query = SearchQuery {
            page: Some(99),
            ..Default::default()
        };
        let page = search(&catalog, &query, now(), 2);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 4);
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let catalog = catalog();
        let query = SearchQuery {
            page: Some(u32::MAX),
            ..Default::default()
        };

        let page = search(&catalog, &query, now(), 50);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 4);
    }

    #[test]
    fn test_items_without_pricing_config_excluded() {
        let mut catalog = catalog();
        catalog[0].pricing = None;

        let page = search(&catalog, &SearchQuery::default(), now(), 10);
        assert_eq!(page.total, 3);
        assert!(page.items.iter().all(|h| h.name != "Coffee"));
    }
}
