//! Catalog Store - in-memory catalog state with soft-delete semantics
//!
//! The store owns all catalog records and hands out cloned snapshots.
//! Reads assemble an [`ItemDetail`] (item plus every related record) in a
//! single pass so the engines work from one consistent view. The only
//! mutations are soft-deletes (cascading deactivation) and booking inserts.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::models::{
    Addon, AddonGroup, Availability, Booking, Category, Item, PricingConfig, Subcategory,
};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    /// Pricing config variant does not match the item's pricing type
    #[error("Invalid pricing type: {0}")]
    InvalidPricingType(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// An item with every related record, read as one snapshot.
#[derive(Debug, Clone)]
pub struct ItemDetail {
    pub item: Item,
    pub category: Category,
    pub subcategory: Option<Subcategory>,
    pub pricing: Option<PricingConfig>,
    pub addon_groups: Vec<AddonGroup>,
    pub availabilities: Vec<Availability>,
    pub bookings: Vec<Booking>,
}

impl ItemDetail {
    /// An item is visible only while it and its whole category chain are
    /// active. Soft-deleted records stay in storage but read as missing.
    pub fn is_visible(&self) -> bool {
        self.item.is_active
            && self.category.is_active
            && self.subcategory.as_ref().map(|s| s.is_active).unwrap_or(true)
    }
}

/// Category with its nested subcategories and items, for the catalog
/// read endpoints.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub subcategories: Vec<Subcategory>,
    pub items: Vec<Item>,
}

/// Subcategory with its parent category and items.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryDetail {
    #[serde(flatten)]
    pub subcategory: Subcategory,
    pub category: Option<Category>,
    pub items: Vec<Item>,
}

/// Addon joined with its owning group, for the flat addon listing.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonWithGroup {
    #[serde(flatten)]
    pub addon: Addon,
    pub group_id: String,
    pub group_name: String,
    pub item_id: String,
}

/// In-memory catalog store.
///
/// Each record family lives in its own lock so readers of unrelated
/// families never contend. Related-record maps are keyed by item id.
pub struct CatalogStore {
    categories: RwLock<HashMap<String, Category>>,
    subcategories: RwLock<HashMap<String, Subcategory>>,
    items: RwLock<HashMap<String, Item>>,
    /// keyed by item id (1:1)
    pricing: RwLock<HashMap<String, PricingConfig>>,
    /// keyed by item id
    addon_groups: RwLock<HashMap<String, Vec<AddonGroup>>>,
    /// keyed by item id
    availabilities: RwLock<HashMap<String, Vec<Availability>>>,
    /// keyed by item id
    bookings: RwLock<HashMap<String, Vec<Booking>>>,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("categories", &self.categories.read().len())
            .field("items", &self.items.read().len())
            .finish()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            categories: RwLock::new(HashMap::new()),
            subcategories: RwLock::new(HashMap::new()),
            items: RwLock::new(HashMap::new()),
            pricing: RwLock::new(HashMap::new()),
            addon_groups: RwLock::new(HashMap::new()),
            availabilities: RwLock::new(HashMap::new()),
            bookings: RwLock::new(HashMap::new()),
        }
    }

    // =========================================================================
    // Create (seeding / admin)
    // =========================================================================

    pub fn insert_category(&self, category: Category) -> Category {
        self.categories
            .write()
            .insert(category.id.clone(), category.clone());
        category
    }

    pub fn insert_subcategory(&self, subcategory: Subcategory) -> StoreResult<Subcategory> {
        if !self.categories.read().contains_key(&subcategory.category_id) {
            return Err(StoreError::NotFound(format!(
                "Category {} not found",
                subcategory.category_id
            )));
        }
        self.subcategories
            .write()
            .insert(subcategory.id.clone(), subcategory.clone());
        Ok(subcategory)
    }

    pub fn insert_item(&self, item: Item) -> StoreResult<Item> {
        if !self.categories.read().contains_key(&item.category_id) {
            return Err(StoreError::NotFound(format!(
                "Category {} not found",
                item.category_id
            )));
        }
        if let Some(sub_id) = &item.subcategory_id {
            if !self.subcategories.read().contains_key(sub_id) {
                return Err(StoreError::NotFound(format!(
                    "Subcategory {} not found",
                    sub_id
                )));
            }
        }
        self.items.write().insert(item.id.clone(), item.clone());
        Ok(item)
    }

    /// Attach the pricing configuration for an item (1:1). The populated
    /// variant must match the item's pricing type tag.
    pub fn set_pricing(&self, item_id: &str, config: PricingConfig) -> StoreResult<()> {
        let items = self.items.read();
        let item = items
            .get(item_id)
            .ok_or_else(|| StoreError::NotFound(format!("Item {} not found", item_id)))?;

        if config.pricing_type() != item.pricing_type {
            return Err(StoreError::InvalidPricingType(format!(
                "Config variant {:?} does not match item pricing type {:?}",
                config.pricing_type(),
                item.pricing_type
            )));
        }

        self.pricing.write().insert(item_id.to_string(), config);
        Ok(())
    }

    pub fn insert_addon_group(&self, group: AddonGroup) -> StoreResult<AddonGroup> {
        if !self.items.read().contains_key(&group.item_id) {
            return Err(StoreError::NotFound(format!(
                "Item {} not found",
                group.item_id
            )));
        }
        self.addon_groups
            .write()
            .entry(group.item_id.clone())
            .or_default()
            .push(group.clone());
        Ok(group)
    }

    pub fn insert_availability(&self, availability: Availability) -> StoreResult<Availability> {
        if availability.start_time >= availability.end_time {
            return Err(StoreError::Validation(
                "Availability start must be before end".into(),
            ));
        }
        if !self.items.read().contains_key(&availability.item_id) {
            return Err(StoreError::NotFound(format!(
                "Item {} not found",
                availability.item_id
            )));
        }
        self.availabilities
            .write()
            .entry(availability.item_id.clone())
            .or_default()
            .push(availability.clone());
        Ok(availability)
    }

    /// Append a booking. Overlap validation is the booking engine's job;
    /// the store only persists.
    pub fn insert_booking(&self, booking: Booking) -> StoreResult<Booking> {
        if !self.items.read().contains_key(&booking.item_id) {
            return Err(StoreError::NotFound(format!(
                "Item {} not found",
                booking.item_id
            )));
        }
        self.bookings
            .write()
            .entry(booking.item_id.clone())
            .or_default()
            .push(booking.clone());
        Ok(booking)
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Read an item with every related record as one snapshot.
    /// Returns soft-deleted items too; callers check [`ItemDetail::is_visible`].
    pub fn item_detail(&self, item_id: &str) -> Option<ItemDetail> {
        let item = self.items.read().get(item_id).cloned()?;
        let category = self.categories.read().get(&item.category_id).cloned()?;
        let subcategory = item
            .subcategory_id
            .as_ref()
            .and_then(|id| self.subcategories.read().get(id).cloned());
        let pricing = self.pricing.read().get(item_id).cloned();
        let addon_groups = self
            .addon_groups
            .read()
            .get(item_id)
            .cloned()
            .unwrap_or_default();
        let availabilities = self
            .availabilities
            .read()
            .get(item_id)
            .cloned()
            .unwrap_or_default();
        let bookings = self
            .bookings
            .read()
            .get(item_id)
            .cloned()
            .unwrap_or_default();

        Some(ItemDetail {
            item,
            category,
            subcategory,
            pricing,
            addon_groups,
            availabilities,
            bookings,
        })
    }

    /// All visible item snapshots (active item, active category chain).
    pub fn visible_item_details(&self) -> Vec<ItemDetail> {
        let ids: Vec<String> = self.items.read().keys().cloned().collect();
        ids.iter()
            .filter_map(|id| self.item_detail(id))
            .filter(|d| d.is_visible())
            .collect()
    }

    /// Active items only (without related records), for the plain listing.
    pub fn active_items(&self) -> Vec<Item> {
        self.visible_item_details()
            .into_iter()
            .map(|d| d.item)
            .collect()
    }

    pub fn categories(&self) -> Vec<CategoryDetail> {
        let categories = self.categories.read();
        let mut details: Vec<CategoryDetail> = categories
            .values()
            .map(|c| self.category_detail_inner(c.clone()))
            .collect();
        details.sort_by(|a, b| a.category.created_at.cmp(&b.category.created_at));
        details
    }

    pub fn category(&self, id: &str) -> Option<CategoryDetail> {
        let category = self.categories.read().get(id).cloned()?;
        Some(self.category_detail_inner(category))
    }

    fn category_detail_inner(&self, category: Category) -> CategoryDetail {
        let subcategories = self
            .subcategories
            .read()
            .values()
            .filter(|s| s.category_id == category.id)
            .cloned()
            .collect();
        let items = self
            .items
            .read()
            .values()
            .filter(|i| i.category_id == category.id)
            .cloned()
            .collect();
        CategoryDetail {
            category,
            subcategories,
            items,
        }
    }

    pub fn subcategories(&self) -> Vec<SubcategoryDetail> {
        let subcategories = self.subcategories.read();
        let mut details: Vec<SubcategoryDetail> = subcategories
            .values()
            .map(|s| self.subcategory_detail_inner(s.clone()))
            .collect();
        details.sort_by(|a, b| a.subcategory.created_at.cmp(&b.subcategory.created_at));
        details
    }

    pub fn subcategory(&self, id: &str) -> Option<SubcategoryDetail> {
        let subcategory = self.subcategories.read().get(id).cloned()?;
        Some(self.subcategory_detail_inner(subcategory))
    }

    fn subcategory_detail_inner(&self, subcategory: Subcategory) -> SubcategoryDetail {
        let category = self.categories.read().get(&subcategory.category_id).cloned();
        let items = self
            .items
            .read()
            .values()
            .filter(|i| i.subcategory_id.as_deref() == Some(subcategory.id.as_str()))
            .cloned()
            .collect();
        SubcategoryDetail {
            subcategory,
            category,
            items,
        }
    }

    /// All addons across all items, joined with their group.
    pub fn addons(&self) -> Vec<AddonWithGroup> {
        self.addon_groups
            .read()
            .values()
            .flatten()
            .flat_map(|group| {
                group.addons.iter().map(|addon| AddonWithGroup {
                    addon: addon.clone(),
                    group_id: group.id.clone(),
                    group_name: group.name.clone(),
                    item_id: group.item_id.clone(),
                })
            })
            .collect()
    }

    // =========================================================================
    // Soft-delete (cascading deactivation)
    // =========================================================================

    /// Deactivate a category and cascade to its subcategories and items.
    pub fn deactivate_category(&self, id: &str) -> StoreResult<()> {
        {
            let mut categories = self.categories.write();
            let category = categories
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(format!("Category {} not found", id)))?;
            category.is_active = false;
        }

        for subcategory in self.subcategories.write().values_mut() {
            if subcategory.category_id == id {
                subcategory.is_active = false;
            }
        }
        for item in self.items.write().values_mut() {
            if item.category_id == id {
                item.is_active = false;
            }
        }

        tracing::info!(category_id = %id, "Category deactivated (cascaded)");
        Ok(())
    }

    /// Deactivate a subcategory and cascade to its items.
    pub fn deactivate_subcategory(&self, id: &str) -> StoreResult<()> {
        {
            let mut subcategories = self.subcategories.write();
            let subcategory = subcategories
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(format!("Subcategory {} not found", id)))?;
            subcategory.is_active = false;
        }

        for item in self.items.write().values_mut() {
            if item.subcategory_id.as_deref() == Some(id) {
                item.is_active = false;
            }
        }

        tracing::info!(subcategory_id = %id, "Subcategory deactivated (cascaded)");
        Ok(())
    }

    /// Deactivate a single item.
    pub fn deactivate_item(&self, id: &str) -> StoreResult<()> {
        let mut items = self.items.write();
        let item = items
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("Item {} not found", id)))?;
        item.is_active = false;

        tracing::info!(item_id = %id, "Item deactivated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::PricingType;

    fn store_with_chain() -> (CatalogStore, String, String, String) {
        let store = CatalogStore::new();
        let cat = store.insert_category(Category::new("Café", true, Some(18.0)));
        let sub = store
            .insert_subcategory(Subcategory::new(&cat.id, "Hot Drinks", false, None))
            .unwrap();
        let item = store
            .insert_item(
                Item::new("Coffee", &cat.id, PricingType::Static, false)
                    .with_subcategory(&sub.id),
            )
            .unwrap();
        store
            .set_pricing(&item.id, PricingConfig::Static { price: 200.0 })
            .unwrap();
        (store, cat.id, sub.id, item.id)
    }

    #[test]
    fn test_item_detail_snapshot() {
        let (store, _, _, item_id) = store_with_chain();
        let detail = store.item_detail(&item_id).unwrap();
        assert!(detail.is_visible());
        assert!(detail.pricing.is_some());
        assert_eq!(detail.subcategory.as_ref().unwrap().name, "Hot Drinks");
    }

    #[test]
    fn test_pricing_type_mismatch_rejected() {
        let store = CatalogStore::new();
        let cat = store.insert_category(Category::new("Café", false, None));
        let item = store
            .insert_item(Item::new("Coffee", &cat.id, PricingType::Static, false))
            .unwrap();

        let err = store
            .set_pricing(&item.id, PricingConfig::Free)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidPricingType(_)));
    }

    #[test]
    fn test_category_cascade_hides_items() {
        let (store, cat_id, sub_id, item_id) = store_with_chain();

        store.deactivate_category(&cat_id).unwrap();

        let detail = store.item_detail(&item_id).unwrap();
        assert!(!detail.is_visible());
        assert!(!detail.item.is_active);
        assert!(!store.subcategory(&sub_id).unwrap().subcategory.is_active);
        assert!(store.visible_item_details().is_empty());
    }

    #[test]
    fn test_subcategory_cascade_hides_items() {
        let (store, _, sub_id, item_id) = store_with_chain();

        store.deactivate_subcategory(&sub_id).unwrap();

        let detail = store.item_detail(&item_id).unwrap();
        assert!(!detail.item.is_active);
        assert!(!detail.is_visible());
    }

    #[test]
    fn test_deactivated_record_stays_in_storage() {
        let (store, cat_id, _, item_id) = store_with_chain();
        store.deactivate_item(&item_id).unwrap();

        // Soft delete: still readable, just inactive
        assert!(store.item_detail(&item_id).is_some());
        assert!(store.category(&cat_id).is_some());
    }
}
