//! Demo catalog seed
//!
//! Populates a small café-and-meeting-rooms catalog covering every pricing
//! strategy and the booking path, for local development and integration
//! tests.

use chrono::{Duration, NaiveTime, Utc};

use super::models::{
    Addon, AddonGroup, Availability, Category, DayOfWeek, DynamicWindow, Item, PricingConfig,
    PricingTier, PricingType, Subcategory,
};
use super::store::{CatalogStore, StoreResult};

/// Seed the demo catalog. Failures are logged, not propagated; a partially
/// seeded store is still usable for development.
pub fn seed_demo_catalog(store: &CatalogStore) {
    if let Err(err) = seed_inner(store) {
        tracing::error!(error = %err, "Demo catalog seeding failed");
    }
}

fn seed_inner(store: &CatalogStore) -> StoreResult<()> {
    // Café: 18% tax, with a beverages subcategory
    let cafe = store.insert_category(Category::new("Café", true, Some(18.0)));
    let beverages = store.insert_subcategory(Subcategory::new(
        &cafe.id,
        "Beverages",
        true,
        Some(18.0),
    ))?;

    // Coffee: STATIC 200 with an optional add-on group
    let coffee = store.insert_item(
        Item::new("Coffee", &cafe.id, PricingType::Static, false).with_subcategory(&beverages.id),
    )?;
    store.set_pricing(&coffee.id, PricingConfig::Static { price: 200.0 })?;
    store.insert_addon_group(AddonGroup::new(
        &coffee.id,
        "Extras",
        false,
        vec![Addon::new("Extra Shot", 50.0), Addon::new("Oat Milk", 40.0)],
    ))?;

    // Breakfast Combo: DYNAMIC, sellable 08:00-11:00 today at 199
    let combo = store.insert_item(Item::new(
        "Breakfast Combo",
        &cafe.id,
        PricingType::Dynamic,
        false,
    ))?;
    let today = Utc::now().date_naive();
    let window_start = crate::utils::time::at_time(
        today,
        NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
    );
    store.set_pricing(
        &combo.id,
        PricingConfig::Dynamic {
            windows: vec![DynamicWindow::new(
                window_start,
                window_start + Duration::hours(3),
                199.0,
            )],
        },
    )?;

    // Meeting rooms: 12% tax
    let rooms = store.insert_category(Category::new("Meeting Rooms", true, Some(12.0)));

    // Room A: TIERED by headcount, bookable weekdays 10:00-17:00
    let room_a = store.insert_item(Item::new("Room A", &rooms.id, PricingType::Tiered, true))?;
    store.set_pricing(
        &room_a.id,
        PricingConfig::Tiered {
            tiers: vec![
                PricingTier {
                    max_usage: 1,
                    price: 300.0,
                },
                PricingTier {
                    max_usage: 2,
                    price: 500.0,
                },
                PricingTier {
                    max_usage: 4,
                    price: 800.0,
                },
            ],
        },
    )?;
    let open = NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default();
    let close = NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default();
    for day in [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
    ] {
        store.insert_availability(Availability::new(&room_a.id, day, open, close))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_covers_all_paths() {
        let store = CatalogStore::new();
        seed_demo_catalog(&store);

        let items = store.visible_item_details();
        assert_eq!(items.len(), 3);

        let room = items
            .iter()
            .find(|d| d.item.name == "Room A")
            .expect("Room A seeded");
        assert!(room.item.is_bookable);
        assert_eq!(room.availabilities.len(), 5);

        let coffee = items
            .iter()
            .find(|d| d.item.name == "Coffee")
            .expect("Coffee seeded");
        assert_eq!(coffee.addon_groups.len(), 1);
        assert_eq!(coffee.addon_groups[0].addons.len(), 2);
    }
}
