//! Data models for the catalog and booking domain.

mod booking;
mod category;
mod item;
mod pricing;

pub use booking::{Availability, Booking, DayOfWeek, Slot};
pub use category::{Category, Subcategory};
pub use item::{Addon, AddonGroup, Item, PricingType};
pub use pricing::{DiscountType, DynamicWindow, PricingConfig, PricingTier};
