//! Booking engine
//!
//! Availability is stored as weekly windows (weekday + time of day); slots
//! are those windows anchored on a concrete date. A window is offered whole
//! or not at all: any overlapping booking removes it from the free list.
//!
//! `book_slot` holds a per-item async lock across its read-check-insert so
//! two racing requests for the same item cannot both pass the conflict
//! check.

use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::db::models::{Booking, DayOfWeek, Slot};
use crate::db::{CatalogStore, ItemDetail};
use crate::utils::time::{at_time, overlaps};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Item not found")]
    NotFound,

    #[error("Item is not bookable")]
    NotBookable,

    #[error("Invalid booking time range")]
    InvalidRange,

    #[error("Slot already booked")]
    SlotConflict,

    #[error("Requested time is outside availability")]
    OutsideSchedule,
}

pub struct BookingEngine {
    store: Arc<CatalogStore>,
    /// Per-item write locks, created lazily on first booking attempt
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl std::fmt::Debug for BookingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingEngine")
            .field("locked_items", &self.locks.len())
            .finish()
    }
}

impl BookingEngine {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self {
            store,
            locks: DashMap::new(),
        }
    }

    fn item_lock(&self, item_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(item_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn bookable_detail(&self, item_id: &str) -> Result<ItemDetail, BookingError> {
        let detail = self
            .store
            .item_detail(item_id)
            .filter(ItemDetail::is_visible)
            .ok_or(BookingError::NotFound)?;
        if !detail.item.is_bookable {
            return Err(BookingError::NotBookable);
        }
        Ok(detail)
    }

    /// Free slots for an item on a given date: every availability window for
    /// that weekday with no overlapping booking.
    pub fn available_slots(
        &self,
        item_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Slot>, BookingError> {
        let detail = self.bookable_detail(item_id)?;
        let weekday = DayOfWeek::from(date.weekday());

        let mut slots: Vec<Slot> = detail
            .availabilities
            .iter()
            .filter(|a| a.day_of_week == weekday)
            .map(|a| Slot {
                start_time: at_time(date, a.start_time),
                end_time: at_time(date, a.end_time),
            })
            .filter(|slot| {
                !detail.bookings.iter().any(|b| {
                    overlaps(slot.start_time, slot.end_time, b.start_time, b.end_time)
                })
            })
            .collect();

        slots.sort_by_key(|s| s.start_time);
        Ok(slots)
    }

    /// Reserve [start, end) on an item. The range must sit inside one
    /// availability window for that weekday and not overlap any existing
    /// booking.
    pub async fn book_slot(
        &self,
        item_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        if start >= end {
            return Err(BookingError::InvalidRange);
        }
        // Availability windows are per-day; a range spanning midnight can
        // never sit inside one
        if start.date_naive() != end.date_naive() {
            return Err(BookingError::InvalidRange);
        }

        let lock = self.item_lock(item_id);
        let _guard = lock.lock().await;

        // Re-read under the lock so the conflict check and the insert see
        // the same booking set
        let detail = self.bookable_detail(item_id)?;

        // Conflict is reported before schedule containment
        let conflict = detail
            .bookings
            .iter()
            .any(|b| overlaps(start, end, b.start_time, b.end_time));
        if conflict {
            return Err(BookingError::SlotConflict);
        }

        let weekday = DayOfWeek::from(start.date_naive().weekday());
        let in_schedule = detail.availabilities.iter().any(|a| {
            a.day_of_week == weekday && start.time() >= a.start_time && end.time() <= a.end_time
        });
        if !in_schedule {
            return Err(BookingError::OutsideSchedule);
        }

        let booking = self
            .store
            .insert_booking(Booking::new(item_id, start, end))
            .map_err(|_| BookingError::NotFound)?;

        tracing::info!(
            item_id = %item_id,
            start = %start,
            end = %end,
            "Booking confirmed"
        );
        Ok(booking)
    }
}
