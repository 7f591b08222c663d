//! Availability and booking
//!
//! Turns recurring weekly availability windows into concrete free slots and
//! accepts conflict-free reservations. Booking writes are serialized per
//! item so concurrent requests cannot double-book.

mod engine;

pub use engine::{BookingEngine, BookingError};
