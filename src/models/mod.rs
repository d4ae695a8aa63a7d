//! Data models for GateReady entities.
//!
//! - `Booking`, `BookingFilter`: flight bookings and their query constraints
//! - `Message`, `Role`: the in-memory chat transcript

pub mod booking;
pub mod chat;

pub use booking::{Booking, BookingFilter};
pub use chat::{Message, Role};
