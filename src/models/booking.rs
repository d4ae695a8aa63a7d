use serde::{Deserialize, Serialize};

/// A flight booking as returned by the resource service. Read-only on the
/// client; never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub status: String,
}

impl Booking {
    /// "Pune -> Delhi" style route string for list display.
    pub fn route(&self) -> String {
        format!("{} -> {}", self.origin, self.destination)
    }

    /// Format the booking date for display, falling back to the raw string
    /// when it is not RFC 3339.
    pub fn date_display(&self) -> String {
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&self.date) {
            dt.format("%b %d, %Y %H:%M").to_string()
        } else {
            self.date.clone()
        }
    }
}

/// Optional query constraints for the bookings endpoint.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub status: Option<String>,
}

impl BookingFilter {
    pub fn is_empty(&self) -> bool {
        self.origin.is_none() && self.destination.is_none() && self.status.is_none()
    }
}
