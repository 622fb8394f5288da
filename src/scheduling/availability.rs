use serde::Serialize;
use uuid::Uuid;

use crate::models::Booking;

/// Seat counts for one screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub capacity: u32,
    pub booked: u32,
    /// Never negative, saturates at zero once `booked >= capacity`.
    pub available: u32,
}

impl Availability {
    pub fn is_sold_out(&self) -> bool {
        self.available == 0
    }
}

/// Sum the seats of every booking for `screening_id` and compare against
/// the hall's capacity. Bookings for other screenings are ignored.
pub fn compute_availability<'a>(
    screening_id: Uuid,
    capacity: u32,
    bookings: impl IntoIterator<Item = &'a Booking>,
) -> Availability {
    let booked = bookings
        .into_iter()
        .filter(|b| b.screening_id == screening_id)
        .fold(0u32, |sum, b| sum.saturating_add(b.number_of_seats));

    Availability {
        capacity,
        booked,
        available: capacity.saturating_sub(booked),
    }
}
