//! Screening placement rules and seat availability.

pub mod availability;
pub mod conflict;
pub mod query;

pub use availability::{compute_availability, Availability};
pub use conflict::{validate_placement, Placement, ScheduleConflict, ScheduleError, TURNAROUND_MINUTES};
pub use query::{BookingContext, ScheduleQuery, ScreeningFilter, ScreeningRow};
