pub mod booking_controller;
pub mod cinema_controller;
pub mod hall_controller;
pub mod home_controller;
pub mod instructor_controller;
pub mod movie_controller;
pub mod screening_controller;

use crate::error::Error;

/// Names and titles must contain something besides whitespace.
fn require_text(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn not_found(entity: &str, id: uuid::Uuid) -> Error {
    Error::NotFound(format!("{entity} '{id}' not found"))
}
