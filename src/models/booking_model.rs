use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::store::Entity;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub screening_id: Uuid,
    pub number_of_seats: u32,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Entity for Booking {
    const NAME: &'static str = "booking";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()-]*[0-9][0-9 ()-]*$").unwrap());

/// Seats and contact details entered for a new booking.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct BookingRequest {
    #[validate(range(min = 1, message = "at least one seat must be booked"))]
    pub number_of_seats: u32,
    #[validate(email(message = "invalid email", code = "email"))]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_REGEX, message = "invalid phone number", code = "phone"))]
    #[validate(length(min = 3, max = 32, message = "invalid phone number", code = "phone"))]
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl BookingRequest {
    /// Trim contact fields, blank ones count as absent.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            number_of_seats: self.number_of_seats,
            email: clean(self.email),
            phone_number: clean(self.phone_number),
        }
    }

    pub fn has_contact(&self) -> bool {
        self.email.is_some() || self.phone_number.is_some()
    }

    pub fn into_booking(self, screening_id: Uuid) -> Booking {
        Booking {
            id: Uuid::nil(),
            screening_id,
            number_of_seats: self.number_of_seats,
            email: self.email,
            phone_number: self.phone_number,
        }
    }
}
