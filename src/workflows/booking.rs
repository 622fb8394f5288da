use uuid::Uuid;
use validator::Validate;

use crate::error::Error;
use crate::models::{Booking, BookingRequest};
use crate::notifications::ScheduleEvent;
use crate::scheduling::BookingContext;
use crate::state::AppState;

/// What the booking form shows for `screening_id`.
pub fn load_context(state: &AppState, screening_id: Uuid) -> Result<BookingContext, Error> {
    Ok(state.query().booking_context(screening_id)?)
}

/// Book seats for an existing screening.
///
/// Capacity is advisory: a booking larger than the remaining seats is
/// accepted and only logged.
pub async fn book_seats(
    state: &AppState,
    screening_id: Uuid,
    request: BookingRequest,
) -> Result<Booking, Error> {
    let request = request.normalized();
    request.validate()?;
    if !request.has_contact() {
        return Err(Error::Validation(
            "enter an email address or a phone number".to_string(),
        ));
    }

    let before = state.query().availability(screening_id)?;
    if request.number_of_seats > before.available {
        tracing::warn!(
            %screening_id,
            requested = request.number_of_seats,
            available = before.available,
            "booking exceeds remaining seats"
        );
    }

    let booking = state.bookings.add(request.into_booking(screening_id)).await?;
    let availability = state.query().availability(screening_id)?;

    tracing::info!(id = %booking.id, %screening_id, seats = booking.number_of_seats, "booking created");
    state.notifier.publish(ScheduleEvent::BookingCreated {
        booking: booking.clone(),
        availability,
    });
    Ok(booking)
}

pub async fn cancel_booking(state: &AppState, id: Uuid) -> Result<Booking, Error> {
    let booking = state
        .bookings
        .delete(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("booking '{id}' not found")))?;

    tracing::info!(%id, screening_id = %booking.screening_id, "booking cancelled");
    state.notifier.publish(ScheduleEvent::BookingDeleted {
        id,
        screening_id: booking.screening_id,
    });
    Ok(booking)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{Cinema, Hall, Screening};
    use crate::scheduling::Availability;

    async fn screening(capacity: u32) -> (AppState, Screening) {
        let state = AppState::in_memory();
        let cinema = state
            .cinemas
            .add(Cinema { id: Uuid::nil(), name: "Bio".to_string(), location: "Aalborg".to_string() })
            .await
            .unwrap();
        let hall = state
            .halls
            .add(Hall { id: Uuid::nil(), name: "Sal 3".to_string(), capacity, cinema_id: cinema.id })
            .await
            .unwrap();
        let screening = state
            .screenings
            .add(Screening {
                id: Uuid::nil(),
                start_time: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap().and_hms_opt(19, 30, 0).unwrap(),
                movie_id: Uuid::new_v4(),
                hall_id: hall.id,
            })
            .await
            .unwrap();
        (state, screening)
    }

    fn request(seats: u32) -> BookingRequest {
        BookingRequest {
            number_of_seats: seats,
            email: Some(" guest@example.com ".to_string()),
            phone_number: None,
        }
    }

    #[tokio::test]
    async fn test_booking_reduces_availability() {
        let (state, screening) = screening(50).await;
        let mut events = state.notifier.subscribe();

        let booking = book_seats(&state, screening.id, request(20)).await.unwrap();
        assert_eq!(booking.email.as_deref(), Some("guest@example.com"));

        let expected = Availability { capacity: 50, booked: 20, available: 30 };
        assert_eq!(load_context(&state, screening.id).unwrap().availability, expected);
        assert_eq!(
            events.try_recv().unwrap(),
            ScheduleEvent::BookingCreated { booking, availability: expected }
        );
    }

    #[tokio::test]
    async fn test_overbooking_is_accepted() {
        let (state, screening) = screening(50).await;

        book_seats(&state, screening.id, request(20)).await.unwrap();
        book_seats(&state, screening.id, request(25)).await.unwrap();
        book_seats(&state, screening.id, request(10)).await.unwrap();

        let availability = state.query().availability(screening.id).unwrap();
        assert_eq!(availability, Availability { capacity: 50, booked: 55, available: 0 });
        assert!(availability.is_sold_out());
    }

    #[tokio::test]
    async fn test_contact_required() {
        let (state, screening) = screening(50).await;
        let req = BookingRequest {
            number_of_seats: 2,
            email: Some("  ".to_string()),
            phone_number: Some(String::new()),
        };

        let err = book_seats(&state, screening.id, req).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(state.bookings.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_input_rejected() {
        let (state, screening) = screening(50).await;

        let err = book_seats(&state, screening.id, request(0)).await.unwrap_err();
        assert!(matches!(err, Error::Invalid(_)));

        let mut bad_email = request(2);
        bad_email.email = Some("nobody".to_string());
        let err = book_seats(&state, screening.id, bad_email).await.unwrap_err();
        assert!(matches!(err, Error::Invalid(_)));

        assert!(state.bookings.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_screening() {
        let (state, _) = screening(50).await;
        let err = book_seats(&state, Uuid::new_v4(), request(2)).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(load_context(&state, Uuid::new_v4()).is_err());
    }

    #[tokio::test]
    async fn test_cancel_frees_seats() {
        let (state, screening) = screening(10).await;
        let booking = book_seats(&state, screening.id, request(4)).await.unwrap();

        cancel_booking(&state, booking.id).await.unwrap();

        assert_eq!(state.query().availability(screening.id).unwrap().available, 10);
        assert!(matches!(cancel_booking(&state, booking.id).await, Err(Error::NotFound(_))));
    }
}
