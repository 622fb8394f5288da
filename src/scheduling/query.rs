use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::availability::{compute_availability, Availability};
use crate::models::{Hall, Screening};
use crate::state::AppState;
use crate::store::StoreError;

const UNKNOWN: &str = "(unknown)";

/// Narrow a screening listing. Every set field must match.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScreeningFilter {
    pub cinema_id: Option<Uuid>,
    pub hall_id: Option<Uuid>,
    pub movie_id: Option<Uuid>,
    /// Only screenings starting on or after this date.
    pub from: Option<NaiveDate>,
}

/// A screening joined with the names of everything it references.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScreeningRow {
    pub id: Uuid,
    pub cinema_id: Option<Uuid>,
    pub cinema_name: String,
    pub hall_id: Uuid,
    pub hall_name: String,
    pub movie_id: Uuid,
    pub movie_title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub availability: Availability,
}

/// Everything shown while booking seats for one screening.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BookingContext {
    pub screening: Screening,
    pub cinema_name: String,
    pub hall_name: String,
    pub movie_title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub availability: Availability,
}

/// Read-side lookups across cinemas, halls, movies, screenings and
/// bookings. Always reads the current repository contents, nothing is
/// cached between calls.
pub struct ScheduleQuery<'a> {
    state: &'a AppState,
}

impl<'a> ScheduleQuery<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Running time in minutes, `None` when the movie does not exist.
    pub fn movie_duration(&self, movie_id: Uuid) -> Option<u32> {
        self.state.movies.get_by_id(movie_id).map(|m| m.duration)
    }

    /// Halls of `cinema_id`, or all halls, ordered by name.
    pub fn halls_for_cinema(&self, cinema_id: Option<Uuid>) -> Vec<Hall> {
        let mut halls: Vec<Hall> = self
            .state
            .halls
            .get_all()
            .into_iter()
            .filter(|h| cinema_id.is_none_or(|c| h.cinema_id == c))
            .collect();
        halls.sort_by(|a, b| a.name.cmp(&b.name));
        halls
    }

    /// Seat availability for an existing screening. A hall that no longer
    /// exists has no capacity.
    pub fn availability(&self, screening_id: Uuid) -> Result<Availability, StoreError> {
        let screening = self.state.screenings.require(screening_id)?;
        Ok(self.availability_of(&screening))
    }

    pub fn screening_rows(&self, filter: &ScreeningFilter) -> Vec<ScreeningRow> {
        let mut rows: Vec<ScreeningRow> = self
            .state
            .screenings
            .get_all()
            .iter()
            .filter(|s| filter.hall_id.is_none_or(|h| s.hall_id == h))
            .filter(|s| filter.movie_id.is_none_or(|m| s.movie_id == m))
            .filter(|s| filter.from.is_none_or(|d| s.start_time.date() >= d))
            .map(|s| self.row(s))
            .filter(|row| filter.cinema_id.is_none_or(|c| row.cinema_id == Some(c)))
            .collect();

        rows.sort_by(|a, b| {
            a.cinema_name
                .cmp(&b.cinema_name)
                .then_with(|| a.hall_name.cmp(&b.hall_name))
                .then_with(|| a.start_time.cmp(&b.start_time))
        });
        rows
    }

    pub fn screening_row(&self, screening_id: Uuid) -> Result<ScreeningRow, StoreError> {
        let screening = self.state.screenings.require(screening_id)?;
        Ok(self.row(&screening))
    }

    pub fn booking_context(&self, screening_id: Uuid) -> Result<BookingContext, StoreError> {
        let screening = self.state.screenings.require(screening_id)?;
        let row = self.row(&screening);

        Ok(BookingContext {
            screening,
            cinema_name: row.cinema_name,
            hall_name: row.hall_name,
            movie_title: row.movie_title,
            start_time: row.start_time,
            end_time: row.end_time,
            availability: row.availability,
        })
    }

    fn availability_of(&self, screening: &Screening) -> Availability {
        let capacity = self
            .state
            .halls
            .get_by_id(screening.hall_id)
            .map_or(0, |h| h.capacity);
        compute_availability(screening.id, capacity, &self.state.bookings.get_all())
    }

    fn row(&self, screening: &Screening) -> ScreeningRow {
        let hall = self.state.halls.get_by_id(screening.hall_id);
        let cinema = hall
            .as_ref()
            .and_then(|h| self.state.cinemas.get_by_id(h.cinema_id));
        let movie = self.state.movies.get_by_id(screening.movie_id);

        let running_time = movie.as_ref().map(|m| m.running_time()).unwrap_or_default();

        ScreeningRow {
            id: screening.id,
            cinema_id: cinema.as_ref().map(|c| c.id),
            cinema_name: cinema.map_or_else(|| UNKNOWN.to_string(), |c| c.name),
            hall_id: screening.hall_id,
            hall_name: hall.map_or_else(|| UNKNOWN.to_string(), |h| h.name),
            movie_id: screening.movie_id,
            movie_title: movie.map_or_else(|| UNKNOWN.to_string(), |m| m.title),
            start_time: screening.start_time,
            end_time: screening.end_time(running_time).unwrap_or(NaiveDateTime::MAX),
            availability: self.availability_of(screening),
        }
    }
}
