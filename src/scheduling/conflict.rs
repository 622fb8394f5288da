use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Screening;

/// Minimum turnaround between two screenings in the same hall, applied
/// before the start and after the end of every existing screening.
pub const TURNAROUND_MINUTES: i64 = 30;

/// Where and when a screening is proposed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub hall_id: Uuid,
    pub movie_id: Uuid,
    pub start: NaiveDateTime,
}

/// The existing screening a proposal collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleConflict {
    pub screening_id: Uuid,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid movie '{0}'")]
    InvalidMovie(Uuid),
    #[error("start time {0} is out of range")]
    OutOfRange(NaiveDateTime),
    #[error(
        "hall conflict: existing screening {} - {} (requires a {} minute break)",
        .0.start.format("%d-%m-%Y %H:%M"),
        .0.end.format("%H:%M"),
        TURNAROUND_MINUTES
    )]
    Conflict(ScheduleConflict),
}

/// Check `placement` against the screenings already scheduled.
///
/// `existing` may contain screenings of any hall; only those in the
/// placement's hall are considered, minus `exclude` (the screening being
/// edited). `duration_of` resolves a movie's running time in minutes.
/// The proposed movie must resolve; an existing screening whose movie no
/// longer resolves occupies a zero-length interval.
///
/// A conflict exists when `[start, start + duration)` intersects
/// `[s.start - turnaround, s.end + turnaround)` for some existing `s`.
/// Touching intervals do not conflict. The first conflict found is
/// returned.
pub fn validate_placement<'a>(
    exclude: Option<Uuid>,
    placement: &Placement,
    duration_of: impl Fn(Uuid) -> Option<u32>,
    existing: impl IntoIterator<Item = &'a Screening>,
) -> Result<(), ScheduleError> {
    let minutes = |m: u32| TimeDelta::minutes(i64::from(m));
    let turnaround = TimeDelta::minutes(TURNAROUND_MINUTES);

    let duration = duration_of(placement.movie_id)
        .ok_or(ScheduleError::InvalidMovie(placement.movie_id))?;
    let proposed_start = placement.start;
    let proposed_end = proposed_start
        .checked_add_signed(minutes(duration))
        .ok_or(ScheduleError::OutOfRange(proposed_start))?;

    let candidates = existing
        .into_iter()
        .filter(|s| s.hall_id == placement.hall_id && Some(s.id) != exclude);

    for s in candidates {
        // saturate at the calendar bounds for screenings stored near them
        let s_end = s
            .end_time(minutes(duration_of(s.movie_id).unwrap_or(0)))
            .unwrap_or(NaiveDateTime::MAX);
        let padded_start = s
            .start_time
            .checked_sub_signed(turnaround)
            .unwrap_or(NaiveDateTime::MIN);
        let padded_end = s_end.checked_add_signed(turnaround).unwrap_or(NaiveDateTime::MAX);

        if proposed_start < padded_end && proposed_end > padded_start {
            let conflict = ScheduleConflict {
                screening_id: s.id,
                start: s.start_time,
                end: s_end,
            };
            tracing::debug!(?placement, ?conflict, "screening placement rejected");
            return Err(ScheduleError::Conflict(conflict));
        }
    }

    Ok(())
}
