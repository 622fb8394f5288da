//! Creating, moving and removing screenings.
//!
//! The free functions are the only way screenings are mutated: they run
//! the placement check and commit under the schedule lock, then notify
//! subscribers. [`ScreeningEditor`] is the add/edit form built on top.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::models::{Hall, Screening};
use crate::notifications::ScheduleEvent;
use crate::scheduling::{validate_placement, Placement};
use crate::state::AppState;

pub const DEFAULT_START_TIME: &str = "12:00";

/// Store a new screening if it fits the hall's schedule.
pub async fn create_screening(state: &AppState, placement: Placement) -> Result<Screening, Error> {
    let _guard = state.lock_schedule().await;

    check_placement(state, None, &placement)?;
    let screening = state
        .screenings
        .add(Screening {
            id: Uuid::nil(),
            start_time: placement.start,
            movie_id: placement.movie_id,
            hall_id: placement.hall_id,
        })
        .await?;

    tracing::info!(id = %screening.id, hall = %screening.hall_id, start = %screening.start_time, "screening created");
    state.notifier.publish(ScheduleEvent::ScreeningSaved {
        screening: screening.clone(),
    });
    Ok(screening)
}

/// Move an existing screening, checked against every other screening.
pub async fn update_screening(
    state: &AppState,
    id: Uuid,
    placement: Placement,
) -> Result<Screening, Error> {
    let _guard = state.lock_schedule().await;

    let mut screening = state.screenings.require(id)?;
    check_placement(state, Some(id), &placement)?;

    screening.start_time = placement.start;
    screening.movie_id = placement.movie_id;
    screening.hall_id = placement.hall_id;
    let screening = state.screenings.update(screening).await?;

    tracing::info!(%id, hall = %screening.hall_id, start = %screening.start_time, "screening updated");
    state.notifier.publish(ScheduleEvent::ScreeningSaved {
        screening: screening.clone(),
    });
    Ok(screening)
}

/// Remove a screening. Its bookings are left in place.
pub async fn delete_screening(state: &AppState, id: Uuid) -> Result<Screening, Error> {
    let _guard = state.lock_schedule().await;

    let screening = state
        .screenings
        .delete(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("screening '{id}' not found")))?;

    tracing::info!(%id, "screening deleted");
    state.notifier.publish(ScheduleEvent::ScreeningDeleted { id });
    Ok(screening)
}

fn check_placement(state: &AppState, exclude: Option<Uuid>, placement: &Placement) -> Result<(), Error> {
    if !state.halls.contains(placement.hall_id) {
        return Err(Error::Validation(format!("invalid hall '{}'", placement.hall_id)));
    }

    let query = state.query();
    validate_placement(
        exclude,
        placement,
        |movie_id| query.movie_duration(movie_id),
        &state.screenings.get_all(),
    )?;
    Ok(())
}

/// Parse an `HH:MM` time of day.
pub fn parse_start_time(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "screening_id", rename_all = "snake_case")]
pub enum EditorMode {
    Add,
    Edit(Uuid),
}

/// Current contents of the screening form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreeningForm {
    pub mode: EditorMode,
    pub cinema_id: Option<Uuid>,
    pub hall_id: Option<Uuid>,
    pub movie_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub start_time: String,
    pub error: Option<String>,
}

impl Default for ScreeningForm {
    fn default() -> Self {
        Self {
            mode: EditorMode::Add,
            cinema_id: None,
            hall_id: None,
            movie_id: None,
            date: None,
            start_time: DEFAULT_START_TIME.to_string(),
            error: None,
        }
    }
}

/// Field changes sent by the frontend. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScreeningDraft {
    pub cinema_id: Option<Uuid>,
    pub hall_id: Option<Uuid>,
    pub movie_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
}

/// Add/edit form for one screening.
///
/// In add mode a submit creates a screening and clears the hall, movie
/// and time for the next entry. Loading a screening switches to edit
/// mode, where a submit moves that screening and delete removes it.
/// A rejected submit keeps the mode and fields and records the error.
pub struct ScreeningEditor {
    state: Arc<AppState>,
    form: ScreeningForm,
}

impl ScreeningEditor {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            form: ScreeningForm::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn form(&self) -> &ScreeningForm {
        &self.form
    }

    pub fn mode(&self) -> EditorMode {
        self.form.mode
    }

    /// Picking another cinema clears the hall, which must belong to it.
    pub fn select_cinema(&mut self, cinema_id: Option<Uuid>) {
        if self.form.cinema_id != cinema_id {
            self.form.cinema_id = cinema_id;
            self.form.hall_id = None;
        }
    }

    pub fn select_hall(&mut self, hall_id: Option<Uuid>) {
        self.form.hall_id = hall_id;
    }

    pub fn select_movie(&mut self, movie_id: Option<Uuid>) {
        self.form.movie_id = movie_id;
    }

    pub fn select_date(&mut self, date: Option<NaiveDate>) {
        self.form.date = date;
    }

    pub fn set_start_time(&mut self, start_time: impl Into<String>) {
        self.form.start_time = start_time.into();
    }

    pub fn apply(&mut self, draft: ScreeningDraft) {
        if draft.cinema_id.is_some() {
            self.select_cinema(draft.cinema_id);
        }
        if draft.hall_id.is_some() {
            self.select_hall(draft.hall_id);
        }
        if draft.movie_id.is_some() {
            self.select_movie(draft.movie_id);
        }
        if draft.date.is_some() {
            self.select_date(draft.date);
        }
        if let Some(start_time) = draft.start_time {
            self.set_start_time(start_time);
        }
    }

    /// Halls selectable for the chosen cinema.
    pub fn hall_options(&self) -> Vec<Hall> {
        self.state.query().halls_for_cinema(self.form.cinema_id)
    }

    pub fn can_submit(&self) -> bool {
        self.placement().is_ok()
    }

    /// Switch to edit mode for `id`. An unknown id resets the form.
    pub fn load(&mut self, id: Uuid) -> Result<(), Error> {
        let Some(screening) = self.state.screenings.get_by_id(id) else {
            return Err(self.fail_and_reset(Error::NotFound(format!("screening '{id}' not found"))));
        };

        let cinema_id = self
            .state
            .halls
            .get_by_id(screening.hall_id)
            .map(|h| h.cinema_id);

        self.form = ScreeningForm {
            mode: EditorMode::Edit(id),
            cinema_id,
            hall_id: Some(screening.hall_id),
            movie_id: Some(screening.movie_id),
            date: Some(screening.start_time.date()),
            start_time: screening.start_time.format("%H:%M").to_string(),
            error: None,
        };
        Ok(())
    }

    pub async fn submit(&mut self) -> Result<Screening, Error> {
        let placement = match self.placement() {
            Ok(placement) => placement,
            Err(e) => return Err(self.fail(e)),
        };

        match self.form.mode {
            EditorMode::Add => match create_screening(&self.state, placement).await {
                Ok(screening) => {
                    self.form.hall_id = None;
                    self.form.movie_id = None;
                    self.form.start_time = DEFAULT_START_TIME.to_string();
                    self.form.error = None;
                    Ok(screening)
                }
                Err(e) => Err(self.fail(e)),
            },
            EditorMode::Edit(id) => match update_screening(&self.state, id, placement).await {
                Ok(screening) => {
                    self.form.error = None;
                    Ok(screening)
                }
                Err(e @ Error::NotFound(_)) => Err(self.fail_and_reset(e)),
                Err(e) => Err(self.fail(e)),
            },
        }
    }

    /// Delete the screening being edited and return to add mode.
    pub async fn delete(&mut self) -> Result<Screening, Error> {
        let EditorMode::Edit(id) = self.form.mode else {
            return Err(self.fail(Error::Validation("no screening selected".to_string())));
        };

        match delete_screening(&self.state, id).await {
            Ok(screening) => {
                self.reset();
                Ok(screening)
            }
            Err(e @ Error::NotFound(_)) => Err(self.fail_and_reset(e)),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Back to an empty add form, nothing is persisted.
    pub fn reset(&mut self) {
        self.form = ScreeningForm::default();
    }

    fn placement(&self) -> Result<Placement, Error> {
        let missing = |what: &str| Error::Validation(format!("select a {what}"));

        let cinema_id = self.form.cinema_id.ok_or_else(|| missing("cinema"))?;
        let hall_id = self.form.hall_id.ok_or_else(|| missing("hall"))?;
        let movie_id = self.form.movie_id.ok_or_else(|| missing("movie"))?;
        let date = self.form.date.ok_or_else(|| missing("date"))?;
        let time = parse_start_time(&self.form.start_time).ok_or_else(|| {
            Error::Validation(format!("invalid start time '{}', expected HH:MM", self.form.start_time))
        })?;

        if let Some(hall) = self.state.halls.get_by_id(hall_id) {
            if hall.cinema_id != cinema_id {
                return Err(Error::Validation("hall does not belong to the selected cinema".to_string()));
            }
        }

        Ok(Placement {
            hall_id,
            movie_id,
            start: date.and_time(time),
        })
    }

    fn fail(&mut self, err: Error) -> Error {
        self.form.error = Some(err.to_string());
        err
    }

    fn fail_and_reset(&mut self, err: Error) -> Error {
        self.reset();
        self.fail(err)
    }
}
