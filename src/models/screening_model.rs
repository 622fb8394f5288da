use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scheduling::Placement;
use crate::store::Entity;

/// A showing of one movie in one hall.
///
/// Start times are cinema wall-clock times on a single timeline, no zone
/// conversion is ever applied. The end of a screening is derived from the
/// movie's running time and never stored.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Screening {
    pub id: Uuid,
    pub start_time: NaiveDateTime,
    pub movie_id: Uuid,
    pub hall_id: Uuid,
}

impl Screening {
    /// `None` when the end falls outside the representable calendar.
    pub fn end_time(&self, running_time: TimeDelta) -> Option<NaiveDateTime> {
        self.start_time.checked_add_signed(running_time)
    }
}

impl Entity for Screening {
    const NAME: &'static str = "screening";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScreeningUpdate {
    pub movie_id: Uuid,
    pub hall_id: Uuid,
    pub start_time: NaiveDateTime,
}

impl From<ScreeningUpdate> for Placement {
    fn from(input: ScreeningUpdate) -> Self {
        Placement {
            hall_id: input.hall_id,
            movie_id: input.movie_id,
            start: input.start_time,
        }
    }
}
