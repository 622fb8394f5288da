use bitflags::bitflags;
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Entity;

bitflags! {
    /// Genres of a movie, any combination may be set.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Genre: u32 {
        const ACTION = 1 << 0;
        const ADVENTURE = 1 << 1;
        const BIOGRAPHY = 1 << 2;
        const COMEDY = 1 << 3;
        const CRIME = 1 << 4;
        const DRAMA = 1 << 5;
        const HISTORY = 1 << 6;
        const HORROR = 1 << 7;
        const MUSIC = 1 << 8;
        const MYSTERY = 1 << 9;
        const ROMANCE = 1 << 10;
        const THRILLER = 1 << 11;
        const WAR = 1 << 12;
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    /// Running time in whole minutes.
    pub duration: u32,
    #[serde(default)]
    pub genres: Genre,
    pub premiere_date: NaiveDate,
    #[serde(default)]
    pub instructor_id: Option<Uuid>,
}

impl Movie {
    pub fn running_time(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.duration))
    }

    pub fn has_genre(&self, genre: Genre) -> bool {
        self.genres.contains(genre)
    }

    pub fn add_genre(&mut self, genre: Genre) {
        self.genres.insert(genre);
    }

    pub fn remove_genre(&mut self, genre: Genre) {
        self.genres.remove(genre);
    }
}

impl Entity for Movie {
    const NAME: &'static str = "movie";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MovieUpdate {
    pub title: String,
    pub duration: u32,
    #[serde(default)]
    pub genres: Genre,
    pub premiere_date: NaiveDate,
    #[serde(default)]
    pub instructor_id: Option<Uuid>,
}

impl MovieUpdate {
    pub fn into_movie(self, id: Uuid) -> Movie {
        Movie {
            id,
            title: self.title.trim().to_string(),
            duration: self.duration,
            genres: self.genres,
            premiere_date: self.premiere_date,
            instructor_id: self.instructor_id,
        }
    }
}
