use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Entity;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Hall {
    pub id: Uuid,
    pub name: String,
    /// Bookable seats.
    pub capacity: u32,
    pub cinema_id: Uuid,
}

impl Entity for Hall {
    const NAME: &'static str = "hall";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HallUpdate {
    pub name: String,
    pub capacity: u32,
    pub cinema_id: Uuid,
}

impl HallUpdate {
    pub fn into_hall(self, id: Uuid) -> Hall {
        Hall {
            id,
            name: self.name.trim().to_string(),
            capacity: self.capacity,
            cinema_id: self.cinema_id,
        }
    }
}
