use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Entity;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Cinema {
    pub id: Uuid,
    pub name: String,
    pub location: String,
}

impl Entity for Cinema {
    const NAME: &'static str = "cinema";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CinemaUpdate {
    pub name: String,
    #[serde(default)]
    pub location: String,
}

impl CinemaUpdate {
    pub fn into_cinema(self, id: Uuid) -> Cinema {
        Cinema {
            id,
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
        }
    }
}
