use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Entity;

/// A director credited on one or more movies.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Instructor {
    pub id: Uuid,
    pub name: String,
}

impl Entity for Instructor {
    const NAME: &'static str = "instructor";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InstructorUpdate {
    pub name: String,
}

impl InstructorUpdate {
    pub fn into_instructor(self, id: Uuid) -> Instructor {
        Instructor {
            id,
            name: self.name.trim().to_string(),
        }
    }
}
