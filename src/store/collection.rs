use dashmap::DashMap;
use uuid::Uuid;

use super::Entity;

/// In-memory entities of one type, keyed by identity.
#[derive(Debug)]
pub struct Collection<T: Entity> {
    items: DashMap<Uuid, T>,
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: DashMap::new(),
        }
    }
}

impl<T: Entity> Collection<T> {
    pub fn get(&self, id: Uuid) -> Option<T> {
        self.items.get(&id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.items.contains_key(&id)
    }

    /// Cloned copy of every entity, in no particular order.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Insert or replace, keyed by the entity's own id.
    pub fn upsert(&self, entity: T) {
        self.items.insert(entity.id(), entity);
    }

    pub fn remove(&self, id: Uuid) -> Option<T> {
        self.items.remove(&id).map(|(_, entity)| entity)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
