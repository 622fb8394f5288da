use std::path::Path;

use uuid::Uuid;

use super::{Collection, CsvFile, Entity, RetryPolicy, StoreError};

/// CRUD access to one entity type.
///
/// Mutations are applied in memory first and then written through to the
/// CSV snapshot when one is attached. A failed write is reported to the
/// caller but the in-memory change is kept.
#[derive(Debug)]
pub struct Repository<T: Entity> {
    items: Collection<T>,
    file: Option<CsvFile<T>>,
}

impl<T: Entity> Default for Repository<T> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<T: Entity> Repository<T> {
    pub fn in_memory() -> Self {
        Self {
            items: Collection::default(),
            file: None,
        }
    }

    /// Open the repository backed by `<data_dir>/<name>s.csv`, loading
    /// whatever the file already holds.
    pub async fn open(data_dir: &Path, policy: RetryPolicy) -> Result<Self, StoreError> {
        let file = CsvFile::new(data_dir, policy);
        let items = Collection::default();
        for entity in file.load().await? {
            items.upsert(entity);
        }

        Ok(Self {
            items,
            file: Some(file),
        })
    }

    pub fn get_all(&self) -> Vec<T> {
        self.items.snapshot()
    }

    pub fn get_by_id(&self, id: Uuid) -> Option<T> {
        self.items.get(id)
    }

    /// Like [`Self::get_by_id`] but a missing entity is an error.
    pub fn require(&self, id: Uuid) -> Result<T, StoreError> {
        self.get_by_id(id).ok_or(StoreError::NotFound {
            entity: T::NAME,
            id,
        })
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.items.contains(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Store a new entity, assigning a fresh id when it has none.
    pub async fn add(&self, mut entity: T) -> Result<T, StoreError> {
        if entity.id().is_nil() {
            entity.set_id(Uuid::new_v4());
        }

        self.items.upsert(entity.clone());
        self.persist().await?;

        tracing::debug!(entity = T::NAME, id = %entity.id(), "added");
        Ok(entity)
    }

    /// Replace the stored entity carrying the same id.
    pub async fn update(&self, entity: T) -> Result<T, StoreError> {
        let id = entity.id();
        if !self.items.contains(id) {
            return Err(StoreError::NotFound {
                entity: T::NAME,
                id,
            });
        }

        self.items.upsert(entity.clone());
        self.persist().await?;

        tracing::debug!(entity = T::NAME, %id, "updated");
        Ok(entity)
    }

    /// Remove by id, returning the removed entity. Unknown ids are a no-op.
    pub async fn delete(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        let removed = self.items.remove(id);
        if removed.is_some() {
            self.persist().await?;
            tracing::debug!(entity = T::NAME, %id, "deleted");
        }

        Ok(removed)
    }

    async fn persist(&self) -> Result<(), StoreError> {
        match &self.file {
            Some(file) => file.save(|| self.items.snapshot()).await,
            None => Ok(()),
        }
    }
}
