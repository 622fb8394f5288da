//! Keyed entity storage.
//!
//! A [`Repository`] is an in-memory [`Collection`] optionally backed by a
//! [`CsvFile`] snapshot. Scheduling code only ever sees the repository's
//! CRUD surface, never the file format.

mod collection;
mod csv_file;
mod repository;
pub mod retry;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub use collection::Collection;
pub use csv_file::CsvFile;
pub use repository::Repository;
pub use retry::RetryPolicy;

/// A stored record with a stable identity.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Singular lowercase name, used for file names and error messages.
    const NAME: &'static str;

    fn id(&self) -> Uuid;

    fn set_id(&mut self, id: Uuid);
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: Uuid },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl StoreError {
    /// I/O failures may clear up on their own (file briefly locked by
    /// another process), everything else will fail the same way again.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
