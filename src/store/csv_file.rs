use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::retry::{retry_with_backoff, RetryPolicy};
use super::{Entity, StoreError};

/// Durable CSV snapshot of one entity type, `<data_dir>/<name>s.csv`.
///
/// Writes are serialized by a mutex and go through a temporary file that
/// is renamed over the target, so a crash mid-write leaves the previous
/// snapshot intact.
#[derive(Debug)]
pub struct CsvFile<T: Entity> {
    path: PathBuf,
    policy: RetryPolicy,
    lock: Mutex<()>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> CsvFile<T> {
    pub fn new(data_dir: &Path, policy: RetryPolicy) -> Self {
        Self {
            path: data_dir.join(format!("{}s.csv", T::NAME)),
            policy,
            lock: Mutex::new(()),
            _entity: PhantomData,
        }
    }

    /// Read every parseable row. A missing file is an empty snapshot and
    /// malformed rows are skipped.
    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        let _guard = self.lock.lock().await;

        let path = &self.path;
        let bytes = retry_with_backoff(self.policy, StoreError::is_transient, move || async move {
            match tokio::fs::read(path).await {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(StoreError::from(e)),
            }
        })
        .await?;

        let Some(bytes) = bytes else {
            tracing::debug!(path = %self.path.display(), "no snapshot yet");
            return Ok(Vec::new());
        };

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let mut loaded = Vec::new();
        for (row, record) in reader.deserialize::<T>().enumerate() {
            match record {
                Ok(entity) => loaded.push(entity),
                Err(e) => {
                    tracing::warn!(entity = T::NAME, row, error = %e, "skipping malformed row");
                }
            }
        }

        tracing::info!(entity = T::NAME, count = loaded.len(), "loaded snapshot");
        Ok(loaded)
    }

    /// Replace the file with the entities returned by `snapshot`.
    ///
    /// `snapshot` is taken while holding the write lock, so a slower
    /// writer can never overwrite a newer snapshot with an older one.
    pub async fn save(&self, snapshot: impl FnOnce() -> Vec<T>) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        let bytes = encode(&snapshot())?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let path = &self.path;
        let tmp_path = &path.with_extension("csv.tmp");
        let bytes = &bytes;
        retry_with_backoff(self.policy, StoreError::is_transient, move || async move {
            tokio::fs::write(tmp_path, bytes).await?;
            tokio::fs::rename(tmp_path, path).await?;
            Ok::<_, StoreError>(())
        })
        .await
        .inspect_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "failed to write snapshot");
        })
    }
}

fn encode<T: Entity>(entities: &[T]) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for entity in entities {
        writer.serialize(entity)?;
    }
    writer
        .into_inner()
        .map_err(|e| StoreError::Io(e.into_error()))
}
