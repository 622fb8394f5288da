use std::path::Path;

use tokio::sync::{Mutex, MutexGuard};

use crate::models::{Booking, Cinema, Hall, Instructor, Movie, Screening};
use crate::notifications::Notifier;
use crate::scheduling::ScheduleQuery;
use crate::store::{Repository, RetryPolicy, StoreError};

/// Every repository plus the change notifier, shared by all handlers.
#[derive(Debug, Default)]
pub struct AppState {
    pub cinemas: Repository<Cinema>,
    pub halls: Repository<Hall>,
    pub instructors: Repository<Instructor>,
    pub movies: Repository<Movie>,
    pub screenings: Repository<Screening>,
    pub bookings: Repository<Booking>,
    pub notifier: Notifier,
    schedule_lock: Mutex<()>,
}

impl AppState {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load every entity type from its CSV file under `data_dir`.
    pub async fn open(data_dir: &Path, policy: RetryPolicy) -> Result<Self, StoreError> {
        Ok(Self {
            cinemas: Repository::open(data_dir, policy).await?,
            halls: Repository::open(data_dir, policy).await?,
            instructors: Repository::open(data_dir, policy).await?,
            movies: Repository::open(data_dir, policy).await?,
            screenings: Repository::open(data_dir, policy).await?,
            bookings: Repository::open(data_dir, policy).await?,
            notifier: Notifier::default(),
            schedule_lock: Mutex::new(()),
        })
    }

    pub fn query(&self) -> ScheduleQuery<'_> {
        ScheduleQuery::new(self)
    }

    /// Held from validating a screening placement until it is committed,
    /// so two editors cannot both claim the same slot.
    pub async fn lock_schedule(&self) -> MutexGuard<'_, ()> {
        self.schedule_lock.lock().await
    }
}
