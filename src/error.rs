//! Crate-wide error type and its HTTP representation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::scheduling::ScheduleError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum Error {
    /// Input is missing or malformed
    #[error("{0}")]
    Validation(String),
    /// Input failed field validation
    #[error(transparent)]
    Invalid(#[from] validator::ValidationErrors),
    /// A referenced entity does not exist
    #[error("{0}")]
    NotFound(String),
    /// The proposed screening cannot be placed
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    /// Persistence failed after retries
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            other => Self::Store(other),
        }
    }
}

impl Error {
    /// Stable identifying code, never reuse a retired one.
    fn code(&self) -> i32 {
        match self {
            Self::Validation(_) => 1,
            Self::Invalid(_) => 2,
            Self::NotFound(_) => 3,
            Self::Schedule(ScheduleError::InvalidMovie(_)) => 4,
            Self::Schedule(ScheduleError::Conflict(_)) => 5,
            Self::Store(_) => 6,
            Self::Schedule(ScheduleError::OutOfRange(_)) => 7,
        }
    }

    fn info(&self) -> Option<serde_json::Value> {
        match self {
            Self::Schedule(ScheduleError::Conflict(conflict)) => {
                serde_json::to_value(conflict).ok()
            }
            Self::Invalid(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Schedule(ScheduleError::InvalidMovie(_) | ScheduleError::OutOfRange(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Schedule(ScheduleError::Conflict(_)) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body shared by HTTP responses and websocket replies.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "message": self.to_string(),
            "code": self.code(),
            "info": self.info(),
        })
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self:?}");
        } else {
            tracing::debug!("{self}");
        }

        (status, axum::Json(self.to_json())).into_response()
    }
}
