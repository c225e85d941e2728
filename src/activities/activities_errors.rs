use diesel::result::Error as DieselError;
use thiserror::Error;

use crate::entries::EntryError;

pub type Result<T> = std::result::Result<T, ActivityError>;

/// Custom error type for activity-related operations
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl From<DieselError> for ActivityError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => ActivityError::NotFound("Record not found".to_string()),
            _ => ActivityError::DatabaseError(err.to_string()),
        }
    }
}

// Entry migrations run inside activity updates; their failures surface as
// activity errors without losing the not-found distinction.
impl From<EntryError> for ActivityError {
    fn from(err: EntryError) -> Self {
        match err {
            EntryError::NotFound(msg) => ActivityError::NotFound(msg),
            other => ActivityError::DatabaseError(other.to_string()),
        }
    }
}

impl From<ActivityError> for String {
    fn from(error: ActivityError) -> Self {
        error.to_string()
    }
}
