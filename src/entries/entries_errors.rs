use diesel::result::Error as DieselError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EntryError>;

/// Custom error type for entry-related operations
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for EntryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => EntryError::NotFound("Entry not found".to_string()),
            _ => EntryError::DatabaseError(err.to_string()),
        }
    }
}

impl From<EntryError> for String {
    fn from(error: EntryError) -> Self {
        error.to_string()
    }
}
