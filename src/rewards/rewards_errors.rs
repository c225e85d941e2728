use diesel::result::Error as DieselError;
use thiserror::Error;

use crate::users::UserError;

pub type Result<T> = std::result::Result<T, RewardError>;

/// Custom error type for reward-related operations
#[derive(Debug, Error)]
pub enum RewardError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid redemption: {0}")]
    InvalidRedemption(String),
    #[error("Insufficient points: {0}")]
    InsufficientPoints(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for RewardError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RewardError::NotFound("Reward not found".to_string()),
            _ => RewardError::DatabaseError(err.to_string()),
        }
    }
}

// The settlement stage loads and debits the owning user.
impl From<UserError> for RewardError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(msg) => RewardError::NotFound(msg),
            UserError::DatabaseError(msg) => RewardError::DatabaseError(msg),
        }
    }
}

impl From<RewardError> for String {
    fn from(error: RewardError) -> Self {
        error.to_string()
    }
}
