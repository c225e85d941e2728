use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entries_errors::EntryError;

/// One period's progress record for one activity. The same row shape backs
/// all four period tables, so a single Queryable model covers them.
#[derive(Queryable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub activity_id: String,
    pub progress: i32,
    pub goal: i32,
    pub closed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Entry {
    /// A fresh open entry, goal snapshotted from the owning activity.
    pub fn open(activity_id: &str, goal: i32, now: NaiveDateTime) -> Self {
        Entry {
            id: Uuid::new_v4().to_string(),
            activity_id: activity_id.to_string(),
            progress: 0,
            goal,
            closed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A progress write against an open entry.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EntryUpdate {
    pub id: String,
    pub progress: i32,
}

impl EntryUpdate {
    pub fn validate(&self) -> Result<(), EntryError> {
        if self.progress < 0 {
            return Err(EntryError::InvalidData(
                "Progress cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}
