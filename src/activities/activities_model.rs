use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::activities_errors::ActivityError;

/// The period granularity an activity is tracked at. Stored as text; one
/// entry table exists per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl PeriodType {
    pub const ALL: [PeriodType; 4] = [
        PeriodType::Daily,
        PeriodType::Weekly,
        PeriodType::Monthly,
        PeriodType::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Daily => "daily",
            PeriodType::Weekly => "weekly",
            PeriodType::Monthly => "monthly",
            PeriodType::Yearly => "yearly",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(PeriodType::Daily),
            "weekly" => Ok(PeriodType::Weekly),
            "monthly" => Ok(PeriodType::Monthly),
            "yearly" => Ok(PeriodType::Yearly),
            other => Err(ActivityError::InvalidData(format!(
                "Unknown period type '{}'",
                other
            ))),
        }
    }
}

/// Database model for activities
#[derive(
    Queryable,
    Insertable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::activities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ActivityDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub points_award: i32,
    pub goal: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub period_type: String,
}

/// Domain model with the period decoded.
#[derive(PartialEq, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub points_award: i32,
    pub goal: i32,
    pub period_type: PeriodType,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ActivityDB> for Activity {
    type Error = ActivityError;

    fn try_from(db: ActivityDB) -> Result<Self, Self::Error> {
        let period_type = PeriodType::from_str(&db.period_type)?;
        Ok(Activity {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            points_award: db.points_award,
            goal: db.goal,
            period_type,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

/// Model for creating a new activity
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub points_award: i32,
    pub goal: i32,
    pub period_type: PeriodType,
}

impl NewActivity {
    pub fn validate(&self) -> Result<(), ActivityError> {
        if self.name.trim().is_empty() {
            return Err(ActivityError::InvalidData(
                "Activity name is required".to_string(),
            ));
        }
        if self.points_award < 0 {
            return Err(ActivityError::InvalidData(
                "Points award cannot be negative".to_string(),
            ));
        }
        if self.goal < 1 {
            return Err(ActivityError::InvalidData(
                "Goal must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Model for updating an existing activity
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUpdate {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub points_award: i32,
    pub goal: i32,
    pub period_type: PeriodType,
}

impl ActivityUpdate {
    pub fn validate(&self) -> Result<(), ActivityError> {
        if self.name.trim().is_empty() {
            return Err(ActivityError::InvalidData(
                "Activity name is required".to_string(),
            ));
        }
        if self.points_award < 0 {
            return Err(ActivityError::InvalidData(
                "Points award cannot be negative".to_string(),
            ));
        }
        if self.goal < 1 {
            return Err(ActivityError::InvalidData(
                "Goal must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
