use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::activities::activities_errors::{ActivityError, Result};
use crate::activities::activities_model::*;
use crate::db::{get_connection, DbPool};
use crate::schema::activities;

/// Repository for managing activity data in the database
pub struct ActivityRepository {
    pool: Arc<DbPool>,
}

impl ActivityRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub fn get_activities(&self) -> Result<Vec<Activity>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;

        activities::table
            .order(activities::created_at.asc())
            .load::<ActivityDB>(&mut conn)?
            .into_iter()
            .map(Activity::try_from)
            .collect()
    }

    pub fn get_by_id(&self, activity_id: &str) -> Result<Activity> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;
        Self::find(&mut conn, activity_id)
    }

    pub fn get_by_period(&self, period: PeriodType) -> Result<Vec<Activity>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;
        Self::list_by_period(&mut conn, period)
    }

    /// Lookup for use inside a caller-owned transaction.
    pub(crate) fn find(conn: &mut SqliteConnection, activity_id: &str) -> Result<Activity> {
        let db = activities::table
            .find(activity_id)
            .first::<ActivityDB>(conn)?;
        Activity::try_from(db)
    }

    pub(crate) fn list_by_period(
        conn: &mut SqliteConnection,
        period: PeriodType,
    ) -> Result<Vec<Activity>> {
        activities::table
            .filter(activities::period_type.eq(period.as_str()))
            .order(activities::created_at.asc())
            .load::<ActivityDB>(conn)?
            .into_iter()
            .map(Activity::try_from)
            .collect()
    }

    /// Every activity regardless of period. Only the first-generation
    /// provisioning job still needs this.
    pub(crate) fn list_all(conn: &mut SqliteConnection) -> Result<Vec<Activity>> {
        activities::table
            .order(activities::created_at.asc())
            .load::<ActivityDB>(conn)?
            .into_iter()
            .map(Activity::try_from)
            .collect()
    }

    pub(crate) fn insert(
        conn: &mut SqliteConnection,
        new_activity: &NewActivity,
    ) -> Result<Activity> {
        let now = Utc::now().naive_utc();
        let db = ActivityDB {
            id: new_activity
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: new_activity.user_id.clone(),
            name: new_activity.name.clone(),
            points_award: new_activity.points_award,
            goal: new_activity.goal,
            created_at: now,
            updated_at: now,
            period_type: new_activity.period_type.as_str().to_string(),
        };

        diesel::insert_into(activities::table)
            .values(&db)
            .execute(conn)?;

        Activity::try_from(db)
    }

    pub(crate) fn update(
        conn: &mut SqliteConnection,
        update: &ActivityUpdate,
    ) -> Result<Activity> {
        let existing = activities::table
            .find(&update.id)
            .first::<ActivityDB>(conn)?;

        let db = ActivityDB {
            id: update.id.clone(),
            user_id: update.user_id.clone(),
            name: update.name.clone(),
            points_award: update.points_award,
            goal: update.goal,
            created_at: existing.created_at,
            updated_at: Utc::now().naive_utc(),
            period_type: update.period_type.as_str().to_string(),
        };

        diesel::update(activities::table.find(&db.id))
            .set(&db)
            .execute(conn)?;

        Activity::try_from(db)
    }

    /// Entries of the activity go with it, through the cascading foreign key.
    pub(crate) fn delete(conn: &mut SqliteConnection, activity_id: &str) -> Result<Activity> {
        let existing = Self::find(conn, activity_id)?;

        diesel::delete(activities::table.find(activity_id)).execute(conn)?;

        Ok(existing)
    }
}
