use async_trait::async_trait;
use chrono::Utc;
use diesel::sqlite::SqliteConnection;
use diesel::Connection;
use log::debug;
use std::sync::Arc;

use crate::activities::activities_errors::{ActivityError, Result};
use crate::activities::activities_model::{Activity, ActivityUpdate, NewActivity, PeriodType};
use crate::activities::activities_repository::ActivityRepository;
use crate::activities::activities_traits::ActivityServiceTrait;
use crate::db::{get_connection, DbPool};
use crate::entries::{Entry, EntryRepository};
use crate::hooks::{Handler, RequestHooks, RequestPhase};

pub struct ActivityRequestContext {
    pub stored: Activity,
    pub incoming: ActivityUpdate,
}

/// Service for managing activities.
///
/// Creating an activity seeds its first open entry in the same transaction.
/// Updates run through the activity hooks: the owner guard first, then the
/// period-migration stage that moves the open entry between period tables.
pub struct ActivityService {
    pool: Arc<DbPool>,
    hooks: RequestHooks<ActivityRequestContext, ActivityError>,
}

fn reject_owner_change(
    _conn: &mut SqliteConnection,
    ctx: &mut ActivityRequestContext,
) -> Result<()> {
    if ctx.incoming.user_id != ctx.stored.user_id {
        return Err(ActivityError::Forbidden(
            "Cannot change activity owner".to_string(),
        ));
    }
    Ok(())
}

/// Moves the single open entry of the activity from the old period table to
/// the new one, progress and goal carried over. Not finding one is an error:
/// every activity has exactly one open entry between job runs, and silently
/// skipping here would leave the activity without any after the switch.
fn migrate_open_entry(
    conn: &mut SqliteConnection,
    ctx: &mut ActivityRequestContext,
) -> Result<()> {
    let old_period = ctx.stored.period_type;
    let new_period = ctx.incoming.period_type;
    if old_period == new_period {
        return Ok(());
    }

    let open = EntryRepository::find_open_for_activity(conn, old_period, &ctx.stored.id)?
        .ok_or_else(|| {
            ActivityError::NotFound(format!(
                "No open {} entry for activity {}",
                old_period, ctx.stored.id
            ))
        })?;

    let now = Utc::now().naive_utc();
    let mut moved = Entry::open(&ctx.stored.id, open.goal, now);
    moved.progress = open.progress;

    EntryRepository::insert(conn, new_period, &moved)?;
    EntryRepository::delete(conn, old_period, &open.id)?;

    debug!(
        "Migrated open entry of activity {} from {} to {}",
        ctx.stored.id, old_period, new_period
    );

    Ok(())
}

impl ActivityService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        let mut hooks = RequestHooks::new();
        hooks.bind(
            RequestPhase::Update,
            Handler::new("activities_reject_owner_change", 0, reject_owner_change),
        );
        hooks.bind(
            RequestPhase::Update,
            Handler::new("activities_migrate_open_entry", 1, migrate_open_entry),
        );

        ActivityService { pool, hooks }
    }
}

#[async_trait]
impl ActivityServiceTrait for ActivityService {
    fn get_activities(&self) -> Result<Vec<Activity>> {
        let repo = ActivityRepository::new(self.pool.clone());
        repo.get_activities()
    }

    fn get_activity(&self, activity_id: &str) -> Result<Activity> {
        let repo = ActivityRepository::new(self.pool.clone());
        repo.get_by_id(activity_id)
    }

    fn get_activities_by_period(&self, period: PeriodType) -> Result<Vec<Activity>> {
        let repo = ActivityRepository::new(self.pool.clone());
        repo.get_by_period(period)
    }

    async fn create_activity(&self, new_activity: NewActivity) -> Result<Activity> {
        new_activity.validate()?;

        let mut conn = get_connection(&self.pool)
            .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;

        conn.transaction::<Activity, ActivityError, _>(|tx_conn| {
            let activity = ActivityRepository::insert(tx_conn, &new_activity)?;

            // Seed the first entry right away rather than waiting for the
            // next provisioning tick.
            let entry = Entry::open(&activity.id, activity.goal, Utc::now().naive_utc());
            EntryRepository::insert(tx_conn, activity.period_type, &entry)?;

            Ok(activity)
        })
    }

    async fn update_activity(&self, update: ActivityUpdate) -> Result<Activity> {
        update.validate()?;

        let mut conn = get_connection(&self.pool)
            .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;

        conn.transaction::<Activity, ActivityError, _>(|tx_conn| {
            let stored = ActivityRepository::find(tx_conn, &update.id)?;

            let mut ctx = ActivityRequestContext {
                stored,
                incoming: update.clone(),
            };
            self.hooks.trigger(RequestPhase::Update, tx_conn, &mut ctx)?;

            ActivityRepository::update(tx_conn, &update)
        })
    }

    async fn delete_activity(&self, activity_id: String) -> Result<Activity> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;

        conn.transaction::<Activity, ActivityError, _>(|tx_conn| {
            ActivityRepository::delete(tx_conn, &activity_id)
        })
    }
}
