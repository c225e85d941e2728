#![allow(dead_code)]

use std::sync::Arc;

use diesel::prelude::*;
use tempfile::TempDir;

use habitfolio_core::activities::{
    Activity, ActivityService, ActivityServiceTrait, NewActivity, PeriodType,
};
use habitfolio_core::db::{self, DbPool};
use habitfolio_core::entries::{Entry, EntryRepository};
use habitfolio_core::schema::users;
use habitfolio_core::users::{NewUser, User, UserRepository};

/// Fresh database in a temp dir, migrated to the latest generation.
pub fn setup_db() -> (TempDir, Arc<DbPool>) {
    let dir = TempDir::new().expect("temp dir");
    let db_path = db::init(dir.path().to_str().unwrap()).expect("init db");
    let pool = db::create_pool(&db_path).expect("create pool");
    db::run_migrations(&pool).expect("run migrations");
    (dir, pool)
}

pub fn create_user(pool: &Arc<DbPool>, name: &str) -> User {
    UserRepository::new(pool.clone())
        .create(NewUser {
            id: None,
            name: name.to_string(),
        })
        .expect("create user")
}

pub async fn create_activity(
    pool: &Arc<DbPool>,
    user_id: &str,
    name: &str,
    points_award: i32,
    goal: i32,
    period_type: PeriodType,
) -> Activity {
    ActivityService::new(pool.clone())
        .create_activity(NewActivity {
            id: None,
            user_id: user_id.to_string(),
            name: name.to_string(),
            points_award,
            goal,
            period_type,
        })
        .await
        .expect("create activity")
}

/// Test fixture only: balances are normally written by rollover and
/// redemption alone.
pub fn set_points(pool: &Arc<DbPool>, user_id: &str, points: i32) {
    let mut conn = pool.get().expect("connection");
    diesel::update(users::table.find(user_id))
        .set(users::points.eq(points))
        .execute(&mut conn)
        .expect("set points");
}

pub fn user_points(pool: &Arc<DbPool>, user_id: &str) -> i32 {
    UserRepository::new(pool.clone())
        .get_by_id(user_id)
        .expect("get user")
        .points
}

pub fn open_entry(pool: &Arc<DbPool>, period: PeriodType, activity_id: &str) -> Entry {
    EntryRepository::new(pool.clone())
        .get_open_entry_for_activity(period, activity_id)
        .expect("query open entry")
        .expect("an open entry")
}

pub fn open_entry_count(pool: &Arc<DbPool>, period: PeriodType, activity_id: &str) -> usize {
    EntryRepository::new(pool.clone())
        .get_open_entries(period)
        .expect("open entries")
        .iter()
        .filter(|e| e.activity_id == activity_id)
        .count()
}
