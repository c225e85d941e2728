use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool};
use crate::rewards::rewards_errors::{Result, RewardError};
use crate::rewards::rewards_model::{NewReward, Reward, RewardUpdate};
use crate::schema::rewards;

pub struct RewardRepository {
    pool: Arc<DbPool>,
}

impl RewardRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        RewardRepository { pool }
    }

    pub fn get_rewards(&self) -> Result<Vec<Reward>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| RewardError::DatabaseError(e.to_string()))?;

        Ok(rewards::table
            .order(rewards::created_at.asc())
            .load::<Reward>(&mut conn)?)
    }

    pub fn get_by_id(&self, reward_id: &str) -> Result<Reward> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| RewardError::DatabaseError(e.to_string()))?;
        Self::find(&mut conn, reward_id)
    }

    pub fn create(&self, mut new_reward: NewReward) -> Result<Reward> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| RewardError::DatabaseError(e.to_string()))?;

        new_reward.validate()?;
        new_reward.id = Some(Uuid::new_v4().to_string());

        Ok(diesel::insert_into(rewards::table)
            .values(&new_reward)
            .returning(rewards::all_columns)
            .get_result(&mut conn)?)
    }

    /// Lookup for use inside a caller-owned transaction.
    pub(crate) fn find(conn: &mut SqliteConnection, reward_id: &str) -> Result<Reward> {
        Ok(rewards::table.find(reward_id).first::<Reward>(conn)?)
    }

    pub(crate) fn update(conn: &mut SqliteConnection, update: &RewardUpdate) -> Result<Reward> {
        diesel::update(rewards::table.find(&update.id))
            .set((
                rewards::name.eq(&update.name),
                rewards::unit_cost.eq(update.unit_cost),
                rewards::redeemed.eq(update.redeemed),
                rewards::used.eq(update.used),
                rewards::max_redeemables.eq(update.max_redeemables),
                rewards::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)?;

        Self::find(conn, &update.id)
    }

    /// Administrative counter reset, the one sanctioned decrease of
    /// `redeemed`. Used by the scheduled reset job, never by the request
    /// pipeline.
    pub(crate) fn reset_all_counters(
        conn: &mut SqliteConnection,
        now: NaiveDateTime,
    ) -> Result<usize> {
        Ok(diesel::update(rewards::table)
            .set((
                rewards::redeemed.eq(0),
                rewards::used.eq(0),
                rewards::updated_at.eq(now),
            ))
            .execute(conn)?)
    }
}
