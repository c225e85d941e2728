use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;
use diesel::Connection;
use log::debug;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::hooks::{Handler, RequestHooks, RequestPhase};
use crate::rewards::rewards_errors::{Result, RewardError};
use crate::rewards::rewards_model::{NewReward, Reward, RewardUpdate};
use crate::rewards::rewards_repository::RewardRepository;
use crate::rewards::rewards_traits::RewardServiceTrait;
use crate::users::UserRepository;

/// Priorities of the redemption stages. The gap leaves room for intermediate
/// stages without re-deriving counter deltas in them.
const CHECK_COUNTERS_PRIORITY: i32 = 0;
const SETTLE_POINTS_PRIORITY: i32 = 2;

pub struct RewardRequestContext {
    pub stored: Reward,
    pub incoming: RewardUpdate,
}

/// Service running the ordered redemption pipeline on reward updates.
///
/// Phase one checks the counters against the stored row; phase two settles
/// the point cost against the owner's balance. Either failing aborts the
/// whole request and nothing persists.
pub struct RewardService {
    pool: Arc<DbPool>,
    hooks: RequestHooks<RewardRequestContext, RewardError>,
}

fn check_counters(_conn: &mut SqliteConnection, ctx: &mut RewardRequestContext) -> Result<()> {
    let stored = &ctx.stored;
    let incoming = &ctx.incoming;

    let delta_redeemed = incoming.redeemed - stored.redeemed;
    if delta_redeemed < 0 {
        return Err(RewardError::InvalidRedemption(
            "Redeemed count cannot decrease".to_string(),
        ));
    }

    if incoming.redeemed > stored.max_redeemables {
        return Err(RewardError::InvalidRedemption(
            "Redeemed count exceeds the max redeemables limit".to_string(),
        ));
    }

    let delta_used = incoming.used - stored.used;
    if delta_used < 0 {
        return Err(RewardError::InvalidRedemption(
            "Used count cannot decrease".to_string(),
        ));
    }

    if incoming.used > stored.redeemed {
        return Err(RewardError::InvalidRedemption(
            "Cannot use more rewards than were redeemed".to_string(),
        ));
    }

    Ok(())
}

fn settle_points(conn: &mut SqliteConnection, ctx: &mut RewardRequestContext) -> Result<()> {
    // Recomputed here on purpose: earlier stages may have touched the stored
    // state, and this stage must price what is actually being claimed now.
    let delta_redeemed = ctx.incoming.redeemed - ctx.stored.redeemed;
    if delta_redeemed == 0 {
        return Ok(());
    }

    let cost = delta_redeemed * ctx.stored.unit_cost;

    let mut user = UserRepository::find(conn, &ctx.stored.user_id)?;
    if user.points < cost {
        return Err(RewardError::InsufficientPoints(format!(
            "Redeeming costs {} points but the balance is {}",
            cost, user.points
        )));
    }

    user.points -= cost;
    UserRepository::save(conn, &user)?;

    debug!(
        "Debited {} points from user {} for reward {}",
        cost, ctx.stored.user_id, ctx.stored.id
    );

    Ok(())
}

impl RewardService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        let mut hooks = RequestHooks::new();
        hooks.bind(
            RequestPhase::Update,
            Handler::new(
                "rewards_check_counters",
                CHECK_COUNTERS_PRIORITY,
                check_counters,
            ),
        );
        hooks.bind(
            RequestPhase::Update,
            Handler::new("rewards_settle_points", SETTLE_POINTS_PRIORITY, settle_points),
        );

        RewardService { pool, hooks }
    }
}

#[async_trait]
impl RewardServiceTrait for RewardService {
    fn get_rewards(&self) -> Result<Vec<Reward>> {
        let repo = RewardRepository::new(self.pool.clone());
        repo.get_rewards()
    }

    fn get_reward(&self, reward_id: &str) -> Result<Reward> {
        let repo = RewardRepository::new(self.pool.clone());
        repo.get_by_id(reward_id)
    }

    async fn create_reward(&self, new_reward: NewReward) -> Result<Reward> {
        let repo = RewardRepository::new(self.pool.clone());
        repo.create(new_reward)
    }

    async fn update_reward(&self, update: RewardUpdate) -> Result<Reward> {
        update.validate()?;

        let mut conn = get_connection(&self.pool)
            .map_err(|e| RewardError::DatabaseError(e.to_string()))?;

        conn.transaction::<Reward, RewardError, _>(|tx_conn| {
            let stored = RewardRepository::find(tx_conn, &update.id)?;

            let mut ctx = RewardRequestContext {
                stored,
                incoming: update.clone(),
            };
            self.hooks.trigger(RequestPhase::Update, tx_conn, &mut ctx)?;

            RewardRepository::update(tx_conn, &update)
        })
    }
}
