use chrono::Utc;
use log::{error, info};
use std::sync::Arc;

use crate::db::{DbPool, DbTransactionExecutor};
use crate::errors::Result;
use crate::rewards::RewardRepository;
use crate::scheduling::scheduling_traits::ScheduledJob;

/// Administrative reset of the redemption counters on every reward. The one
/// sanctioned decrease of `redeemed`; it bypasses the request pipeline.
pub struct RewardsResetJob {
    pool: Arc<DbPool>,
}

impl RewardsResetJob {
    pub fn new(pool: Arc<DbPool>) -> Self {
        RewardsResetJob { pool }
    }
}

impl ScheduledJob for RewardsResetJob {
    fn run(&self) -> Result<()> {
        let result = self
            .pool
            .execute(|conn| RewardRepository::reset_all_counters(conn, Utc::now().naive_utc()));

        match result {
            Ok(count) => {
                info!("Reset redemption counters on {} rewards", count);
                Ok(())
            }
            Err(e) => {
                error!("Reward counter reset failed and was rolled back: {}", e);
                Err(e)
            }
        }
    }
}
