use chrono::Utc;
use log::{error, info};
use std::sync::Arc;

use crate::activities::{ActivityRepository, PeriodType};
use crate::db::{DbPool, DbTransactionExecutor};
use crate::entries::EntryRepository;
use crate::errors::{Error, Result};
use crate::scheduling::scheduling_traits::ScheduledJob;
use crate::users::UserRepository;

/// Closes every open entry of one period table and credits the points award
/// to the owner of each entry that met its goal.
///
/// The whole sweep runs in one transaction: a failed run leaves no entry
/// closed and no user credited, and the next firing re-selects the same
/// still-open entries. Closed entries are excluded from the selection, so a
/// repeated run after success credits nothing twice.
pub struct RolloverJob {
    pool: Arc<DbPool>,
    period: PeriodType,
}

impl RolloverJob {
    pub fn new(pool: Arc<DbPool>, period: PeriodType) -> Self {
        RolloverJob { pool, period }
    }
}

impl ScheduledJob for RolloverJob {
    fn run(&self) -> Result<()> {
        let period = self.period;

        let result = self
            .pool
            .execute(|conn| -> std::result::Result<(usize, usize), Error> {
                let entries = EntryRepository::load_open(conn, period)?;
                let mut credited = 0;

                for entry in &entries {
                    EntryRepository::mark_closed(conn, period, &entry.id, Utc::now().naive_utc())?;

                    if entry.progress < entry.goal {
                        continue;
                    }

                    let activity = ActivityRepository::find(conn, &entry.activity_id)?;
                    let mut user = UserRepository::find(conn, &activity.user_id)?;
                    user.points += activity.points_award;
                    UserRepository::save(conn, &user)?;
                    credited += 1;
                }

                Ok((entries.len(), credited))
            });

        match result {
            Ok((closed, credited)) => {
                info!(
                    "Rollover closed {} {} entries, credited {} met goals",
                    closed, period, credited
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    "Rollover of {} entries failed and was rolled back: {}",
                    period, e
                );
                Err(e)
            }
        }
    }
}
