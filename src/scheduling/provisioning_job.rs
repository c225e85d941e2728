use chrono::Utc;
use log::{error, info};
use std::sync::Arc;

use crate::activities::{ActivityRepository, PeriodType};
use crate::db::{DbPool, DbTransactionExecutor};
use crate::entries::{Entry, EntryRepository};
use crate::errors::{Error, Result};
use crate::scheduling::scheduling_traits::ScheduledJob;

/// Creates a fresh open entry for every activity of one period that lacks
/// one. Scheduled one minute after the paired rollover; skipping activities
/// that still have an open entry keeps the single-open-entry invariant even
/// when a firing lands out of order.
pub struct ProvisioningJob {
    pool: Arc<DbPool>,
    period: PeriodType,
    every_activity: bool,
}

impl ProvisioningJob {
    pub fn new(pool: Arc<DbPool>, period: PeriodType) -> Self {
        ProvisioningJob {
            pool,
            period,
            every_activity: false,
        }
    }

    /// First-generation variant from before activities carried a period:
    /// provisions a daily entry for every activity.
    pub fn for_every_activity(pool: Arc<DbPool>) -> Self {
        ProvisioningJob {
            pool,
            period: PeriodType::Daily,
            every_activity: true,
        }
    }
}

impl ScheduledJob for ProvisioningJob {
    fn run(&self) -> Result<()> {
        let period = self.period;
        let every_activity = self.every_activity;

        let result = self.pool.execute(|conn| -> std::result::Result<usize, Error> {
            let activities = if every_activity {
                ActivityRepository::list_all(conn)?
            } else {
                ActivityRepository::list_by_period(conn, period)?
            };

            let mut created = 0;
            for activity in &activities {
                if EntryRepository::find_open_for_activity(conn, period, &activity.id)?.is_some() {
                    continue;
                }

                let entry = Entry::open(&activity.id, activity.goal, Utc::now().naive_utc());
                EntryRepository::insert(conn, period, &entry)?;
                created += 1;
            }

            Ok(created)
        });

        match result {
            Ok(created) => {
                info!("Provisioned {} fresh {} entries", created, period);
                Ok(())
            }
            Err(e) => {
                error!(
                    "Provisioning of {} entries failed and was rolled back: {}",
                    period, e
                );
                Err(e)
            }
        }
    }
}
