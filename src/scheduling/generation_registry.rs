use log::{info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::activities::PeriodType;
use crate::db::{self, DbPool};
use crate::errors::Result;
use crate::scheduling::provisioning_job::ProvisioningJob;
use crate::scheduling::rewards_reset_job::RewardsResetJob;
use crate::scheduling::rollover_job::RolloverJob;
use crate::scheduling::scheduling_model::JobSpec;
use crate::scheduling::scheduling_traits::JobScheduler;

/// Maps schema generations (applied-migration counts) to the job set that
/// generation introduced.
///
/// Activation is a pure function of the applied count: walking the
/// registered generations in ascending order up to the count, a spec
/// supersedes any same-named spec from an earlier generation, so a
/// generation can replace a job's body or cadence without a duplicate name
/// ever reaching the scheduler. Generations with no registry entry
/// contribute nothing.
pub struct GenerationRegistry {
    generations: BTreeMap<u32, Vec<JobSpec>>,
}

impl GenerationRegistry {
    pub fn new() -> Self {
        GenerationRegistry {
            generations: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, generation: u32, jobs: Vec<JobSpec>) {
        self.generations.entry(generation).or_default().extend(jobs);
    }

    /// The job set active at the given schema generation.
    pub fn active_jobs(&self, applied_count: u32) -> Vec<JobSpec> {
        let mut active: Vec<JobSpec> = Vec::new();

        for (_, jobs) in self.generations.range(..=applied_count) {
            for spec in jobs {
                // Explicit supersession: drop the shadowed spec, append the
                // newer one.
                active.retain(|existing| existing.name != spec.name);
                active.push(spec.clone());
            }
        }

        active
    }

    /// Reads the applied-migration count from the store of record and
    /// installs the active job set on the scheduler. Failing to read the
    /// count disables generation-gated scheduling for this run; it does not
    /// fail startup.
    pub fn install(&self, pool: &DbPool, scheduler: &mut dyn JobScheduler) -> Result<usize> {
        let applied = match db::applied_migration_count(pool) {
            Ok(count) => count as u32,
            Err(e) => {
                warn!(
                    "It was not possible to retrieve the applied migration count: {}; \
                     no generation-gated jobs will run",
                    e
                );
                return Ok(0);
            }
        };

        let jobs = self.active_jobs(applied);
        for spec in &jobs {
            scheduler.remove(&spec.name);
            scheduler.add(&spec.name, &spec.schedule, spec.job.clone())?;
        }

        info!(
            "Installed {} scheduled jobs for schema generation {}",
            jobs.len(),
            applied
        );

        Ok(jobs.len())
    }
}

impl Default for GenerationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in ledger job sets, one registry entry per schema generation.
///
/// Provisioning fires one minute after the paired rollover; that run-after
/// offset is the scheduling contract between the two, the jobs themselves
/// stay safe if a firing lands out of order.
pub fn builtin_registry(pool: &Arc<DbPool>) -> GenerationRegistry {
    let mut registry = GenerationRegistry::new();

    registry.register(
        1,
        vec![
            JobSpec::new(
                "calculate_points",
                "0 6 * * *",
                Arc::new(RolloverJob::new(pool.clone(), PeriodType::Daily)),
            ),
            JobSpec::new(
                "create_daily_entries",
                "1 6 * * *",
                Arc::new(ProvisioningJob::for_every_activity(pool.clone())),
            ),
            JobSpec::new(
                "reset_redeemed_rewards",
                "0 6 * * *",
                Arc::new(RewardsResetJob::new(pool.clone())),
            ),
        ],
    );

    registry.register(
        2,
        vec![
            // One rollover per period table. The daily one supersedes the
            // first-generation calculate_points job of the same name.
            JobSpec::new(
                "calculate_points",
                "0 6 * * *",
                Arc::new(RolloverJob::new(pool.clone(), PeriodType::Daily)),
            ),
            JobSpec::new(
                "close_weekly_entries",
                "0 6 * * 1",
                Arc::new(RolloverJob::new(pool.clone(), PeriodType::Weekly)),
            ),
            JobSpec::new(
                "close_monthly_entries",
                "0 6 1 * *",
                Arc::new(RolloverJob::new(pool.clone(), PeriodType::Monthly)),
            ),
            JobSpec::new(
                "close_yearly_entries",
                "0 6 1 1 *",
                Arc::new(RolloverJob::new(pool.clone(), PeriodType::Yearly)),
            ),
            JobSpec::new(
                "create_daily_entries",
                "1 6 * * *",
                Arc::new(ProvisioningJob::new(pool.clone(), PeriodType::Daily)),
            ),
            JobSpec::new(
                "create_weekly_entries",
                "1 6 * * 1",
                Arc::new(ProvisioningJob::new(pool.clone(), PeriodType::Weekly)),
            ),
            JobSpec::new(
                "create_monthly_entries",
                "1 6 1 * *",
                Arc::new(ProvisioningJob::new(pool.clone(), PeriodType::Monthly)),
            ),
            JobSpec::new(
                "create_yearly_entries",
                "1 6 1 1 *",
                Arc::new(ProvisioningJob::new(pool.clone(), PeriodType::Yearly)),
            ),
        ],
    );

    registry
}
