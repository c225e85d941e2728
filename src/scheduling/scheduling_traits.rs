use std::sync::Arc;

use crate::errors::Result;

/// A batch job body. Cadence, threading and non-overlap of firings belong to
/// the scheduler collaborator; the body only promises that one run is one
/// atomic unit against the store.
pub trait ScheduledJob: Send + Sync {
    fn run(&self) -> Result<()>;
}

/// The scheduler collaborator the engine registers its jobs with.
pub trait JobScheduler {
    /// Registers a job under a unique name with a cron-style cadence.
    fn add(&mut self, name: &str, schedule: &str, job: Arc<dyn ScheduledJob>) -> Result<()>;

    /// Removes a previously registered job; unknown names are a no-op.
    fn remove(&mut self, name: &str);
}
