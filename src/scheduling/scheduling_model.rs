use std::fmt;
use std::sync::Arc;

use super::scheduling_traits::ScheduledJob;

/// A named job and its cron-style cadence, as handed to the scheduler
/// collaborator. The cadence string is opaque to the engine.
#[derive(Clone)]
pub struct JobSpec {
    pub name: String,
    pub schedule: String,
    pub job: Arc<dyn ScheduledJob>,
}

impl JobSpec {
    pub fn new(
        name: impl Into<String>,
        schedule: impl Into<String>,
        job: Arc<dyn ScheduledJob>,
    ) -> Self {
        JobSpec {
            name: name.into(),
            schedule: schedule.into(),
            job,
        }
    }
}

impl fmt::Debug for JobSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobSpec")
            .field("name", &self.name)
            .field("schedule", &self.schedule)
            .finish_non_exhaustive()
    }
}
