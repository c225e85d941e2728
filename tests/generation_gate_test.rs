mod common;

use std::sync::Arc;

use habitfolio_core::db;
use habitfolio_core::scheduling::{
    builtin_registry, GenerationRegistry, JobScheduler, JobSpec, ScheduledJob,
};

use common::setup_db;

struct NoopJob;

impl ScheduledJob for NoopJob {
    fn run(&self) -> habitfolio_core::Result<()> {
        Ok(())
    }
}

/// Records what the gate asks of the scheduler collaborator.
#[derive(Default)]
struct RecordingScheduler {
    added: Vec<(String, String)>,
    removed: Vec<String>,
}

impl JobScheduler for RecordingScheduler {
    fn add(
        &mut self,
        name: &str,
        schedule: &str,
        _job: Arc<dyn ScheduledJob>,
    ) -> habitfolio_core::Result<()> {
        self.added.push((name.to_string(), schedule.to_string()));
        Ok(())
    }

    fn remove(&mut self, name: &str) {
        self.removed.push(name.to_string());
    }
}

#[test]
fn migrated_database_reports_two_generations() {
    let (_dir, pool) = setup_db();
    assert_eq!(db::applied_migration_count(&pool).unwrap(), 2);
}

#[test]
fn install_registers_the_superseded_job_exactly_once() {
    let (_dir, pool) = setup_db();

    let mut registry = GenerationRegistry::new();
    registry.register(
        1,
        vec![JobSpec::new("calculate_points", "0 6 * * *", Arc::new(NoopJob))],
    );
    registry.register(
        2,
        vec![JobSpec::new("calculate_points", "0 7 * * *", Arc::new(NoopJob))],
    );

    let mut scheduler = RecordingScheduler::default();
    let installed = registry.install(&pool, &mut scheduler).unwrap();

    assert_eq!(installed, 1);
    assert_eq!(
        scheduler.added,
        vec![("calculate_points".to_string(), "0 7 * * *".to_string())]
    );
    // Supersession removes the old name before adding the new schedule.
    assert_eq!(scheduler.removed, vec!["calculate_points".to_string()]);
}

#[test]
fn jobs_from_future_generations_are_not_installed() {
    let (_dir, pool) = setup_db();

    let mut registry = GenerationRegistry::new();
    registry.register(
        2,
        vec![JobSpec::new("close_entries", "0 6 * * *", Arc::new(NoopJob))],
    );
    registry.register(
        3,
        vec![JobSpec::new("not_yet", "0 6 * * *", Arc::new(NoopJob))],
    );

    let mut scheduler = RecordingScheduler::default();
    registry.install(&pool, &mut scheduler).unwrap();

    let names: Vec<&str> = scheduler.added.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["close_entries"]);
}

#[test]
fn builtin_registry_installs_the_full_second_generation_set() {
    let (_dir, pool) = setup_db();

    let registry = builtin_registry(&pool);
    let mut scheduler = RecordingScheduler::default();
    let installed = registry.install(&pool, &mut scheduler).unwrap();

    assert_eq!(installed, 9);

    let names: Vec<&str> = scheduler.added.iter().map(|(n, _)| n.as_str()).collect();
    assert!(names.contains(&"calculate_points"));
    assert!(names.contains(&"close_weekly_entries"));
    assert!(names.contains(&"close_monthly_entries"));
    assert!(names.contains(&"close_yearly_entries"));
    assert!(names.contains(&"create_daily_entries"));
    assert!(names.contains(&"create_yearly_entries"));
    assert!(names.contains(&"reset_redeemed_rewards"));
    assert_eq!(
        names.iter().filter(|n| **n == "calculate_points").count(),
        1
    );

    // Provisioning is scheduled one minute after its paired rollover.
    let schedule_of = |job: &str| -> String {
        scheduler
            .added
            .iter()
            .find(|(n, _)| n == job)
            .map(|(_, s)| s.clone())
            .unwrap()
    };
    assert_eq!(schedule_of("calculate_points"), "0 6 * * *");
    assert_eq!(schedule_of("create_daily_entries"), "1 6 * * *");
}
