mod common;

use std::sync::Arc;

use habitfolio_core::activities::{
    ActivityError, ActivityService, ActivityServiceTrait, ActivityUpdate, PeriodType,
};
use habitfolio_core::entries::{EntryRepository, EntryService, EntryServiceTrait, EntryUpdate};
use habitfolio_core::scheduling::{RolloverJob, ScheduledJob};

use common::{create_activity, create_user, open_entry, open_entry_count, setup_db};

fn period_update(activity: &habitfolio_core::activities::Activity, period: PeriodType) -> ActivityUpdate {
    ActivityUpdate {
        id: activity.id.clone(),
        user_id: activity.user_id.clone(),
        name: activity.name.clone(),
        points_award: activity.points_award,
        goal: activity.goal,
        period_type: period,
    }
}

#[tokio::test]
async fn period_change_carries_progress_to_the_new_table() {
    let (_dir, pool) = setup_db();
    let user = create_user(&pool, "Alice");
    let activity = create_activity(&pool, &user.id, "Read", 5, 10, PeriodType::Daily).await;

    let daily_entry = open_entry(&pool, PeriodType::Daily, &activity.id);
    EntryService::new(pool.clone())
        .update_entry(
            PeriodType::Daily,
            EntryUpdate {
                id: daily_entry.id.clone(),
                progress: 3,
            },
        )
        .await
        .unwrap();

    let service: Arc<dyn ActivityServiceTrait> = Arc::new(ActivityService::new(pool.clone()));
    let updated = service
        .update_activity(period_update(&activity, PeriodType::Weekly))
        .await
        .unwrap();
    assert_eq!(updated.period_type, PeriodType::Weekly);

    let weekly_entry = open_entry(&pool, PeriodType::Weekly, &activity.id);
    assert_eq!(weekly_entry.progress, 3);
    assert_eq!(weekly_entry.goal, 10);
    assert!(!weekly_entry.closed);

    // The old entry no longer exists anywhere in the daily table.
    assert!(EntryRepository::new(pool.clone())
        .get_entry(PeriodType::Daily, &daily_entry.id)
        .is_err());
    assert_eq!(open_entry_count(&pool, PeriodType::Daily, &activity.id), 0);
}

#[tokio::test]
async fn same_period_update_leaves_the_entry_alone() {
    let (_dir, pool) = setup_db();
    let user = create_user(&pool, "Alice");
    let activity = create_activity(&pool, &user.id, "Read", 5, 10, PeriodType::Daily).await;

    let before = open_entry(&pool, PeriodType::Daily, &activity.id);

    let mut update = period_update(&activity, PeriodType::Daily);
    update.name = "Read more".to_string();
    ActivityService::new(pool.clone())
        .update_activity(update)
        .await
        .unwrap();

    let after = open_entry(&pool, PeriodType::Daily, &activity.id);
    assert_eq!(before.id, after.id);
}

#[tokio::test]
async fn owner_change_is_forbidden_and_blocks_the_migration() {
    let (_dir, pool) = setup_db();
    let alice = create_user(&pool, "Alice");
    let mallory = create_user(&pool, "Mallory");
    let activity = create_activity(&pool, &alice.id, "Read", 5, 10, PeriodType::Daily).await;

    let mut update = period_update(&activity, PeriodType::Weekly);
    update.user_id = mallory.id.clone();

    let err = ActivityService::new(pool.clone())
        .update_activity(update)
        .await
        .unwrap_err();
    assert!(matches!(err, ActivityError::Forbidden(_)));

    // The veto ran before the migration stage: nothing moved, nothing saved.
    let stored = ActivityService::new(pool.clone())
        .get_activity(&activity.id)
        .unwrap();
    assert_eq!(stored.user_id, alice.id);
    assert_eq!(stored.period_type, PeriodType::Daily);
    assert_eq!(open_entry_count(&pool, PeriodType::Daily, &activity.id), 1);
    assert_eq!(open_entry_count(&pool, PeriodType::Weekly, &activity.id), 0);
}

#[tokio::test]
async fn period_change_without_an_open_entry_fails_and_rolls_back() {
    let (_dir, pool) = setup_db();
    let user = create_user(&pool, "Alice");
    let activity = create_activity(&pool, &user.id, "Read", 5, 10, PeriodType::Daily).await;

    // Close the only entry so the migration has nothing to move.
    RolloverJob::new(pool.clone(), PeriodType::Daily)
        .run()
        .unwrap();

    let err = ActivityService::new(pool.clone())
        .update_activity(period_update(&activity, PeriodType::Monthly))
        .await
        .unwrap_err();
    assert!(matches!(err, ActivityError::NotFound(_)));

    // The activity update rolled back with the failed migration.
    let stored = ActivityService::new(pool.clone())
        .get_activity(&activity.id)
        .unwrap();
    assert_eq!(stored.period_type, PeriodType::Daily);
    assert_eq!(open_entry_count(&pool, PeriodType::Monthly, &activity.id), 0);
}

#[tokio::test]
async fn deleting_an_activity_cascades_to_its_entries() {
    let (_dir, pool) = setup_db();
    let user = create_user(&pool, "Alice");
    let activity = create_activity(&pool, &user.id, "Read", 5, 10, PeriodType::Daily).await;
    let entry = open_entry(&pool, PeriodType::Daily, &activity.id);

    ActivityService::new(pool.clone())
        .delete_activity(activity.id.clone())
        .await
        .unwrap();

    assert!(EntryRepository::new(pool.clone())
        .get_entry(PeriodType::Daily, &entry.id)
        .is_err());
}
