mod common;

use std::sync::Arc;

use habitfolio_core::activities::PeriodType;
use habitfolio_core::entries::{
    EntryError, EntryRepository, EntryService, EntryServiceTrait, EntryUpdate,
};
use habitfolio_core::scheduling::{ProvisioningJob, RolloverJob, ScheduledJob};

use common::{create_activity, create_user, open_entry, open_entry_count, setup_db};

#[tokio::test]
async fn open_entry_accepts_progress_updates() {
    let (_dir, pool) = setup_db();
    let user = create_user(&pool, "Alice");
    let activity = create_activity(&pool, &user.id, "Read", 5, 10, PeriodType::Daily).await;

    let entry = open_entry(&pool, PeriodType::Daily, &activity.id);
    let service: Arc<dyn EntryServiceTrait> = Arc::new(EntryService::new(pool.clone()));

    let updated = service
        .update_entry(
            PeriodType::Daily,
            EntryUpdate {
                id: entry.id,
                progress: 3,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.progress, 3);
}

#[tokio::test]
async fn closed_entry_rejects_updates_and_deletes() {
    let (_dir, pool) = setup_db();
    let user = create_user(&pool, "Alice");
    let activity = create_activity(&pool, &user.id, "Read", 5, 10, PeriodType::Daily).await;

    let entry = open_entry(&pool, PeriodType::Daily, &activity.id);
    RolloverJob::new(pool.clone(), PeriodType::Daily)
        .run()
        .unwrap();

    let service = EntryService::new(pool.clone());

    let update_err = service
        .update_entry(
            PeriodType::Daily,
            EntryUpdate {
                id: entry.id.clone(),
                progress: 7,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(update_err, EntryError::InvalidTransition(_)));

    let delete_err = service
        .delete_entry(PeriodType::Daily, entry.id.clone())
        .await
        .unwrap_err();
    assert!(matches!(delete_err, EntryError::InvalidTransition(_)));

    // The rejected update never persisted anything.
    let stored = EntryRepository::new(pool.clone())
        .get_entry(PeriodType::Daily, &entry.id)
        .unwrap();
    assert!(stored.closed);
    assert_eq!(stored.progress, 0);
}

#[tokio::test]
async fn open_entry_can_be_deleted() {
    let (_dir, pool) = setup_db();
    let user = create_user(&pool, "Alice");
    let activity = create_activity(&pool, &user.id, "Read", 5, 10, PeriodType::Daily).await;

    let entry = open_entry(&pool, PeriodType::Daily, &activity.id);
    EntryService::new(pool.clone())
        .delete_entry(PeriodType::Daily, entry.id.clone())
        .await
        .unwrap();

    let err = EntryRepository::new(pool.clone())
        .get_entry(PeriodType::Daily, &entry.id)
        .unwrap_err();
    assert!(matches!(err, EntryError::NotFound(_)));
}

#[tokio::test]
async fn provisioning_is_idempotent_for_activities_with_an_open_entry() {
    let (_dir, pool) = setup_db();
    let user = create_user(&pool, "Alice");
    let activity = create_activity(&pool, &user.id, "Read", 5, 10, PeriodType::Daily).await;

    // Activity creation already seeded the first entry; a provisioning run
    // in whatever order must not add a second open one.
    ProvisioningJob::new(pool.clone(), PeriodType::Daily)
        .run()
        .unwrap();
    assert_eq!(open_entry_count(&pool, PeriodType::Daily, &activity.id), 1);
}

#[tokio::test]
async fn rollover_then_provisioning_yields_exactly_one_open_entry() {
    let (_dir, pool) = setup_db();
    let user = create_user(&pool, "Alice");
    let activity = create_activity(&pool, &user.id, "Read", 5, 10, PeriodType::Daily).await;

    RolloverJob::new(pool.clone(), PeriodType::Daily)
        .run()
        .unwrap();
    assert_eq!(open_entry_count(&pool, PeriodType::Daily, &activity.id), 0);

    ProvisioningJob::new(pool.clone(), PeriodType::Daily)
        .run()
        .unwrap();
    assert_eq!(open_entry_count(&pool, PeriodType::Daily, &activity.id), 1);

    // The fresh entry snapshots the activity goal and starts at zero.
    let fresh = open_entry(&pool, PeriodType::Daily, &activity.id);
    assert_eq!(fresh.progress, 0);
    assert_eq!(fresh.goal, 10);
    assert!(!fresh.closed);
}
