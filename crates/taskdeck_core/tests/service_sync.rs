use async_trait::async_trait;
use taskdeck_core::db::DbError;
use taskdeck_core::{
    RepoError, SqliteTaskStore, StoreError, Task, TaskId, TaskRepository, TaskService, TaskStore,
    TaskValidationError,
};

async fn open_service() -> TaskService<SqliteTaskStore> {
    let store = SqliteTaskStore::in_memory().await.unwrap();
    let service = TaskService::new(TaskRepository::new(store));
    service.initialize().await.unwrap();
    service
}

/// Store double whose writes always fail at the I/O level.
struct FailingStore;

fn write_failure() -> StoreError {
    StoreError::Write(DbError::Sqlite(rusqlite::Error::InvalidQuery))
}

#[async_trait]
impl TaskStore for FailingStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        Err(write_failure())
    }

    async fn insert(&self, _title: &str) -> Result<Task, StoreError> {
        Err(write_failure())
    }

    async fn set_done(&self, _id: TaskId, _done: bool) -> Result<Task, StoreError> {
        Err(write_failure())
    }

    async fn delete(&self, _id: TaskId) -> Result<(), StoreError> {
        Err(write_failure())
    }
}

#[tokio::test]
async fn create_prepends_committed_record() {
    let mut service = open_service().await;

    let first = service.create("first").await.unwrap();
    let second = service.create("second").await.unwrap();

    let tasks = service.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0], second);
    assert_eq!(tasks[1], first);
}

#[tokio::test]
async fn toggle_replaces_collection_entry_with_store_record() {
    let mut service = open_service().await;
    let task = service.create("toggle me").await.unwrap();

    let updated = service.toggle(task.id, true).await.unwrap();
    assert!(updated.done);

    let entry = service.collection().get(task.id).unwrap();
    assert_eq!(entry, &updated);
}

#[tokio::test]
async fn remove_drops_entry_only_on_success() {
    let mut service = open_service().await;
    let keep = service.create("keep").await.unwrap();
    let doomed = service.create("drop").await.unwrap();

    service.remove(doomed.id).await.unwrap();

    let tasks = service.tasks();
    assert_eq!(tasks, [keep]);
}

#[tokio::test]
async fn failed_create_leaves_collection_value_identical() {
    let mut service = TaskService::new(TaskRepository::new(FailingStore));

    let before = service.collection().clone();
    let err = service.create("never persisted").await.unwrap_err();

    assert!(matches!(err, RepoError::Persistence(StoreError::Write(_))));
    assert_eq!(service.collection(), &before);
}

#[tokio::test]
async fn rejected_create_never_dispatches_to_store() {
    // Every store write in this double fails, so a create that reached the
    // store would surface Persistence. A validation rejection must stay
    // Validation: it is refused before any dispatch.
    let mut service = TaskService::new(TaskRepository::new(FailingStore));
    let before = service.collection().clone();

    let err = service.create("   ").await.unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TaskValidationError::EmptyTitle)
    ));
    assert_eq!(service.collection(), &before);
}

#[tokio::test]
async fn failed_toggle_and_remove_leave_collection_unchanged() {
    let mut service = TaskService::new(TaskRepository::new(FailingStore));
    let before = service.collection().clone();

    assert!(service.toggle(1, true).await.is_err());
    assert!(service.remove(1).await.is_err());
    assert_eq!(service.collection(), &before);
}

#[tokio::test]
async fn failed_reload_keeps_last_known_good_state() {
    let mut service = open_service().await;
    let task = service.create("still here").await.unwrap();

    let mut failing = TaskService::new(TaskRepository::new(FailingStore));
    assert!(failing.reload().await.is_err());
    assert!(failing.tasks().is_empty());

    // The healthy service keeps serving its committed state.
    assert_eq!(service.tasks(), [task]);
}

#[tokio::test]
async fn reload_roundtrips_created_records() {
    let mut service = open_service().await;

    let a = service.create("a").await.unwrap();
    let b = service.create("b").await.unwrap();

    let reloaded = service.reload().await.unwrap().to_vec();
    assert_eq!(reloaded.len(), 2);
    assert!(reloaded.contains(&a));
    assert!(reloaded.contains(&b));
}

#[tokio::test]
async fn stale_entry_is_dropped_when_store_reports_not_found() {
    let store = SqliteTaskStore::in_memory().await.unwrap();
    let backdoor = store.clone();
    let mut service = TaskService::new(TaskRepository::new(store));
    service.initialize().await.unwrap();

    let task = service.create("about to go stale").await.unwrap();

    // Delete the row outside the service so its collection entry goes stale.
    backdoor.delete(task.id).await.unwrap();

    let err = service.toggle(task.id, true).await.unwrap_err();
    assert!(matches!(
        err,
        RepoError::Persistence(StoreError::NotFound(id)) if id == task.id
    ));
    assert!(service.collection().get(task.id).is_none());
}

#[tokio::test]
async fn display_orders_active_before_completed() {
    let mut service = open_service().await;

    let a = service.create("a").await.unwrap();
    let b = service.create("b").await.unwrap();
    let c = service.create("c").await.unwrap();
    service.toggle(c.id, true).await.unwrap();

    let ordered = service.display();
    let ids: Vec<_> = ordered.iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![b.id, a.id, c.id]);
    assert!(ordered[2].done);
}

#[tokio::test]
async fn rapid_same_id_toggles_settle_in_dispatch_order() {
    let mut service = open_service().await;
    let task = service.create("double tap").await.unwrap();

    service.toggle(task.id, true).await.unwrap();
    let settled = service.toggle(task.id, false).await.unwrap();

    assert!(!settled.done);
    assert_eq!(service.collection().get(task.id).unwrap(), &settled);
}
