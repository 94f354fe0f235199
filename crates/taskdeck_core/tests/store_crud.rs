use taskdeck_core::{SqliteTaskStore, StoreError, TaskStore};

async fn open_store() -> SqliteTaskStore {
    let store = SqliteTaskStore::in_memory().await.unwrap();
    store.initialize().await.unwrap();
    store
}

#[tokio::test]
async fn initialize_is_idempotent() {
    let store = SqliteTaskStore::in_memory().await.unwrap();
    store.initialize().await.unwrap();
    store.initialize().await.unwrap();
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn insert_returns_full_record() {
    let store = open_store().await;

    let task = store.insert("write the report").await.unwrap();
    assert!(task.id > 0);
    assert_eq!(task.title, "write the report");
    assert!(!task.done);
    assert!(task.created_at > 0);
}

#[tokio::test]
async fn inserted_ids_are_unique_and_monotonic() {
    let store = open_store().await;

    let a = store.insert("a").await.unwrap();
    let b = store.insert("b").await.unwrap();
    let c = store.insert("c").await.unwrap();

    assert!(a.id < b.id && b.id < c.id);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let store = open_store().await;

    let first = store.insert("short lived").await.unwrap();
    store.delete(first.id).await.unwrap();

    let second = store.insert("successor").await.unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn list_all_returns_every_row() {
    let store = open_store().await;

    let a = store.insert("a").await.unwrap();
    let b = store.insert("b").await.unwrap();

    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.contains(&a));
    assert!(all.contains(&b));
}

#[tokio::test]
async fn set_done_persists_and_returns_updated_record() {
    let store = open_store().await;
    let task = store.insert("toggle me").await.unwrap();

    let updated = store.set_done(task.id, true).await.unwrap();
    assert!(updated.done);
    assert_eq!(updated.id, task.id);
    assert_eq!(updated.title, task.title);
    assert_eq!(updated.created_at, task.created_at);

    let listed = store.list_all().await.unwrap();
    assert_eq!(listed, vec![updated]);
}

#[tokio::test]
async fn set_done_is_idempotent_on_value() {
    let store = open_store().await;
    let task = store.insert("twice done").await.unwrap();

    let first = store.set_done(task.id, true).await.unwrap();
    let second = store.set_done(task.id, true).await.unwrap();
    assert!(first.done);
    assert!(second.done);
}

#[tokio::test]
async fn set_done_on_missing_id_is_not_found() {
    let store = open_store().await;

    let err = store.set_done(42, true).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(42)));
}

#[tokio::test]
async fn delete_is_final() {
    let store = open_store().await;
    let task = store.insert("doomed").await.unwrap();

    store.delete(task.id).await.unwrap();

    let second_delete = store.delete(task.id).await.unwrap_err();
    assert!(matches!(second_delete, StoreError::NotFound(id) if id == task.id));

    let toggle_after = store.set_done(task.id, true).await.unwrap_err();
    assert!(matches!(toggle_after, StoreError::NotFound(id) if id == task.id));
}

#[tokio::test]
async fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskdeck.db");

    let created = {
        let store = SqliteTaskStore::open(&path).await.unwrap();
        store.initialize().await.unwrap();
        store.insert("survives restart").await.unwrap()
    };

    let store = SqliteTaskStore::open(&path).await.unwrap();
    store.initialize().await.unwrap();

    let all = store.list_all().await.unwrap();
    assert_eq!(all, vec![created]);
}
