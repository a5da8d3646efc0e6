use bytes::Bytes;
use folio::object_store::{object_key, LocalStore, ObjectStore, ObjectStoreError};

#[tokio::test]
async fn test_local_store_put_get() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    let data = Bytes::from("hello world");
    store.put("test-key", data.clone(), "text/plain").await.unwrap();

    let retrieved = store.get("test-key").await.unwrap();
    assert_eq!(retrieved, data);
}

#[tokio::test]
async fn test_local_store_exists() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    assert!(!store.exists("missing").await.unwrap());

    store
        .put("present", Bytes::from("data"), "text/plain")
        .await
        .unwrap();
    assert!(store.exists("present").await.unwrap());
}

#[tokio::test]
async fn test_local_store_delete() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    store
        .put("to-delete", Bytes::from("data"), "text/plain")
        .await
        .unwrap();
    store.delete("to-delete").await.unwrap();
    assert!(!store.exists("to-delete").await.unwrap());

    // Deleting a nonexistent key should not error
    store.delete("to-delete").await.unwrap();
}

#[tokio::test]
async fn test_local_store_get_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    let result = store.get("missing").await;
    assert!(matches!(result, Err(ObjectStoreError::NotFound(_))));
}

#[tokio::test]
async fn test_local_store_never_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    store.put("key", Bytes::from("first"), "text/plain").await.unwrap();
    let second = store.put("key", Bytes::from("second"), "text/plain").await;
    assert!(matches!(second, Err(ObjectStoreError::AlreadyExists(_))));

    let data = store.get("key").await.unwrap();
    assert_eq!(data, Bytes::from("first"));
}

#[tokio::test]
async fn test_local_store_rejects_path_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path().join("uploads")).unwrap();

    for key in ["../escape", "nested/key", ".hidden", ""] {
        let result = store.put(key, Bytes::from("x"), "text/plain").await;
        assert!(
            matches!(result, Err(ObjectStoreError::InvalidKey(_))),
            "key {key:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_local_store_public_url() {
    let dir = tempfile::tempdir().unwrap();

    let store = LocalStore::new(dir.path()).unwrap();
    assert_eq!(store.public_url("1-a.png"), "/uploads/1-a.png");

    let store = LocalStore::with_public_base(dir.path(), "https://cdn.example.com/media/").unwrap();
    assert_eq!(
        store.public_url("1-a.png"),
        "https://cdn.example.com/media/1-a.png"
    );
}

#[tokio::test]
async fn test_object_keys_round_trip_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    let key = object_key(1_700_000_000_000, "../../etc/passwd");
    assert_eq!(key, "1700000000000-passwd");

    store.put(&key, Bytes::from("ok"), "text/plain").await.unwrap();
    assert!(dir.path().join(&key).exists());
}
