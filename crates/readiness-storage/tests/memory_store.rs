use readiness_storage::{Condition, DocumentStore, FieldPath, MemoryStore, Update, UpdateOutcome};
use readiness_storage::error::StorageError;
use serde_json::json;

#[tokio::test]
async fn insert_find_delete() {
    let store = MemoryStore::new();
    store
        .insert_one("a/1.json", json!({ "n": 1 }))
        .await
        .unwrap();

    assert_eq!(store.find_one("a/1.json").await.unwrap(), Some(json!({ "n": 1 })));
    assert_eq!(store.find_one("a/2.json").await.unwrap(), None);

    assert!(store.delete_one("a/1.json").await.unwrap());
    assert!(!store.delete_one("a/1.json").await.unwrap());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn insert_twice_fails() {
    let store = MemoryStore::new();
    store.insert_one("k", json!({})).await.unwrap();
    let err = store.insert_one("k", json!({ "x": 1 })).await.unwrap_err();
    assert!(matches!(err, StorageError::AlreadyExists { .. }));
    assert_eq!(store.find_one("k").await.unwrap(), Some(json!({})));
}

#[tokio::test]
async fn update_outcomes() {
    let store = MemoryStore::new();
    let update = Update::new()
        .when(Condition::NotEquals(FieldPath::field("locked"), json!(true)))
        .set(FieldPath::field("n"), json!(2));

    assert_eq!(store.update_one("k", &update).await.unwrap(), UpdateOutcome::Missing);

    store.insert_one("k", json!({ "n": 1 })).await.unwrap();
    assert_eq!(
        store.update_one("k", &update).await.unwrap(),
        UpdateOutcome::Updated(json!({ "n": 2 }))
    );

    let lock = Update::new().set(FieldPath::field("locked"), json!(true));
    store.update_one("k", &lock).await.unwrap();

    let rejected = Update::new()
        .when(Condition::NotEquals(FieldPath::field("locked"), json!(true)))
        .set(FieldPath::field("n"), json!(3));
    assert_eq!(
        store.update_one("k", &rejected).await.unwrap(),
        UpdateOutcome::FilterRejected(json!({ "n": 2, "locked": true }))
    );
}

#[tokio::test]
async fn concurrent_updates_to_different_paths_both_survive() {
    let store = MemoryStore::new();
    store
        .insert_one("doc", json!({ "responses": {} }))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let update = Update::new().set(
                FieldPath::new(["responses".to_string(), format!("c{i}")]),
                json!({ "q": i }),
            );
            store.update_one("doc", &update).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let doc = store.find_one("doc").await.unwrap().unwrap();
    let responses = doc["responses"].as_object().unwrap();
    assert_eq!(responses.len(), 16);
    assert_eq!(responses["c7"], json!({ "q": 7 }));
}

#[tokio::test]
async fn list_filters_by_prefix_in_key_order() {
    let store = MemoryStore::new();
    store.insert_one("b/2.json", json!(2)).await.unwrap();
    store.insert_one("a/1.json", json!(1)).await.unwrap();
    store.insert_one("b/1.json", json!(1)).await.unwrap();
    store.insert_one("c/1.json", json!(1)).await.unwrap();

    let listed = store.list("b/").await.unwrap();
    let keys: Vec<_> = listed.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["b/1.json", "b/2.json"]);
}
