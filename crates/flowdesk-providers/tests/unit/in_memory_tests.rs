//! In-memory repository behaviour

use flowdesk_domain::value_objects::Document;
use flowdesk_domain::{
    CreateRequest, Error, Key, KeySchema, Repository, RepositoryOptions, UpdateRequest,
};
use flowdesk_providers::InMemoryRepository;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
}

fn user(id: Option<&str>, name: &str) -> User {
    User {
        id: id.map(str::to_string),
        name: name.to_string(),
    }
}

fn patch(value: Value) -> Document {
    match value {
        Value::Object(document) => document,
        _ => unreachable!(),
    }
}

fn users() -> InMemoryRepository<User> {
    InMemoryRepository::new(KeySchema::new("_id"))
}

#[tokio::test]
async fn test_create_read_update_delete_scenario() {
    let repo = users();

    let created = repo
        .create(CreateRequest::generated(user(Some("1"), "Test User")))
        .await
        .unwrap();
    assert_eq!(created.key, Key::new("1"));

    let found = repo.read(&Key::new("1")).await.unwrap().unwrap();
    assert_eq!(found.key, Key::new("1"));
    assert_eq!(found.value, user(Some("1"), "Test User"));

    let updated = repo
        .update(UpdateRequest::keyed(
            patch(json!({ "name": "Updated User" })),
            Key::new("1"),
        ))
        .await
        .unwrap();
    assert_eq!(updated.value.name, "Updated User");

    let found = repo.read(&Key::new("1")).await.unwrap().unwrap();
    assert_eq!(found.value, user(Some("1"), "Updated User"));

    assert!(repo.delete(&Key::new("1")).await.unwrap());
    assert!(repo.read(&Key::new("1")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_generated_key_round_trip() {
    let repo = users();
    let created = repo
        .create(CreateRequest::generated(user(None, "Anonymous")))
        .await
        .unwrap();

    let generated = created.key.primary().as_str().unwrap().to_string();
    assert_eq!(generated.len(), 24);
    assert_eq!(created.value.id.as_deref(), Some(generated.as_str()));

    let found = repo.read(&created.key).await.unwrap().unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
async fn test_concurrent_generated_keys_never_collide() {
    let repo = Arc::new(users());
    let tasks: Vec<_> = (0..64)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.create(CreateRequest::generated(user(None, &format!("user-{i}"))))
                    .await
            })
        })
        .collect();

    let mut keys = HashSet::new();
    for task in tasks {
        let created = task.await.unwrap().unwrap();
        assert!(keys.insert(created.key.primary().to_string()));
    }
    assert_eq!(repo.len().await, 64);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let repo = users();
    repo.create(CreateRequest::keyed("1", user(None, "a")))
        .await
        .unwrap();

    assert!(repo.delete(&Key::new("1")).await.unwrap());
    assert!(!repo.delete(&Key::new("1")).await.unwrap());
    assert!(repo.read(&Key::new("1")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_identity_is_write_failure() {
    let repo = users();
    repo.create(CreateRequest::keyed("1", user(None, "a")))
        .await
        .unwrap();

    let err = repo
        .create(CreateRequest::keyed("1", user(None, "b")))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::WriteFailure { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_update_never_changes_identity() {
    let repo = users();
    repo.create(CreateRequest::keyed("1", user(None, "a")))
        .await
        .unwrap();

    let updated = repo
        .update(UpdateRequest::keyed(
            patch(json!({ "_id": "2", "name": "b" })),
            Key::new("1"),
        ))
        .await
        .unwrap();

    assert_eq!(updated.key, Key::new("1"));
    assert_eq!(updated.value, user(Some("1"), "b"));
    assert!(repo.read(&Key::new("2")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_keyless_update_uses_identity_from_patch() {
    let repo = users();
    repo.create(CreateRequest::keyed("7", user(None, "a")))
        .await
        .unwrap();

    let updated = repo
        .update(UpdateRequest::from_partial(&user(Some("7"), "z")).unwrap())
        .await
        .unwrap();
    assert_eq!(updated.value, user(Some("7"), "z"));

    let err = repo
        .update(UpdateRequest::new(patch(json!({ "name": "q" }))))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_update_missing_record() {
    let repo = users();
    let err = repo
        .update(UpdateRequest::keyed(patch(json!({ "name": "x" })), Key::new("9")))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_update_with_upsert_inserts() {
    let repo = users().with_options(RepositoryOptions::new().with_upsert(true));
    let inserted = repo
        .update(UpdateRequest::keyed(patch(json!({ "name": "x" })), Key::new("9")))
        .await
        .unwrap();
    assert_eq!(inserted.value, user(Some("9"), "x"));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_empty_patch_reads_back() {
    let repo = users().with_options(RepositoryOptions::new().with_upsert(true));
    repo.create(CreateRequest::keyed("1", user(None, "a")))
        .await
        .unwrap();

    let same = repo
        .update(UpdateRequest::keyed(patch(json!({ "_id": "1" })), Key::new("1")))
        .await
        .unwrap();
    assert_eq!(same.value, user(Some("1"), "a"));

    let err = repo
        .update(UpdateRequest::keyed(Document::new(), Key::new("2")))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_many_read_semantics() {
    let repo = users();
    for id in ["1", "2", "3"] {
        repo.create(CreateRequest::keyed(id, user(None, id)))
            .await
            .unwrap();
    }

    let all = repo.many_read(None).await.unwrap();
    let keys: HashSet<String> = all.iter().map(|kv| kv.key.primary().to_string()).collect();
    assert_eq!(keys.len(), 3);

    let one = repo.many_read(Some(&[Key::new("2")])).await.unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].value.name, "2");

    let none = repo.many_read(Some(&[Key::new("404")])).await.unwrap();
    assert!(none.is_empty());

    let empty = repo.many_read(Some(&[])).await.unwrap();
    assert!(empty.is_empty());
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Membership {
    board: String,
    user: String,
    role: String,
}

#[tokio::test]
async fn test_composite_keys_and_partial_filters() {
    let repo: InMemoryRepository<Membership> =
        InMemoryRepository::new(KeySchema::composite("board", "user"));
    for (board, member) in [("b1", "ann"), ("b1", "bob"), ("b2", "ann")] {
        repo.create(CreateRequest::composite(
            board,
            member,
            Membership {
                board: String::new(),
                user: String::new(),
                role: "viewer".to_string(),
            },
        ))
        .await
        .unwrap_err();
    }
    assert!(repo.is_empty().await);

    for (board, member) in [("b1", "ann"), ("b1", "bob"), ("b2", "ann")] {
        let created = repo
            .create(CreateRequest::composite(
                board,
                member,
                Membership {
                    board: board.to_string(),
                    user: member.to_string(),
                    role: "viewer".to_string(),
                },
            ))
            .await
            .unwrap();
        assert_eq!(created.key, Key::composite(board, member));
    }

    let found = repo
        .read(&Key::composite("b2", "ann"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.value.board, "b2");

    let board_one = repo.many_read(Some(&[Key::new("b1")])).await.unwrap();
    assert_eq!(board_one.len(), 2);

    let mixed = repo
        .many_read(Some(&[Key::new("b2"), Key::composite("b1", "bob")]))
        .await
        .unwrap();
    let selected: HashSet<(String, String)> = mixed
        .into_iter()
        .map(|entry| (entry.value.board, entry.value.user))
        .collect();
    assert_eq!(
        selected,
        HashSet::from([
            ("b2".to_string(), "ann".to_string()),
            ("b1".to_string(), "bob".to_string()),
        ])
    );

    assert!(repo.delete(&Key::composite("b1", "bob")).await.unwrap());
    assert_eq!(repo.len().await, 2);
}

#[tokio::test]
async fn test_batch_operations_report_each_element() {
    let repo = users().with_options(RepositoryOptions::new().with_batch_concurrency(4));
    repo.create(CreateRequest::keyed("2", user(None, "existing")))
        .await
        .unwrap();

    let results = repo
        .many_create(vec![
            CreateRequest::keyed("1", user(None, "a")),
            CreateRequest::keyed("2", user(None, "b")),
            CreateRequest::keyed("3", user(None, "c")),
        ])
        .await;
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(Error::WriteFailure { .. })));
    assert_eq!(results[2].as_ref().unwrap().key, Key::new("3"));

    let deleted = repo
        .many_delete(vec![Key::new("1"), Key::new("404"), Key::new("3")])
        .await;
    let deleted: Vec<bool> = deleted.into_iter().map(Result::unwrap).collect();
    assert_eq!(deleted, vec![true, false, true]);
}

#[tokio::test]
async fn test_clones_share_storage() {
    let repo = users();
    let other = repo.clone();
    repo.create(CreateRequest::keyed("1", user(None, "a")))
        .await
        .unwrap();
    assert!(other.read(&Key::new("1")).await.unwrap().is_some());
    assert_eq!(other.provider_name(), "memory");
}

#[tokio::test]
async fn test_numeric_keys_match_across_representations() {
    let repo: InMemoryRepository<Value> = InMemoryRepository::new(KeySchema::new("_id"));
    repo.create(CreateRequest::keyed(1, json!({ "name": "one" })))
        .await
        .unwrap();

    let found = repo.read(&Key::new(1.0)).await.unwrap().unwrap();
    assert_eq!(found.value["name"], "one");

    let duplicate = repo
        .create(CreateRequest::keyed(1.0, json!({ "name": "again" })))
        .await
        .unwrap_err();
    assert!(matches!(duplicate, Error::WriteFailure { .. }));

    assert!(repo.read(&Key::new("1")).await.unwrap().is_none());
    assert!(repo.delete(&Key::new(1.0)).await.unwrap());
}
