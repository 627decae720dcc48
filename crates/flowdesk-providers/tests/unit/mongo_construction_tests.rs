//! MongoDB adapter construction
//!
//! None of these tests need a server: construction performs no I/O and
//! the background handshake only logs its outcome.

use flowdesk_domain::entities::CanvasComponent;
use flowdesk_domain::{Error, KeySchema, Repository, RepositoryOptions};
use flowdesk_providers::{MongoRepository, MongoSettings};
use serde_json::Value;
use std::time::Duration;

fn settings() -> MongoSettings {
    MongoSettings::new("127.0.0.1:1", "root", "secret")
        .unwrap()
        .with_server_selection_timeout(Duration::from_millis(200))
}

#[tokio::test]
async fn test_constructor_returns_before_handshake() {
    let repo: MongoRepository<Value> =
        MongoRepository::new(&settings(), "ProjectManagement", "Users", KeySchema::new("_id"))
            .unwrap();
    assert_eq!(repo.provider_name(), "mongodb");
    assert_eq!(repo.collection_name(), "Users");
    assert_eq!(repo.database_name(), "ProjectManagement");
    assert_eq!(repo.options(), &RepositoryOptions::default());
}

#[tokio::test]
async fn test_composite_schema_is_kept() {
    let repo: MongoRepository<Value> =
        MongoRepository::new(&settings(), "db", "things", KeySchema::composite("a", "b")).unwrap();
    assert_eq!(repo.schema().secondary(), Some("b"));
}

#[test]
fn test_constructor_outside_a_runtime_is_configuration_error() {
    let err = MongoRepository::<Value>::new(&settings(), "db", "things", KeySchema::new("_id"))
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[tokio::test]
async fn test_for_record_uses_declared_collection() {
    let repo: MongoRepository<CanvasComponent> =
        MongoRepository::for_record(&settings(), "ProjectManagement").unwrap();
    assert_eq!(repo.collection_name(), "Workflow");
    assert_eq!(repo.schema().primary(), "_id");
}

#[tokio::test]
async fn test_unreachable_server_is_connection_failure() {
    let repo: MongoRepository<Value> =
        MongoRepository::new(&settings(), "db", "things", KeySchema::new("_id")).unwrap();
    let err = repo.ping().await.unwrap_err();
    assert!(matches!(err, Error::ConnectionFailure { .. }), "{err}");
    let err = repo.drop_collection().await.unwrap_err();
    assert!(matches!(err, Error::ConnectionFailure { .. }), "{err}");
    repo.close().await;
}

#[test]
fn test_missing_credentials_fail_fast() {
    let err = MongoSettings::new("localhost:27017", "", "secret").unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(!err.is_retryable());
    assert!(err.to_string().contains("DB_USERNAME"));
}
