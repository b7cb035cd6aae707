//! On-disk database smoke test
//!
//! The unit tests all run against the in-memory engine; this covers the
//! RocksDB path the binary actually uses, including index bootstrap.

use shared::types::Role;

use dispatch_server::db::DbService;
use dispatch_server::db::repository::{AccountRepository, RepoError};

#[tokio::test]
async fn rocksdb_bootstrap_and_unique_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dispatch.db");
    let db = DbService::new(&path.to_string_lossy()).await.unwrap();

    let accounts = AccountRepository::new(db.db.clone());
    let created = accounts
        .create("Anna", "anna@manager.test", "secret1", Role::Manager)
        .await
        .unwrap();
    assert!(!created.id_string().is_empty());

    let found = accounts.find_by_email("anna@manager.test").await.unwrap();
    assert!(found.is_some());

    let err = accounts
        .create("Anna Again", "anna@manager.test", "secret1", Role::Rider)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}
