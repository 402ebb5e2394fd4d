//! redb-based snapshot storage
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `snapshots` | `SnapshotKey` string | JSON blob | One full collection per key |
//!
//! Every write replaces the whole blob for its key. There is no schema
//! versioning; an undecodable blob is reported to the caller, which falls
//! back to seed data.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for collection snapshots: key = snapshot key, value = JSON bytes
const SNAPSHOTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("snapshots");

/// Fixed storage keys, one per persisted collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    Employees,
    Attendance,
    Leaves,
    Notifications,
    DashboardConfig,
    /// Authenticated session identity
    Session,
}

impl SnapshotKey {
    pub const ALL: [SnapshotKey; 6] = [
        SnapshotKey::Employees,
        SnapshotKey::Attendance,
        SnapshotKey::Leaves,
        SnapshotKey::Notifications,
        SnapshotKey::DashboardConfig,
        SnapshotKey::Session,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employees => "dayflow_employees",
            Self::Attendance => "dayflow_attendance",
            Self::Leaves => "dayflow_leaves",
            Self::Notifications => "dayflow_notifications",
            Self::DashboardConfig => "dayflow_dashboard_config",
            Self::Session => "dayflow_user",
        }
    }
}

impl std::fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot {key} is corrupted: {source}")]
    Corrupted {
        key: SnapshotKey,
        source: serde_json::Error,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for shared::error::AppError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::Corrupted { key, .. } => shared::error::AppError::new(
                shared::error::ErrorCode::StorageCorrupted,
            )
            .with_detail("key", key.as_str()),
            _ => shared::error::AppError::storage(err.to_string()),
        }
    }
}

/// Key-value snapshot storage backed by redb
#[derive(Clone)]
pub struct SnapshotStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for SnapshotStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotStorage").finish_non_exhaustive()
    }
}

impl SnapshotStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SNAPSHOTS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Load and decode a snapshot; `Ok(None)` when the key was never written
    pub fn load<T: DeserializeOwned>(&self, key: SnapshotKey) -> StorageResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SNAPSHOTS_TABLE)?;
        match table.get(key.as_str())? {
            Some(guard) => serde_json::from_slice(guard.value())
                .map(Some)
                .map_err(|source| StorageError::Corrupted { key, source }),
            None => Ok(None),
        }
    }

    /// Replace the snapshot stored under `key`
    pub fn save<T: Serialize + ?Sized>(&self, key: SnapshotKey, value: &T) -> StorageResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.save_raw(key, &bytes)
    }

    /// Replace the snapshot with pre-encoded bytes
    pub fn save_raw(&self, key: SnapshotKey, bytes: &[u8]) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SNAPSHOTS_TABLE)?;
            table.insert(key.as_str(), bytes)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Delete the snapshot stored under `key`; returns whether it existed
    pub fn remove(&self, key: SnapshotKey) -> StorageResult<bool> {
        let txn = self.db.begin_write()?;
        let existed = {
            let mut table = txn.open_table(SNAPSHOTS_TABLE)?;
            table.remove(key.as_str())?.is_some()
        };
        txn.commit()?;
        Ok(existed)
    }

    /// Keys that currently hold a snapshot
    pub fn stored_keys(&self) -> StorageResult<Vec<SnapshotKey>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SNAPSHOTS_TABLE)?;
        let mut keys = Vec::new();
        for key in SnapshotKey::ALL {
            if table.get(key.as_str())?.is_some() {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    /// Drop every snapshot (factory reset)
    pub fn clear(&self) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SNAPSHOTS_TABLE)?;
            for key in SnapshotKey::ALL {
                table.remove(key.as_str())?;
            }
        }
        txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_loads_none() {
        let storage = SnapshotStorage::open_in_memory().unwrap();
        let value: Option<Vec<String>> = storage.load(SnapshotKey::Leaves).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_save_replaces_whole_blob() {
        let storage = SnapshotStorage::open_in_memory().unwrap();
        storage
            .save(SnapshotKey::Employees, &vec!["a", "b", "c"])
            .unwrap();
        storage.save(SnapshotKey::Employees, &vec!["z"]).unwrap();

        let value: Vec<String> = storage.load(SnapshotKey::Employees).unwrap().unwrap();
        assert_eq!(value, vec!["z".to_string()]);
    }

    #[test]
    fn test_corrupted_blob_is_reported() {
        let storage = SnapshotStorage::open_in_memory().unwrap();
        storage
            .save_raw(SnapshotKey::Attendance, b"{not json")
            .unwrap();

        let result: StorageResult<Option<Vec<String>>> = storage.load(SnapshotKey::Attendance);
        assert!(matches!(
            result,
            Err(StorageError::Corrupted {
                key: SnapshotKey::Attendance,
                ..
            })
        ));
    }

    #[test]
    fn test_remove_and_stored_keys() {
        let storage = SnapshotStorage::open_in_memory().unwrap();
        storage.save(SnapshotKey::Session, &"2").unwrap();
        storage.save(SnapshotKey::Leaves, &Vec::<u8>::new()).unwrap();
        assert_eq!(
            storage.stored_keys().unwrap(),
            vec![SnapshotKey::Leaves, SnapshotKey::Session]
        );

        assert!(storage.remove(SnapshotKey::Session).unwrap());
        assert!(!storage.remove(SnapshotKey::Session).unwrap());

        storage.clear().unwrap();
        assert!(storage.stored_keys().unwrap().is_empty());
    }

    #[test]
    fn test_key_names() {
        assert_eq!(SnapshotKey::Employees.as_str(), "dayflow_employees");
        assert_eq!(
            SnapshotKey::DashboardConfig.as_str(),
            "dayflow_dashboard_config"
        );
        assert_eq!(SnapshotKey::Session.as_str(), "dayflow_user");
    }
}
