//! Store change feed

use shared::models::Notification;

use crate::storage::SnapshotKey;

/// Domain collections held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Employees,
    Attendance,
    Leaves,
    Notifications,
    DashboardConfigs,
    Session,
}

impl Collection {
    /// Storage key the collection is mirrored to
    pub fn snapshot_key(&self) -> SnapshotKey {
        match self {
            Self::Employees => SnapshotKey::Employees,
            Self::Attendance => SnapshotKey::Attendance,
            Self::Leaves => SnapshotKey::Leaves,
            Self::Notifications => SnapshotKey::Notifications,
            Self::DashboardConfigs => SnapshotKey::DashboardConfig,
            Self::Session => SnapshotKey::Session,
        }
    }
}

/// Events broadcast after a mutation has been applied
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// A collection was replaced in memory and written back
    Changed(Collection),
    /// A notification was appended
    NotificationPushed(Notification),
}
