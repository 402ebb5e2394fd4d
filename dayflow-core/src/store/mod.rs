//! Application store
//!
//! Single source of truth for every domain collection. Each mutation:
//! 1. updates the in-memory collection
//! 2. writes the full collection back to [`SnapshotStorage`]
//! 3. broadcasts a [`StoreEvent`]
//!
//! Storage failures are logged and never surface to callers; the in-memory
//! state stays authoritative for the rest of the process.
//!
//! Notifications produced by mutations are a fixed mapping:
//!
//! | Operation | Recipient | Type | Subject |
//! |-----------|-----------|------|---------|
//! | `file_leave` | `ADMIN_ALL` | leave | New Leave Request Filed |
//! | `decide_leave` | owner | leave | Leave Request {status} |
//! | `provision_employee` | `ADMIN_ALL` | security | Security: New User Provisioned |
//! | `reset_password` | owner | security | Security: Password Reset Successful |

mod event;
mod seed;

#[cfg(test)]
mod tests;

pub use event::{Collection, StoreEvent};
pub use seed::{SeedData, system_administrator};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use shared::models::{
    AttendanceRecord, DashboardConfig, DashboardWidget, Employee, LeaveRequest, LeaveStatus,
    Notification, NotificationDraft, NotificationType, PayrollRecord, Recipient, UserRole,
};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::core::Config;
use crate::storage::{SnapshotKey, SnapshotStorage, StorageError, StorageResult};

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Store handle shared with asynchronous jobs
pub type SharedStore = Arc<RwLock<AppStore>>;

/// Application state container
pub struct AppStore {
    storage: SnapshotStorage,
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    leaves: Vec<LeaveRequest>,
    notifications: Vec<Notification>,
    dashboard_configs: Vec<DashboardConfig>,
    /// Display-only ledger, never persisted
    payroll: Vec<PayrollRecord>,
    current_user: Option<Employee>,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl std::fmt::Debug for AppStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore")
            .field("employees", &self.employees.len())
            .field("attendance", &self.attendance.len())
            .field("leaves", &self.leaves.len())
            .field("notifications", &self.notifications.len())
            .field(
                "current_user",
                &self.current_user.as_ref().map(|u| u.id.as_str()),
            )
            .finish()
    }
}

/// Load a snapshot, falling back to `seed` when missing or undecodable.
/// The flag reports whether the seed was used.
fn load_or_seed<T: DeserializeOwned>(storage: &SnapshotStorage, key: SnapshotKey, seed: T) -> (T, bool) {
    match storage.load::<T>(key) {
        Ok(Some(value)) => (value, false),
        Ok(None) => {
            tracing::debug!(key = %key, "No snapshot found, using seed data");
            (seed, true)
        }
        Err(e @ StorageError::Corrupted { .. }) => {
            tracing::warn!(error = %e, key = %key, "Snapshot undecodable, falling back to seed data");
            (seed, true)
        }
        Err(e) => {
            tracing::error!(error = %e, key = %key, "Failed to read snapshot, using seed data");
            (seed, true)
        }
    }
}

impl AppStore {
    /// Open the data file named by `config` and load every collection
    pub fn open(config: &Config) -> StorageResult<Self> {
        let storage = SnapshotStorage::open(config.data_path())?;
        tracing::info!(path = %config.data_path().display(), "Snapshot storage opened");
        Ok(Self::with_storage(storage, SeedData::for_profile(config.seed)))
    }

    /// Build a store over existing storage, seeding collections that were never written
    pub fn with_storage(storage: SnapshotStorage, seed: SeedData) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let (employees, seeded_employees) =
            load_or_seed(&storage, SnapshotKey::Employees, seed.employees);
        let (attendance, seeded_attendance) =
            load_or_seed(&storage, SnapshotKey::Attendance, seed.attendance);
        let (leaves, seeded_leaves) = load_or_seed(&storage, SnapshotKey::Leaves, seed.leaves);
        let (notifications, seeded_notifications) =
            load_or_seed(&storage, SnapshotKey::Notifications, seed.notifications);
        let (dashboard_configs, seeded_configs) =
            load_or_seed(&storage, SnapshotKey::DashboardConfig, seed.dashboard_configs);

        let mut store = Self {
            storage,
            employees,
            attendance,
            leaves,
            notifications,
            dashboard_configs,
            payroll: seed.payroll,
            current_user: None,
            event_tx,
        };

        // Mirror seeded collections so the data file is complete after first open
        for (seeded, collection) in [
            (seeded_employees, Collection::Employees),
            (seeded_attendance, Collection::Attendance),
            (seeded_leaves, Collection::Leaves),
            (seeded_notifications, Collection::Notifications),
            (seeded_configs, Collection::DashboardConfigs),
        ] {
            if seeded {
                store.write_back(collection);
            }
        }

        store.restore_session();
        tracing::info!(
            employees = store.employees.len(),
            attendance = store.attendance.len(),
            leaves = store.leaves.len(),
            notifications = store.notifications.len(),
            "Store loaded"
        );
        store
    }

    /// In-memory store with demo data (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self::with_storage(
            SnapshotStorage::open_in_memory()?,
            SeedData::demo(),
        ))
    }

    /// Wrap the store for sharing with asynchronous jobs
    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// Subscribe to change events
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    pub fn storage(&self) -> &SnapshotStorage {
        &self.storage
    }

    /// Restore the session identity, only if it still names an existing employee
    fn restore_session(&mut self) {
        let saved: Option<Employee> = match self.storage.load(SnapshotKey::Session) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(error = %e, "Session snapshot unreadable, starting signed out");
                None
            }
        };
        if let Some(saved) = saved {
            match self.employee(&saved.id) {
                Some(found) => {
                    tracing::debug!(user_id = %found.id, "Session restored");
                    self.current_user = Some(found.clone());
                }
                None => {
                    tracing::info!(user_id = %saved.id, "Stored session refers to a removed employee");
                }
            }
        }
    }

    // ========== Persistence ==========

    fn write_back(&self, collection: Collection) {
        let key = collection.snapshot_key();
        let result = match collection {
            Collection::Employees => self.storage.save(key, &self.employees),
            Collection::Attendance => self.storage.save(key, &self.attendance),
            Collection::Leaves => self.storage.save(key, &self.leaves),
            Collection::Notifications => self.storage.save(key, &self.notifications),
            Collection::DashboardConfigs => self.storage.save(key, &self.dashboard_configs),
            Collection::Session => match &self.current_user {
                Some(user) => self.storage.save(key, user),
                None => self.storage.remove(key).map(|_| ()),
            },
        };
        if let Err(e) = result {
            tracing::error!(error = %e, key = %key, "Failed to persist snapshot");
        }
    }

    /// Write the collection back and broadcast the change
    fn persist(&self, collection: Collection) {
        self.write_back(collection);
        let _ = self.event_tx.send(StoreEvent::Changed(collection));
    }

    // ========== Read access ==========

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    pub fn leaves(&self) -> &[LeaveRequest] {
        &self.leaves
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn dashboard_configs(&self) -> &[DashboardConfig] {
        &self.dashboard_configs
    }

    pub fn payroll(&self) -> &[PayrollRecord] {
        &self.payroll
    }

    pub fn current_user(&self) -> Option<&Employee> {
        self.current_user.as_ref()
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Case-insensitive email lookup
    pub fn employee_by_email(&self, email: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.email_matches(email))
    }

    pub fn attendance_record(&self, id: &str) -> Option<&AttendanceRecord> {
        self.attendance.iter().find(|r| r.id == id)
    }

    pub fn leave(&self, id: &str) -> Option<&LeaveRequest> {
        self.leaves.iter().find(|l| l.id == id)
    }

    pub fn dashboard_config(&self, role: UserRole) -> Option<&DashboardConfig> {
        self.dashboard_configs.iter().find(|c| c.role == role)
    }

    // ========== Session ==========

    /// Set or clear the authenticated identity and mirror it to storage
    pub fn set_current_user(&mut self, user: Option<Employee>) {
        match &user {
            Some(u) => tracing::info!(user_id = %u.id, role = %u.role, "Session opened"),
            None => tracing::info!("Session closed"),
        }
        self.current_user = user;
        self.persist(Collection::Session);
    }

    // ========== Mutations ==========

    /// Replace the record with the same id, or prepend it
    pub fn record_attendance(&mut self, record: AttendanceRecord) {
        match self.attendance.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                tracing::info!(record_id = %record.id, "Attendance record updated");
                *existing = record;
            }
            None => {
                tracing::info!(
                    record_id = %record.id,
                    employee_id = %record.employee_id,
                    "Attendance record added"
                );
                self.attendance.insert(0, record);
            }
        }
        self.persist(Collection::Attendance);
    }

    /// Prepend a leave request and notify every admin
    pub fn file_leave(&mut self, request: LeaveRequest) {
        let draft = NotificationDraft::new(
            Recipient::AdminAll,
            NotificationType::Leave,
            "New Leave Request Filed",
            format!(
                "Employee #{} has requested {} leave starting {}.",
                request.employee_id, request.leave_type, request.start_date
            ),
        );
        tracing::info!(leave_id = %request.id, employee_id = %request.employee_id, "Leave filed");
        self.leaves.insert(0, request);
        self.persist(Collection::Leaves);
        self.push_notification(draft);
    }

    /// Decide a pending leave request and notify its owner.
    ///
    /// Returns `false` without side effects when the id is unknown or the
    /// request has already been decided.
    pub fn decide_leave(&mut self, id: &str, status: LeaveStatus, comment: Option<String>) -> bool {
        let Some(leave) = self.leaves.iter_mut().find(|l| l.id == id) else {
            tracing::debug!(leave_id = %id, "Leave decision ignored: not found");
            return false;
        };
        if leave.status.is_final() {
            tracing::warn!(leave_id = %id, status = %leave.status, "Leave decision ignored: already decided");
            return false;
        }

        let comment = comment.filter(|c| !c.trim().is_empty());
        let body = format!(
            "Your leave request from {} to {} has been {}{}",
            leave.start_date,
            leave.end_date,
            status.as_str().to_lowercase(),
            match &comment {
                Some(c) => format!(": {}", c),
                None => ".".to_string(),
            }
        );
        let draft = NotificationDraft::new(
            Recipient::employee(leave.employee_id.clone()),
            NotificationType::Leave,
            format!("Leave Request {}", status),
            body,
        );

        leave.status = status;
        leave.admin_comment = comment;
        tracing::info!(leave_id = %id, status = %status, "Leave decided");
        self.persist(Collection::Leaves);
        self.push_notification(draft);
        true
    }

    /// Replace the employee with the same id (prepend when unknown).
    /// Refreshes the session copy when it is the authenticated identity.
    pub fn upsert_employee(&mut self, employee: Employee) {
        let is_current = self
            .current_user
            .as_ref()
            .is_some_and(|u| u.id == employee.id);

        match self.employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee.clone(),
            None => {
                tracing::debug!(employee_id = %employee.id, "Upsert of unknown employee, inserting");
                self.employees.insert(0, employee.clone());
            }
        }
        tracing::info!(employee_id = %employee.id, "Employee updated");
        self.persist(Collection::Employees);

        if is_current {
            self.current_user = Some(employee);
            self.persist(Collection::Session);
        }
    }

    /// Prepend a new employee and notify every admin
    pub fn provision_employee(&mut self, employee: Employee) {
        let draft = NotificationDraft::new(
            Recipient::AdminAll,
            NotificationType::Security,
            "Security: New User Provisioned",
            format!(
                "{} ({}) has been added to the system by IT.",
                employee.name, employee.employee_id
            ),
        );
        tracing::info!(
            employee_id = %employee.id,
            badge = %employee.employee_id,
            status = %employee.status,
            "Employee provisioned"
        );
        self.employees.insert(0, employee);
        self.persist(Collection::Employees);
        self.push_notification(draft);
    }

    /// Remove an employee; refuses the authenticated identity.
    /// Returns whether a record was removed.
    pub fn remove_employee(&mut self, id: &str) -> bool {
        if self.current_user.as_ref().is_some_and(|u| u.id == id) {
            tracing::warn!(employee_id = %id, "Refusing to remove the active session identity");
            return false;
        }
        let before = self.employees.len();
        self.employees.retain(|e| e.id != id);
        if self.employees.len() == before {
            return false;
        }
        tracing::info!(employee_id = %id, "Employee removed");
        self.persist(Collection::Employees);
        true
    }

    /// Replace one role's widget list; a role without a config gets one appended
    pub fn set_dashboard_widgets(&mut self, role: UserRole, widgets: Vec<DashboardWidget>) {
        match self.dashboard_configs.iter_mut().find(|c| c.role == role) {
            Some(config) => config.visible_widgets = widgets,
            None => self.dashboard_configs.push(DashboardConfig {
                role,
                visible_widgets: widgets,
            }),
        }
        tracing::info!(role = %role, "Dashboard configuration updated");
        self.persist(Collection::DashboardConfigs);
    }

    /// Materialize a draft: fresh id, current timestamp, unread; prepended
    pub fn push_notification(&mut self, draft: NotificationDraft) -> Notification {
        let notification = Notification {
            id: format!("notif_{}", uuid::Uuid::new_v4().simple()),
            recipient_id: draft.recipient_id,
            subject: draft.subject,
            body: draft.body,
            timestamp: chrono::Utc::now(),
            kind: draft.kind,
            read: false,
        };
        tracing::debug!(
            notification_id = %notification.id,
            recipient = %notification.recipient_id,
            kind = %notification.kind,
            "Notification pushed"
        );
        self.notifications.insert(0, notification.clone());
        self.persist(Collection::Notifications);
        let _ = self
            .event_tx
            .send(StoreEvent::NotificationPushed(notification.clone()));
        notification
    }

    /// Mark every notification in the store as read.
    /// Returns how many flipped from unread.
    pub fn mark_all_read(&mut self) -> usize {
        let mut flipped = 0;
        for n in self.notifications.iter_mut().filter(|n| !n.read) {
            n.read = true;
            flipped += 1;
        }
        if flipped > 0 {
            self.persist(Collection::Notifications);
        }
        flipped
    }

    /// Replace the password of the account with this email (case-insensitive)
    /// and notify its owner. Returns `false` and changes nothing when unknown.
    pub fn reset_password(&mut self, email: &str, new_password: &str) -> bool {
        let Some(employee) = self.employees.iter_mut().find(|e| e.email_matches(email)) else {
            tracing::debug!("Password reset requested for unknown email");
            return false;
        };
        employee.password = new_password.to_string();
        let updated = employee.clone();
        tracing::info!(employee_id = %updated.id, "Password reset");
        self.persist(Collection::Employees);

        if self.current_user.as_ref().is_some_and(|u| u.id == updated.id) {
            self.current_user = Some(updated.clone());
            self.persist(Collection::Session);
        }

        self.push_notification(NotificationDraft::new(
            Recipient::employee(updated.id),
            NotificationType::Security,
            "Security: Password Reset Successful",
            "Your account password was updated via the recovery portal.",
        ));
        true
    }

    /// Drop every snapshot and reload from `seed`; the session is closed
    pub fn reset(&mut self, seed: SeedData) -> StorageResult<()> {
        self.storage.clear()?;
        self.employees = seed.employees;
        self.attendance = seed.attendance;
        self.leaves = seed.leaves;
        self.notifications = seed.notifications;
        self.dashboard_configs = seed.dashboard_configs;
        self.payroll = seed.payroll;
        self.current_user = None;
        for collection in [
            Collection::Employees,
            Collection::Attendance,
            Collection::Leaves,
            Collection::Notifications,
            Collection::DashboardConfigs,
            Collection::Session,
        ] {
            self.persist(collection);
        }
        tracing::info!("Store reset to seed data");
        Ok(())
    }
}
