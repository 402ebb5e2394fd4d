use super::*;
use chrono::NaiveDate;
use shared::models::{AttendanceStatus, EmployeeStatus, LeaveType};

fn create_test_store() -> AppStore {
    AppStore::open_in_memory().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn pending_leave(id: &str, employee_id: &str) -> LeaveRequest {
    LeaveRequest {
        id: id.to_string(),
        employee_id: employee_id.to_string(),
        leave_type: LeaveType::Paid,
        start_date: date(2024, 7, 1),
        end_date: date(2024, 7, 3),
        reason: "Family trip".to_string(),
        status: LeaveStatus::Pending,
        admin_comment: None,
    }
}

fn new_employee(id: &str, badge: &str) -> Employee {
    let mut employee = system_administrator();
    employee.id = id.to_string();
    employee.name = "Jordan Lee".to_string();
    employee.email = format!("{}@dayflow.com", id);
    employee.role = UserRole::Employee;
    employee.employee_id = badge.to_string();
    employee
}

// ========================================================================
// Loading
// ========================================================================

#[test]
fn test_first_open_uses_seed_and_writes_it_back() {
    let store = create_test_store();
    assert_eq!(store.employees().len(), 3);
    assert_eq!(store.payroll().len(), 2);
    assert!(store.current_user().is_none());

    let keys = store.storage().stored_keys().unwrap();
    assert!(keys.contains(&SnapshotKey::Employees));
    assert!(keys.contains(&SnapshotKey::DashboardConfig));
    assert!(!keys.contains(&SnapshotKey::Session));
}

#[test]
fn test_corrupted_snapshot_falls_back_to_seed() {
    let storage = SnapshotStorage::open_in_memory().unwrap();
    storage.save_raw(SnapshotKey::Leaves, b"[{broken").unwrap();

    let store = AppStore::with_storage(storage, SeedData::demo());
    assert_eq!(store.leaves().len(), 1);
    assert_eq!(store.leaves()[0].id, "l1");
}

#[test]
fn test_persisted_collections_win_over_seed() {
    let storage = SnapshotStorage::open_in_memory().unwrap();
    storage
        .save(SnapshotKey::Leaves, &Vec::<LeaveRequest>::new())
        .unwrap();

    let store = AppStore::with_storage(storage, SeedData::demo());
    assert!(store.leaves().is_empty());
}

#[test]
fn test_session_restored_only_for_existing_employee() {
    let storage = SnapshotStorage::open_in_memory().unwrap();
    let mut ghost = new_employee("ghost", "EMP-9999");
    ghost.name = "Ghost".to_string();
    storage.save(SnapshotKey::Session, &ghost).unwrap();
    let store = AppStore::with_storage(storage.clone(), SeedData::demo());
    assert!(store.current_user().is_none());

    // Stale copy is replaced by the directory record
    let mut stale = SeedData::demo().employees[2].clone();
    stale.phone = "old".to_string();
    storage.save(SnapshotKey::Session, &stale).unwrap();
    let store = AppStore::with_storage(storage, SeedData::demo());
    let user = store.current_user().unwrap();
    assert_eq!(user.id, "2");
    assert_eq!(user.phone, "+1 555-0102");
}

// ========================================================================
// Attendance
// ========================================================================

#[test]
fn test_record_attendance_replaces_or_prepends() {
    let mut store = create_test_store();
    let before = store.attendance_record("a3").unwrap().clone();
    let mut closed = before.clone();
    closed.check_out = Some(chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap());
    store.record_attendance(closed.clone());
    store.record_attendance(closed);
    assert_eq!(store.attendance().len(), 3);

    let after = store.attendance_record("a3").unwrap();
    assert!(!after.is_open());
    assert_eq!(after.check_in, before.check_in);
    assert_eq!(after.date, before.date);
    assert_eq!(after.status, before.status);
    assert_eq!(after.employee_id, before.employee_id);

    store.record_attendance(AttendanceRecord {
        id: "a4".to_string(),
        employee_id: "2".to_string(),
        date: date(2024, 5, 23),
        check_in: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        check_out: None,
        status: AttendanceStatus::Present,
    });
    assert_eq!(store.attendance().len(), 4);
    assert_eq!(store.attendance()[0].id, "a4");
}

// ========================================================================
// Leave
// ========================================================================

#[test]
fn test_file_leave_notifies_admins() {
    let mut store = create_test_store();
    store.file_leave(pending_leave("l2", "2"));

    assert_eq!(store.leaves()[0].id, "l2");
    let n = &store.notifications()[0];
    assert_eq!(n.recipient_id, Recipient::AdminAll);
    assert_eq!(n.kind, NotificationType::Leave);
    assert_eq!(n.subject, "New Leave Request Filed");
    assert_eq!(
        n.body,
        "Employee #2 has requested Paid leave starting 2024-07-01."
    );
    assert!(!n.read);
}

#[test]
fn test_decide_leave_with_comment() {
    let mut store = create_test_store();
    assert!(store.decide_leave("l1", LeaveStatus::Approved, Some("Get well".to_string())));

    let leave = store.leave("l1").unwrap();
    assert_eq!(leave.status, LeaveStatus::Approved);
    assert_eq!(leave.admin_comment.as_deref(), Some("Get well"));

    let n = &store.notifications()[0];
    assert_eq!(n.recipient_id, Recipient::employee("2"));
    assert_eq!(n.subject, "Leave Request Approved");
    assert_eq!(
        n.body,
        "Your leave request from 2024-06-01 to 2024-06-02 has been approved: Get well"
    );
}

#[test]
fn test_decide_leave_without_comment_ends_with_period() {
    let mut store = create_test_store();
    assert!(store.decide_leave("l1", LeaveStatus::Rejected, Some("  ".to_string())));

    assert!(store.leave("l1").unwrap().admin_comment.is_none());
    assert!(store.notifications()[0].body.ends_with("has been rejected."));
}

#[test]
fn test_decide_leave_is_one_way() {
    let mut store = create_test_store();
    assert!(store.decide_leave("l1", LeaveStatus::Rejected, None));
    let notified = store.notifications().len();

    assert!(!store.decide_leave("l1", LeaveStatus::Approved, None));
    assert_eq!(store.leave("l1").unwrap().status, LeaveStatus::Rejected);
    assert_eq!(store.notifications().len(), notified);

    assert!(!store.decide_leave("missing", LeaveStatus::Approved, None));
}

// ========================================================================
// Employees
// ========================================================================

#[test]
fn test_provision_employee_notifies_admins() {
    let mut store = create_test_store();
    store.provision_employee(new_employee("e9", "EMP-0009"));

    assert_eq!(store.employees()[0].id, "e9");
    let n = &store.notifications()[0];
    assert_eq!(n.recipient_id, Recipient::AdminAll);
    assert_eq!(n.kind, NotificationType::Security);
    assert_eq!(n.subject, "Security: New User Provisioned");
    assert_eq!(n.body, "Jordan Lee (EMP-0009) has been added to the system by IT.");
}

#[test]
fn test_upsert_refreshes_session_copy() {
    let mut store = create_test_store();
    let sarah = store.employee("2").unwrap().clone();
    store.set_current_user(Some(sarah.clone()));

    let mut updated = sarah;
    updated.address = "New address".to_string();
    store.upsert_employee(updated);

    assert_eq!(store.current_user().unwrap().address, "New address");
    let saved: Employee = store
        .storage()
        .load(SnapshotKey::Session)
        .unwrap()
        .unwrap();
    assert_eq!(saved.address, "New address");
}

#[test]
fn test_upsert_unknown_employee_inserts() {
    let mut store = create_test_store();
    store.upsert_employee(new_employee("e10", "EMP-0010"));
    assert_eq!(store.employees().len(), 4);
    assert!(store.employee("e10").is_some());
}

#[test]
fn test_remove_employee_refuses_session_identity() {
    let mut store = create_test_store();
    let alex = store.employee("1").unwrap().clone();
    store.set_current_user(Some(alex));

    assert!(!store.remove_employee("1"));
    assert!(store.employee("1").is_some());

    assert!(store.remove_employee("2"));
    assert!(store.employee("2").is_none());
    assert!(!store.remove_employee("2"));
}

#[test]
fn test_reset_password_case_insensitive() {
    let mut store = create_test_store();
    assert!(store.reset_password("SARAH@dayflow.com", "fresh-pass"));
    assert_eq!(store.employee("2").unwrap().password, "fresh-pass");

    let n = &store.notifications()[0];
    assert_eq!(n.recipient_id, Recipient::employee("2"));
    assert_eq!(n.subject, "Security: Password Reset Successful");

    let before = store.notifications().len();
    let employees_before = serde_json::to_vec(store.employees()).unwrap();
    assert!(!store.reset_password("nobody@dayflow.com", "x"));
    assert_eq!(store.notifications().len(), before);
    assert_eq!(serde_json::to_vec(store.employees()).unwrap(), employees_before);
}

// ========================================================================
// Dashboard and notifications
// ========================================================================

#[test]
fn test_set_dashboard_widgets_touches_one_role() {
    let mut store = create_test_store();
    let admin_before = store.dashboard_config(UserRole::Admin).unwrap().clone();

    store.set_dashboard_widgets(UserRole::Employee, vec![DashboardWidget::Streak]);

    assert_eq!(
        store.dashboard_config(UserRole::Employee).unwrap().visible_widgets,
        vec![DashboardWidget::Streak]
    );
    assert_eq!(store.dashboard_config(UserRole::Admin).unwrap(), &admin_before);
}

#[test]
fn test_set_dashboard_widgets_appends_missing_role() {
    let mut seed = SeedData::demo();
    seed.dashboard_configs.retain(|c| c.role == UserRole::Admin);
    let mut store = AppStore::with_storage(SnapshotStorage::open_in_memory().unwrap(), seed);
    assert!(store.dashboard_config(UserRole::Employee).is_none());

    store.set_dashboard_widgets(UserRole::Employee, vec![DashboardWidget::Hours]);

    assert_eq!(store.dashboard_configs().len(), 2);
    assert_eq!(
        store.dashboard_config(UserRole::Employee).unwrap().visible_widgets,
        vec![DashboardWidget::Hours]
    );
}

#[test]
fn test_mark_all_read_is_global() {
    let mut store = create_test_store();
    store.file_leave(pending_leave("l2", "2"));
    store.push_notification(NotificationDraft::new(
        Recipient::employee("2"),
        NotificationType::System,
        "Hello",
        "World",
    ));

    assert_eq!(store.mark_all_read(), 2);
    assert!(store.notifications().iter().all(|n| n.read));
    assert_eq!(store.mark_all_read(), 0);
}

#[test]
fn test_push_notification_assigns_unique_ids() {
    let mut store = create_test_store();
    let a = store.push_notification(NotificationDraft::new(
        Recipient::AdminAll,
        NotificationType::Payroll,
        "A",
        "a",
    ));
    let b = store.push_notification(NotificationDraft::new(
        Recipient::AdminAll,
        NotificationType::Payroll,
        "B",
        "b",
    ));
    assert_ne!(a.id, b.id);
    assert_eq!(store.notifications()[0].id, b.id);
}

#[test]
fn test_mutations_broadcast_events() {
    let mut store = create_test_store();
    let mut rx = store.subscribe();

    store.file_leave(pending_leave("l2", "2"));

    assert_eq!(rx.try_recv().unwrap(), StoreEvent::Changed(Collection::Leaves));
    assert_eq!(
        rx.try_recv().unwrap(),
        StoreEvent::Changed(Collection::Notifications)
    );
    assert!(matches!(
        rx.try_recv().unwrap(),
        StoreEvent::NotificationPushed(n) if n.subject == "New Leave Request Filed"
    ));
}

#[test]
fn test_logout_removes_session_snapshot() {
    let mut store = create_test_store();
    let sarah = store.employee("2").unwrap().clone();
    store.set_current_user(Some(sarah));
    assert!(store.storage().stored_keys().unwrap().contains(&SnapshotKey::Session));

    store.set_current_user(None);
    assert!(!store.storage().stored_keys().unwrap().contains(&SnapshotKey::Session));
}

#[test]
fn test_reset_restores_seed() {
    let mut store = create_test_store();
    store.remove_employee("2");
    let alex = store.employee("1").cloned();
    store.set_current_user(alex);

    store.reset(SeedData::minimal()).unwrap();

    assert_eq!(store.employees().len(), 1);
    assert!(store.current_user().is_none());
    assert_eq!(store.employees()[0].status, EmployeeStatus::Active);
}
