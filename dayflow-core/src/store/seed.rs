//! Seed data used when a collection has never been persisted

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use shared::models::{
    AttendanceRecord, AttendanceStatus, DashboardConfig, Employee, EmployeeStatus, LeaveRequest,
    LeaveStatus, LeaveType, Notification, PayrollRecord, PayrollStatus, UserRole,
};

use crate::core::SeedProfile;

/// Initial collections
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub employees: Vec<Employee>,
    pub attendance: Vec<AttendanceRecord>,
    pub leaves: Vec<LeaveRequest>,
    pub notifications: Vec<Notification>,
    pub dashboard_configs: Vec<DashboardConfig>,
    pub payroll: Vec<PayrollRecord>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    date(y, mo, d).and_time(time(h, mi))
}

/// Built-in system administrator, present in every profile
pub fn system_administrator() -> Employee {
    Employee {
        id: "admin-primary".into(),
        name: "System Administrator".into(),
        email: "Admin123@gmail.com".into(),
        password: "Admin@123".into(),
        role: UserRole::Admin,
        employee_id: "SYS-001".into(),
        job_title: "IT Head".into(),
        department: "IT & Administration".into(),
        join_date: date(2024, 1, 1),
        created_at: datetime(2024, 1, 1, 8, 0),
        salary: 12000.0,
        phone: "+1 800-ADMIN".into(),
        address: "System Headquarters".into(),
        profile_picture: Some("https://api.dicebear.com/7.x/bottts/svg?seed=admin".into()),
        status: EmployeeStatus::Active,
    }
}

impl SeedData {
    pub fn for_profile(profile: SeedProfile) -> Self {
        match profile {
            SeedProfile::Demo => Self::demo(),
            SeedProfile::Minimal => Self::minimal(),
        }
    }

    /// System administrator only, default dashboards
    pub fn minimal() -> Self {
        Self {
            employees: vec![system_administrator()],
            dashboard_configs: DashboardConfig::defaults(),
            ..Default::default()
        }
    }

    /// Demo directory: two admins, one engineer with attendance and a pending leave
    pub fn demo() -> Self {
        let employees = vec![
            system_administrator(),
            Employee {
                id: "1".into(),
                name: "Alex Rivera".into(),
                email: "alex@dayflow.com".into(),
                password: "password".into(),
                role: UserRole::Admin,
                employee_id: "HR-001".into(),
                job_title: "HR Director".into(),
                department: "Human Resources".into(),
                join_date: date(2022, 1, 15),
                created_at: datetime(2022, 1, 15, 9, 0),
                salary: 8500.0,
                phone: "+1 555-0101".into(),
                address: "123 Pine St, San Francisco, CA".into(),
                profile_picture: Some("https://picsum.photos/seed/alex/200".into()),
                status: EmployeeStatus::Active,
            },
            Employee {
                id: "2".into(),
                name: "Sarah Chen".into(),
                email: "sarah@dayflow.com".into(),
                password: "password".into(),
                role: UserRole::Employee,
                employee_id: "ENG-042".into(),
                job_title: "Senior Frontend Engineer".into(),
                department: "Engineering".into(),
                join_date: date(2023, 3, 10),
                created_at: datetime(2023, 3, 10, 10, 30),
                salary: 7200.0,
                phone: "+1 555-0102".into(),
                address: "456 Oak Ln, Austin, TX".into(),
                profile_picture: Some("https://picsum.photos/seed/sarah/200".into()),
                status: EmployeeStatus::Active,
            },
        ];

        let attendance = vec![
            AttendanceRecord {
                id: "a1".into(),
                employee_id: "2".into(),
                date: date(2024, 5, 20),
                check_in: time(9, 0),
                check_out: Some(time(17, 30)),
                status: AttendanceStatus::Present,
            },
            AttendanceRecord {
                id: "a2".into(),
                employee_id: "2".into(),
                date: date(2024, 5, 21),
                check_in: time(8, 55),
                check_out: Some(time(18, 0)),
                status: AttendanceStatus::Present,
            },
            AttendanceRecord {
                id: "a3".into(),
                employee_id: "2".into(),
                date: date(2024, 5, 22),
                check_in: time(9, 15),
                check_out: None,
                status: AttendanceStatus::Present,
            },
        ];

        let leaves = vec![LeaveRequest {
            id: "l1".into(),
            employee_id: "2".into(),
            leave_type: LeaveType::Sick,
            start_date: date(2024, 6, 1),
            end_date: date(2024, 6, 2),
            reason: "Flu symptoms".into(),
            status: LeaveStatus::Pending,
            admin_comment: None,
        }];

        let payroll = vec![
            PayrollRecord::new("1", "1", "May 2024", 8500.0, 500.0, 1200.0, PayrollStatus::Paid),
            PayrollRecord::new("2", "2", "May 2024", 7200.0, 200.0, 900.0, PayrollStatus::Paid),
        ];

        Self {
            employees,
            attendance,
            leaves,
            notifications: Vec::new(),
            dashboard_configs: DashboardConfig::defaults(),
            payroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_seed_shape() {
        let seed = SeedData::demo();
        assert_eq!(seed.employees.len(), 3);
        assert_eq!(seed.attendance.len(), 3);
        assert_eq!(seed.leaves.len(), 1);
        assert!(seed.notifications.is_empty());
        assert_eq!(seed.payroll[1].net_pay, 6500.0);
        assert!(seed.attendance[2].is_open());
    }

    #[test]
    fn test_minimal_seed_has_admin_only() {
        let seed = SeedData::minimal();
        assert_eq!(seed.employees.len(), 1);
        assert!(seed.employees[0].is_admin());
        assert!(seed.attendance.is_empty());
        assert_eq!(seed.dashboard_configs.len(), 2);
    }
}
