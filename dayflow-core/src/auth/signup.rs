//! 自助申请账号

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    AccessRequest, Employee, EmployeeStatus, NotificationDraft, NotificationType, Recipient,
    UserRole, default_avatar_url,
};
use shared::util::{prefixed_id, random_in};

use crate::store::AppStore;
use crate::utils::time;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_optional_text, validate_required_text,
};

/// 申请表单的默认部门
pub const DEFAULT_DEPARTMENT: &str = "Engineering";

const DEFAULT_JOB_TITLE: &str = "System Contributor";
const SIGNUP_SALARY: f64 = 4500.0;

/// 提交访问申请
///
/// 创建一个 PENDING 状态的 EMPLOYEE，工号为 `EXT-###`。写入后除
/// 入职通知外，再向全体管理员发送一条 "New Identity Request"。
///
/// # 错误
///
/// - 姓名 / 邮箱 / 密码为空: `RequiredField`
/// - 邮箱已存在 (不区分大小写): `EmployeeEmailExists`
pub fn request_access(store: &mut AppStore, request: AccessRequest) -> AppResult<Employee> {
    validate_required_text(&request.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&request.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&request.password, "password", MAX_PASSWORD_LEN)?;
    validate_optional_text(&request.job_title, "jobTitle", MAX_NAME_LEN)?;
    validate_optional_text(&request.department, "department", MAX_NAME_LEN)?;

    if store.employee_by_email(&request.email).is_some() {
        return Err(AppError::new(ErrorCode::EmployeeEmailExists).with_detail("email", request.email));
    }

    let name = request.name.trim().to_string();
    let employee = Employee {
        id: prefixed_id("emp"),
        email: request.email.trim().to_string(),
        password: request.password,
        role: UserRole::Employee,
        employee_id: format!("EXT-{}", random_in(100, 999)),
        job_title: request
            .job_title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string()),
        department: request
            .department
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string()),
        join_date: time::today(),
        created_at: chrono::Local::now().naive_local(),
        salary: SIGNUP_SALARY,
        phone: "Unassigned".to_string(),
        address: "Remote Terminal".to_string(),
        profile_picture: Some(default_avatar_url(&name)),
        status: EmployeeStatus::Pending,
        name,
    };

    store.provision_employee(employee.clone());
    store.push_notification(NotificationDraft::new(
        Recipient::AdminAll,
        NotificationType::Security,
        "New Identity Request",
        format!(
            "{} has requested access and is waiting for approval.",
            employee.name
        ),
    ));
    tracing::info!(employee_id = %employee.id, badge = %employee.employee_id, "Access requested");
    Ok(employee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::login;

    fn request(email: &str) -> AccessRequest {
        AccessRequest {
            name: "Morgan Diaz".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            job_title: None,
            department: None,
        }
    }

    #[test]
    fn test_request_access_creates_pending_employee() {
        let mut store = AppStore::open_in_memory().unwrap();
        let employee = request_access(&mut store, request("morgan@dayflow.com")).unwrap();

        assert_eq!(employee.status, EmployeeStatus::Pending);
        assert_eq!(employee.role, UserRole::Employee);
        assert!(employee.id.starts_with("emp_"));
        assert!(employee.employee_id.starts_with("EXT-"));
        assert_eq!(employee.employee_id.len(), 7);
        assert_eq!(employee.job_title, "System Contributor");
        assert_eq!(employee.department, "Engineering");
        assert_eq!(employee.salary, 4500.0);
        assert_eq!(employee.phone, "Unassigned");
        assert_eq!(employee.address, "Remote Terminal");
        assert_eq!(store.employees()[0].id, employee.id);

        // Provisioning notice plus the identity request
        let subjects: Vec<&str> = store
            .notifications()
            .iter()
            .map(|n| n.subject.as_str())
            .collect();
        assert_eq!(
            subjects,
            vec!["New Identity Request", "Security: New User Provisioned"]
        );
    }

    #[test]
    fn test_request_access_rejects_duplicate_email() {
        let mut store = AppStore::open_in_memory().unwrap();
        let err = request_access(&mut store, request("ALEX@dayflow.com")).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeEmailExists);
        assert_eq!(err.message, "Identity already exists in system records.");
        assert_eq!(store.employees().len(), 3);
    }

    #[test]
    fn test_request_access_requires_fields() {
        let mut store = AppStore::open_in_memory().unwrap();
        let mut missing = request("new@dayflow.com");
        missing.password = String::new();
        let err = request_access(&mut store, missing).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "Please complete all mandatory protocols.");
    }

    #[test]
    fn test_pending_account_cannot_log_in() {
        let mut store = AppStore::open_in_memory().unwrap();
        request_access(&mut store, request("morgan@dayflow.com")).unwrap();
        let err = login(&mut store, "morgan@dayflow.com", "secret").unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountPending);
    }
}
