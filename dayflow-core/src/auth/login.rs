//! 登录与登出

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Employee, EmployeeStatus};

use crate::security_log;
use crate::store::AppStore;

/// 登录
///
/// 邮箱不区分大小写，密码逐字比对。凭据错误统一返回
/// `InvalidCredentials`，不暴露是哪一项不匹配。凭据正确但账号
/// 为 PENDING / DISABLED 时返回对应状态错误且不开启会话。
pub fn login(store: &mut AppStore, email: &str, password: &str) -> AppResult<Employee> {
    let user = match store.employee_by_email(email) {
        Some(user) if user.password == password => user.clone(),
        _ => {
            security_log!("WARN", "login_failed", email = email.trim().to_string());
            return Err(AppError::invalid_credentials());
        }
    };

    match user.status {
        EmployeeStatus::Pending => {
            tracing::info!(user_id = %user.id, "Login refused: account pending");
            Err(AppError::new(ErrorCode::AccountPending))
        }
        EmployeeStatus::Disabled => {
            tracing::info!(user_id = %user.id, "Login refused: account disabled");
            Err(AppError::new(ErrorCode::AccountDisabled))
        }
        EmployeeStatus::Active => {
            store.set_current_user(Some(user.clone()));
            Ok(user)
        }
    }
}

/// 登出，清除会话快照
pub fn logout(store: &mut AppStore) {
    store.set_current_user(None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::UserRole;

    #[test]
    fn test_login_admin() {
        let mut store = AppStore::open_in_memory().unwrap();
        let user = login(&mut store, "alex@dayflow.com", "password").unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(store.current_user().unwrap().id, "1");
    }

    #[test]
    fn test_login_email_case_insensitive() {
        let mut store = AppStore::open_in_memory().unwrap();
        let user = login(&mut store, "Sarah@DayFlow.com", "password").unwrap();
        assert_eq!(user.id, "2");
    }

    #[test]
    fn test_login_wrong_password_is_generic() {
        let mut store = AppStore::open_in_memory().unwrap();
        let wrong_password = login(&mut store, "alex@dayflow.com", "nope").unwrap_err();
        let unknown_email = login(&mut store, "who@dayflow.com", "password").unwrap_err();

        assert_eq!(wrong_password.code, ErrorCode::InvalidCredentials);
        assert_eq!(wrong_password.message, unknown_email.message);
        assert_eq!(
            wrong_password.message,
            "Invalid identifier or passkey. Access denied."
        );
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_login_pending_and_disabled() {
        let mut store = AppStore::open_in_memory().unwrap();
        let mut sarah = store.employee("2").unwrap().clone();

        sarah.status = EmployeeStatus::Pending;
        store.upsert_employee(sarah.clone());
        let err = login(&mut store, "sarah@dayflow.com", "password").unwrap_err();
        assert_eq!(
            err.message,
            "Identity is pending verification. Contact System Admin for clearance."
        );

        sarah.status = EmployeeStatus::Disabled;
        store.upsert_employee(sarah);
        let err = login(&mut store, "sarah@dayflow.com", "password").unwrap_err();
        assert_eq!(err.message, "Identity has been suspended. Contact IT.");
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_logout_clears_session() {
        let mut store = AppStore::open_in_memory().unwrap();
        login(&mut store, "alex@dayflow.com", "password").unwrap();
        logout(&mut store);
        assert!(store.current_user().is_none());
    }
}
