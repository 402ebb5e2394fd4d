//! 会话守卫

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Employee;

use crate::security_log;
use crate::store::AppStore;

/// 获取当前会话用户
///
/// # 错误
///
/// 未登录返回 `NotAuthenticated`
pub fn require_session(store: &AppStore) -> AppResult<Employee> {
    store
        .current_user()
        .cloned()
        .ok_or_else(AppError::not_authenticated)
}

/// 要求管理员角色
pub fn require_admin(user: &Employee) -> AppResult<()> {
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id.clone(),
            user_role = user.role.as_str()
        );
        return Err(AppError::admin_required());
    }
    Ok(())
}

/// 要求员工角色 (申请假期等仅员工可用的操作)
pub fn require_employee(user: &Employee) -> AppResult<()> {
    if user.is_admin() {
        security_log!("WARN", "employee_role_required", user_id = user.id.clone());
        return Err(AppError::new(ErrorCode::EmployeeRoleRequired));
    }
    Ok(())
}
