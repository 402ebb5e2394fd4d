//! Employee directory

use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Employee, EmployeeCreate, EmployeeResponse, EmployeeStatus, EmployeeUpdate, UserRole,
    default_avatar_url,
};
use shared::util::{prefixed_id, random_in};
use std::cmp::Ordering;

use crate::auth::{require_admin, require_session};
use crate::store::AppStore;
use crate::utils::time;
use crate::utils::validation::{
    BADGE_PREFIX, MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_badge,
    validate_email, validate_optional_text, validate_required_text,
};

/// Rows per directory page
pub const PAGE_SIZE: usize = 8;

const DEFAULT_PASSWORD: &str = "password123";
const DEFAULT_DEPARTMENT: &str = "Engineering";
const DEFAULT_SALARY: f64 = 5000.0;

/// Directory sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Name,
    EmployeeId,
    Email,
    Role,
    Status,
    CreatedAt,
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "name" => Ok(Self::Name),
            "employeeid" | "badge" => Ok(Self::EmployeeId),
            "email" => Ok(Self::Email),
            "role" => Ok(Self::Role),
            "status" => Ok(Self::Status),
            "createdat" | "created" => Ok(Self::CreatedAt),
            other => Err(format!("unknown sort field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Directory filters; role and status filters only apply for admins
#[derive(Debug, Clone, Default)]
pub struct DirectoryQuery {
    pub role: Option<UserRole>,
    pub status: Option<EmployeeStatus>,
    pub search: String,
    pub sort_by: SortField,
    pub direction: SortDirection,
    /// 1-based; 0 is treated as 1
    pub page: usize,
}

/// One page of directory results
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryPage {
    pub employees: Vec<EmployeeResponse>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// Random badge suggestion for the provisioning form
pub fn suggest_badge() -> String {
    format!("{}{}", BADGE_PREFIX, random_in(1000, 9999))
}

fn ensure_unique_email(store: &AppStore, email: &str, except_id: Option<&str>) -> AppResult<()> {
    if let Some(existing) = store.employee_by_email(email)
        && except_id != Some(existing.id.as_str())
    {
        return Err(AppError::new(ErrorCode::EmployeeEmailExists).with_detail("email", email));
    }
    Ok(())
}

fn compare(a: &Employee, b: &Employee, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::EmployeeId => a
            .employee_id
            .to_lowercase()
            .cmp(&b.employee_id.to_lowercase()),
        SortField::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
        SortField::Role => a.role.as_str().cmp(b.role.as_str()),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

/// Filter, search, sort and paginate the directory for the current session
pub fn list(store: &AppStore, query: &DirectoryQuery) -> AppResult<DirectoryPage> {
    let viewer = require_session(store)?;
    let needle = query.search.trim().to_lowercase();

    let mut rows: Vec<&Employee> = store
        .employees()
        .iter()
        .filter(|e| {
            if viewer.is_admin() {
                query.role.is_none_or(|r| e.role == r)
                    && query.status.is_none_or(|s| e.status == s)
            } else {
                e.is_active()
            }
        })
        .filter(|e| {
            needle.is_empty()
                || e.name.to_lowercase().contains(&needle)
                || e.employee_id.to_lowercase().contains(&needle)
                || e.email.to_lowercase().contains(&needle)
        })
        .collect();

    rows.sort_by(|a, b| {
        let ord = compare(a, b, query.sort_by);
        match query.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    let total = rows.len();
    let total_pages = total.div_ceil(PAGE_SIZE);
    let page = query.page.max(1);
    let employees = rows
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .map(EmployeeResponse::from)
        .collect();

    Ok(DirectoryPage {
        employees,
        page,
        total_pages,
        total,
    })
}

/// Get employee by id
pub fn get_by_id(store: &AppStore, id: &str) -> AppResult<EmployeeResponse> {
    require_session(store)?;
    store
        .employee(id)
        .map(EmployeeResponse::from)
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id))
}

/// Provision a new employee (admin)
pub fn create(store: &mut AppStore, payload: EmployeeCreate) -> AppResult<EmployeeResponse> {
    let actor = require_session(store)?;
    require_admin(&actor)?;

    validate_badge(&payload.employee_id)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email)?;
    validate_optional_text(&payload.job_title, "jobTitle", MAX_NAME_LEN)?;
    validate_optional_text(&payload.department, "department", MAX_NAME_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    ensure_unique_email(store, &payload.email, None)?;

    let name = payload.name.trim().to_string();
    let employee = Employee {
        id: prefixed_id("emp"),
        email: payload.email.trim().to_string(),
        password: payload
            .password
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
        role: payload.role,
        employee_id: payload.employee_id,
        job_title: payload.job_title.unwrap_or_default(),
        department: payload
            .department
            .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string()),
        join_date: payload.join_date.unwrap_or_else(time::today),
        created_at: chrono::Local::now().naive_local(),
        salary: payload.salary.unwrap_or(DEFAULT_SALARY),
        phone: payload.phone.unwrap_or_default(),
        address: payload.address.unwrap_or_default(),
        profile_picture: Some(default_avatar_url(&name)),
        status: payload.status.unwrap_or(EmployeeStatus::Active),
        name,
    };

    store.provision_employee(employee.clone());
    Ok(EmployeeResponse::from(&employee))
}

/// Update an employee (admin)
///
/// The resulting badge must follow `EMP-####`, so records carrying a
/// legacy or `EXT-###` badge need a new one before they can be saved.
pub fn update(store: &mut AppStore, id: &str, payload: EmployeeUpdate) -> AppResult<EmployeeResponse> {
    let actor = require_session(store)?;
    require_admin(&actor)?;

    let current = store
        .employee(id)
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id))?;

    validate_badge(payload.employee_id.as_deref().unwrap_or(&current.employee_id))?;
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.email {
        validate_email(email)?;
        ensure_unique_email(store, email, Some(id))?;
    }
    if let Some(password) = &payload.password {
        validate_required_text(password, "password", MAX_PASSWORD_LEN)?;
        tracing::info!(employee_id = %id, actor = %actor.id, "Passkey reset by admin");
    }
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;

    let next = payload.apply(&current);
    store.upsert_employee(next.clone());
    Ok(EmployeeResponse::from(&next))
}

/// Approve a pending access request (admin)
///
/// Signups carry an `EXT-###` badge; `badge` assigns the `EMP-####` one
/// required to activate the account.
pub fn approve(store: &mut AppStore, id: &str, badge: Option<String>) -> AppResult<EmployeeResponse> {
    let actor = require_session(store)?;
    require_admin(&actor)?;

    let current = store
        .employee(id)
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id))?;
    if current.status != EmployeeStatus::Pending {
        return Err(AppError::new(ErrorCode::EmployeeNotPending).with_detail("id", id));
    }
    update(
        store,
        id,
        EmployeeUpdate {
            employee_id: badge,
            status: Some(EmployeeStatus::Active),
            ..Default::default()
        },
    )
}

/// Remove an employee (admin); the session identity cannot remove itself
pub fn delete(store: &mut AppStore, id: &str) -> AppResult<bool> {
    let actor = require_session(store)?;
    require_admin(&actor)?;

    if actor.id == id {
        return Err(AppError::new(ErrorCode::EmployeeCannotDeleteSelf));
    }
    if !store.remove_employee(id) {
        return Err(AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id));
    }
    Ok(true)
}
