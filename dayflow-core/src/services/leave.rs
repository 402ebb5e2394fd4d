//! Leave applications and decisions

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{LeaveCreate, LeaveRequest, LeaveStatus};
use shared::util::prefixed_id;

use super::{CalendarCell, month_calendar};
use crate::auth::{require_admin, require_employee, require_session};
use crate::store::AppStore;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text, validate_required_text};

/// File a leave request for the session employee
pub fn apply(store: &mut AppStore, payload: LeaveCreate) -> AppResult<LeaveRequest> {
    let viewer = require_session(store)?;
    require_employee(&viewer)?;

    let start_date = payload.start_date.ok_or_else(|| AppError::required("startDate"))?;
    let end_date = payload.end_date.ok_or_else(|| AppError::required("endDate"))?;
    validate_required_text(&payload.reason, "reason", MAX_NOTE_LEN)?;
    if end_date < start_date {
        return Err(AppError::new(ErrorCode::LeaveInvalidRange)
            .with_detail("startDate", start_date.to_string())
            .with_detail("endDate", end_date.to_string()));
    }

    let request = LeaveRequest {
        id: prefixed_id("leave"),
        employee_id: viewer.id,
        leave_type: payload.leave_type,
        start_date,
        end_date,
        reason: payload.reason.trim().to_string(),
        status: LeaveStatus::Pending,
        admin_comment: None,
    };
    store.file_leave(request.clone());
    Ok(request)
}

/// Approve or reject a pending request (admin)
pub fn decide(
    store: &mut AppStore,
    id: &str,
    status: LeaveStatus,
    comment: Option<String>,
) -> AppResult<LeaveRequest> {
    let viewer = require_session(store)?;
    require_admin(&viewer)?;

    if status == LeaveStatus::Pending {
        return Err(AppError::new(ErrorCode::LeaveInvalidDecision));
    }
    validate_optional_text(&comment, "comment", MAX_NOTE_LEN)?;

    let current = store
        .leave(id)
        .ok_or_else(|| AppError::new(ErrorCode::LeaveNotFound).with_detail("id", id))?;
    if current.status.is_final() {
        return Err(AppError::new(ErrorCode::LeaveAlreadyDecided)
            .with_detail("status", current.status.as_str()));
    }

    store.decide_leave(id, status, comment);
    store
        .leave(id)
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::LeaveNotFound).with_detail("id", id))
}

/// Requests visible to the session: admins see all, employees their own
pub fn visible(store: &AppStore) -> AppResult<Vec<LeaveRequest>> {
    let viewer = require_session(store)?;
    Ok(store
        .leaves()
        .iter()
        .filter(|l| viewer.is_admin() || l.employee_id == viewer.id)
        .cloned()
        .collect())
}

/// Visible requests whose inclusive range covers `date`
pub fn leaves_on(store: &AppStore, date: NaiveDate) -> AppResult<Vec<LeaveRequest>> {
    Ok(visible(store)?
        .into_iter()
        .filter(|l| l.covers(date))
        .collect())
}

/// Visible requests laid out over a month grid
pub fn calendar(store: &AppStore, year: i32, month: u32) -> AppResult<Vec<CalendarCell<LeaveRequest>>> {
    let leaves = visible(store)?;
    Ok(month_calendar(year, month, |date| {
        leaves.iter().filter(|l| l.covers(date)).cloned().collect()
    }))
}
