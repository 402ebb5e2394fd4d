//! Per-role dashboard
//!
//! The summary is a pure projection of the store. Sections are only
//! computed when the viewer's role has the matching widget enabled; the
//! admin sections additionally require the viewer to be an admin.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    AttendanceRecord, DashboardConfig, DashboardWidget, Employee, EmployeeResponse, LeaveRequest,
    LeaveStatus, NotificationType, UserRole,
};

use crate::auth::{require_admin, require_session};
use crate::store::AppStore;
use crate::utils::time;

/// Fixed leave allowance shown on the balance tile
const LEAVE_POOL_UNITS: u32 = 14;
/// Rows in each admin list and the activity feed
const FEED_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatTile {
    pub widget: DashboardWidget,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayHours {
    pub day: String,
    pub date: NaiveDate,
    pub hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LeaveBreakdown {
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
}

/// Dashboard contents for one viewer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub role: UserRole,
    pub widgets: Vec<DashboardWidget>,
    pub stats: Vec<StatTile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_hours: Option<Vec<DayHours>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave_breakdown: Option<LeaveBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_provisions: Option<Vec<EmployeeResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_approvals: Option<Vec<LeaveRequest>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_summary: Option<BTreeMap<NotificationType, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<Vec<AttendanceRecord>>,
}

/// Catalog entry for the widget configurator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetOption {
    pub widget: DashboardWidget,
    pub label: &'static str,
    pub enabled: bool,
}

fn stat_tiles(store: &AppStore, viewer: &Employee, config: &DashboardConfig) -> Vec<StatTile> {
    let streak = store
        .attendance()
        .iter()
        .filter(|a| a.employee_id == viewer.id)
        .count();
    let pending = store
        .leaves()
        .iter()
        .filter(|l| l.employee_id == viewer.id && l.status == LeaveStatus::Pending)
        .count();

    [
        (DashboardWidget::Streak, "Engagement Streak", format!("{} Days", streak)),
        (DashboardWidget::Leaves, "Pending Protocols", pending.to_string()),
        (DashboardWidget::Balance, "Leave Pool", format!("{} Units", LEAVE_POOL_UNITS)),
        (DashboardWidget::Team, "System Assets", store.employees().len().to_string()),
    ]
    .into_iter()
    .filter(|(widget, _, _)| config.shows(*widget))
    .map(|(widget, label, value)| StatTile { widget, label, value })
    .collect()
}

fn weekly_hours(store: &AppStore, viewer: &Employee, today: NaiveDate) -> Vec<DayHours> {
    time::work_week_of(today)
        .into_iter()
        .map(|date| {
            let minutes: i64 = store
                .attendance()
                .iter()
                .filter(|a| a.employee_id == viewer.id && a.date == date)
                .map(AttendanceRecord::worked_minutes)
                .sum();
            DayHours {
                day: date.weekday().to_string(),
                date,
                hours: (minutes as f64 / 60.0 * 10.0).round() / 10.0,
            }
        })
        .collect()
}

fn leave_breakdown(store: &AppStore, viewer: &Employee) -> LeaveBreakdown {
    store
        .leaves()
        .iter()
        .filter(|l| l.employee_id == viewer.id)
        .fold(LeaveBreakdown::default(), |mut acc, l| {
            match l.status {
                LeaveStatus::Approved => acc.approved += 1,
                LeaveStatus::Pending => acc.pending += 1,
                LeaveStatus::Rejected => acc.rejected += 1,
            }
            acc
        })
}

fn alert_summary(store: &AppStore) -> BTreeMap<NotificationType, usize> {
    let mut counts: BTreeMap<NotificationType, usize> =
        NotificationType::ALL.into_iter().map(|t| (t, 0)).collect();
    for n in store.notifications() {
        *counts.entry(n.kind).or_default() += 1;
    }
    counts
}

/// Dashboard for the session as of today
pub fn summary(store: &AppStore) -> AppResult<DashboardSummary> {
    summary_on(store, time::today())
}

/// Dashboard for the session, with the working week taken from `today`
pub fn summary_on(store: &AppStore, today: NaiveDate) -> AppResult<DashboardSummary> {
    let viewer = require_session(store)?;
    let config = store
        .dashboard_config(viewer.role)
        .cloned()
        .unwrap_or(DashboardConfig {
            role: viewer.role,
            visible_widgets: Vec::new(),
        });
    let admin_section = |widget| viewer.is_admin() && config.shows(widget);

    let recent_provisions = admin_section(DashboardWidget::Provisions).then(|| {
        let mut newest: Vec<&Employee> = store.employees().iter().collect();
        newest.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        newest
            .into_iter()
            .take(FEED_LEN)
            .map(EmployeeResponse::from)
            .collect()
    });
    let pending_approvals = admin_section(DashboardWidget::Approvals).then(|| {
        store
            .leaves()
            .iter()
            .filter(|l| l.status == LeaveStatus::Pending)
            .take(FEED_LEN)
            .cloned()
            .collect()
    });

    Ok(DashboardSummary {
        role: viewer.role,
        stats: stat_tiles(store, &viewer, &config),
        weekly_hours: config
            .shows(DashboardWidget::Hours)
            .then(|| weekly_hours(store, &viewer, today)),
        leave_breakdown: config
            .shows(DashboardWidget::Summary)
            .then(|| leave_breakdown(store, &viewer)),
        recent_provisions,
        pending_approvals,
        alert_summary: admin_section(DashboardWidget::Alerts).then(|| alert_summary(store)),
        activity: config
            .shows(DashboardWidget::Activity)
            .then(|| store.attendance().iter().take(FEED_LEN).cloned().collect()),
        widgets: config.visible_widgets,
    })
}

/// Widgets offered for `role`, with their current state
pub fn catalog(store: &AppStore, role: UserRole) -> Vec<WidgetOption> {
    let config = store.dashboard_config(role);
    DashboardWidget::available_for(role)
        .into_iter()
        .map(|widget| WidgetOption {
            widget,
            label: widget.label(),
            enabled: config.is_some_and(|c| c.shows(widget)),
        })
        .collect()
}

/// Flip one widget for a role (admin). Enabling appends to the end of the list.
pub fn toggle_widget(
    store: &mut AppStore,
    role: UserRole,
    widget: DashboardWidget,
) -> AppResult<DashboardConfig> {
    let actor = require_session(store)?;
    require_admin(&actor)?;

    let mut widgets = store
        .dashboard_config(role)
        .map(|c| c.visible_widgets.clone())
        .unwrap_or_default();

    if widgets.contains(&widget) {
        widgets.retain(|w| *w != widget);
    } else {
        if role == UserRole::Employee && widget.is_admin_only() {
            return Err(AppError::new(ErrorCode::WidgetNotAllowed)
                .with_detail("widget", widget.as_str()));
        }
        widgets.push(widget);
    }

    store.set_dashboard_widgets(role, widgets.clone());
    Ok(DashboardConfig {
        role,
        visible_widgets: widgets,
    })
}
