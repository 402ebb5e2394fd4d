//! 业务服务层
//!
//! 每个子模块对应一个页面的读写操作，均以 [`AppStore`](crate::store::AppStore)
//! 为唯一数据来源，并通过 [`crate::auth`] 的守卫确认当前会话：
//!
//! - [`directory`] - 员工目录 (增删改查、审批、筛选分页)
//! - [`attendance`] - 打卡与考勤日历
//! - [`leave`] - 请假申请与审批
//! - [`payroll`] - 薪资账本与批量发放
//! - [`dashboard`] - 仪表盘统计与组件配置
//! - [`notifications`] - 通知托盘
//! - [`profile`] - 个人资料、密码与头像

pub mod attendance;
pub mod dashboard;
pub mod directory;
pub mod leave;
pub mod notifications;
pub mod payroll;
pub mod profile;

use chrono::NaiveDate;
use serde::Serialize;

use crate::utils::time;

/// One cell of a Sunday-first month grid; leading blanks have no date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell<T> {
    pub date: Option<NaiveDate>,
    pub entries: Vec<T>,
}

/// Lay `entries_for` out over the month grid
pub(crate) fn month_calendar<T>(
    year: i32,
    month: u32,
    mut entries_for: impl FnMut(NaiveDate) -> Vec<T>,
) -> Vec<CalendarCell<T>> {
    time::month_grid(year, month)
        .into_iter()
        .map(|date| CalendarCell {
            entries: date.map(&mut entries_for).unwrap_or_default(),
            date,
        })
        .collect()
}
