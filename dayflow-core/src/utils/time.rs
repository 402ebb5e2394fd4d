//! 时间工具函数：本地日期、时分、月历
//!
//! Store 与服务层只处理 `NaiveDate` / `NaiveTime`，
//! 当前时间统一从这里取，便于测试时替换为固定值。

use chrono::{Datelike, Local, NaiveDate, NaiveTime, Timelike, Weekday};

use shared::error::{AppError, AppResult};

/// 今天 (本地时区)
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 当前时分 (本地时区，秒清零)
pub fn now_hh_mm() -> NaiveTime {
    let now = Local::now().time();
    NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
}

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 解析月份字符串 (YYYY-MM)
pub fn parse_month(month: &str) -> AppResult<(i32, u32)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid month format: {}", month)))?;
    Ok((first.year(), first.month()))
}

/// 某月天数
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(ny, nm, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

/// 前后翻月
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// 月历网格: 周日开头，月初前以 `None` 补位
pub fn month_grid(year: i32, month: u32) -> Vec<Option<NaiveDate>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let offset = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; offset];
    cells.extend((1..=days_in_month(year, month)).filter_map(|d| {
        NaiveDate::from_ymd_opt(year, month, d).map(Some)
    }));
    cells
}

/// 本周工作日 (周一至周五)
pub fn work_week_of(date: NaiveDate) -> Vec<NaiveDate> {
    let monday = date.week(Weekday::Mon).first_day();
    monday.iter_days().take(5).collect()
}
