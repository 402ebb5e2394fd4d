//! Clock-in / clock-out and attendance views

use chrono::{NaiveDate, NaiveTime};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{AttendanceRecord, AttendanceStatus, Employee};
use shared::util::prefixed_id;

use super::{CalendarCell, month_calendar};
use crate::auth::require_session;
use crate::store::AppStore;
use crate::utils::time;

fn open_record_on<'a>(store: &'a AppStore, viewer: &Employee, date: NaiveDate) -> Option<&'a AttendanceRecord> {
    store
        .attendance()
        .iter()
        .find(|r| r.employee_id == viewer.id && r.date == date && r.is_open())
}

/// The session's open record for today, if any
pub fn open_session(store: &AppStore) -> AppResult<Option<AttendanceRecord>> {
    let viewer = require_session(store)?;
    Ok(open_record_on(store, &viewer, time::today()).cloned())
}

/// Clock in now
pub fn clock_in(store: &mut AppStore) -> AppResult<AttendanceRecord> {
    clock_in_at(store, time::today(), time::now_hh_mm())
}

/// Clock in at a given local date and time
pub fn clock_in_at(store: &mut AppStore, date: NaiveDate, at: NaiveTime) -> AppResult<AttendanceRecord> {
    let viewer = require_session(store)?;
    if let Some(open) = open_record_on(store, &viewer, date) {
        return Err(AppError::new(ErrorCode::AlreadyCheckedIn).with_detail("recordId", open.id.as_str()));
    }

    let record = AttendanceRecord {
        id: prefixed_id("att"),
        employee_id: viewer.id,
        date,
        check_in: at,
        check_out: None,
        status: AttendanceStatus::Present,
    };
    store.record_attendance(record.clone());
    Ok(record)
}

/// Clock out now
pub fn clock_out(store: &mut AppStore) -> AppResult<AttendanceRecord> {
    clock_out_at(store, time::today(), time::now_hh_mm())
}

/// Close the session's open record for `date`
pub fn clock_out_at(store: &mut AppStore, date: NaiveDate, at: NaiveTime) -> AppResult<AttendanceRecord> {
    let viewer = require_session(store)?;
    let mut record = open_record_on(store, &viewer, date)
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::NotCheckedIn))?;

    record.check_out = Some(at);
    store.record_attendance(record.clone());
    Ok(record)
}

/// Records visible to the session: admins see all, employees their own
pub fn visible_records(store: &AppStore) -> AppResult<Vec<AttendanceRecord>> {
    let viewer = require_session(store)?;
    Ok(store
        .attendance()
        .iter()
        .filter(|r| viewer.is_admin() || r.employee_id == viewer.id)
        .cloned()
        .collect())
}

/// Visible records laid out over a month grid
pub fn calendar(store: &AppStore, year: i32, month: u32) -> AppResult<Vec<CalendarCell<AttendanceRecord>>> {
    let records = visible_records(store)?;
    Ok(month_calendar(year, month, |date| {
        records.iter().filter(|r| r.date == date).cloned().collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::login;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn employee_store() -> AppStore {
        let mut store = AppStore::open_in_memory().unwrap();
        login(&mut store, "sarah@dayflow.com", "password").unwrap();
        store
    }

    #[test]
    fn test_clock_in_then_out() {
        let mut store = employee_store();
        let day = d(2024, 6, 3);

        let opened = clock_in_at(&mut store, day, t(9, 5)).unwrap();
        assert!(opened.id.starts_with("att_"));
        assert_eq!(opened.status, AttendanceStatus::Present);
        assert_eq!(store.attendance().len(), 4);

        let err = clock_in_at(&mut store, day, t(9, 10)).unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyCheckedIn);

        let closed = clock_out_at(&mut store, day, t(17, 35)).unwrap();
        assert_eq!(closed.id, opened.id);
        assert_eq!(closed.worked_minutes(), 8 * 60 + 30);
        assert_eq!(store.attendance().len(), 4);

        let err = clock_out_at(&mut store, day, t(18, 0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotCheckedIn);
    }

    #[test]
    fn test_open_record_on_other_day_does_not_block() {
        let mut store = employee_store();
        // Seed record a3 on 2024-05-22 is still open
        assert!(clock_in_at(&mut store, d(2024, 5, 23), t(9, 0)).is_ok());
        assert!(clock_in_at(&mut store, d(2024, 5, 22), t(9, 0)).is_err());
    }

    #[test]
    fn test_visibility_by_role() {
        let mut store = employee_store();
        assert_eq!(visible_records(&store).unwrap().len(), 3);

        login(&mut store, "alex@dayflow.com", "password").unwrap();
        clock_in_at(&mut store, d(2024, 5, 22), t(8, 0)).unwrap();
        assert_eq!(visible_records(&store).unwrap().len(), 4);

        login(&mut store, "sarah@dayflow.com", "password").unwrap();
        assert_eq!(visible_records(&store).unwrap().len(), 3);
    }

    #[test]
    fn test_calendar_grid() {
        let store = employee_store();
        // May 2024 starts on a Wednesday
        let cells = calendar(&store, 2024, 5).unwrap();
        assert_eq!(cells.len(), 3 + 31);
        assert!(cells[..3].iter().all(|c| c.date.is_none()));

        let may_20 = cells.iter().find(|c| c.date == Some(d(2024, 5, 20))).unwrap();
        assert_eq!(may_20.entries.len(), 1);
        assert_eq!(may_20.entries[0].id, "a1");
    }
}
