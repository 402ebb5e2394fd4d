//! Attendance Model

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Daily attendance status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    #[serde(rename = "Half-day")]
    HalfDay,
    Leave,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::HalfDay => "Half-day",
            Self::Leave => "Leave",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One clock-in/clock-out session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    /// Owning employee's `id`
    pub employee_id: String,
    pub date: NaiveDate,
    #[serde(with = "serde_helpers::hh_mm")]
    pub check_in: NaiveTime,
    /// `None` while the session is still open
    #[serde(with = "serde_helpers::hh_mm_opt")]
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }

    /// Minutes between check-in and check-out, zero while open
    pub fn worked_minutes(&self) -> i64 {
        match self.check_out {
            Some(out) if out > self.check_in => (out - self.check_in).num_minutes(),
            _ => 0,
        }
    }
}
