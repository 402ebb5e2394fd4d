//! Serde helpers for the wall-clock formats used in snapshots
//!
//! - `hh_mm`: `NaiveTime` as `"09:15"`
//! - `hh_mm_opt`: `Option<NaiveTime>` as `"17:30"` or `null`
//! - `local_datetime`: `NaiveDateTime` as `"2024-01-01 08:00:00"`

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer};

const TIME_FORMAT: &str = "%H:%M";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_time<E: serde::de::Error>(raw: &str) -> Result<NaiveTime, E> {
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| E::custom(format!("invalid time: {}", raw)))
}

/// `NaiveTime` serialized as `HH:MM`
pub mod hh_mm {
    use super::*;

    pub fn serialize<S>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&time.format(TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(d)?;
        parse_time(&raw)
    }
}

/// `Option<NaiveTime>` serialized as `HH:MM` or `null`
pub mod hh_mm_opt {
    use super::*;

    pub fn serialize<S>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => s.serialize_str(&t.format(TIME_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(d)? {
            Some(raw) if !raw.is_empty() => parse_time(&raw).map(Some),
            _ => Ok(None),
        }
    }
}

/// `NaiveDateTime` serialized as `YYYY-MM-DD HH:MM:SS`
pub mod local_datetime {
    use super::*;

    pub fn serialize<S>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&dt.format(DATETIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .map_err(|_| serde::de::Error::custom(format!("invalid datetime: {}", raw)))
    }
}
