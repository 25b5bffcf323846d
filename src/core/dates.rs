// src/core/dates.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Canonical on-disk format for the `date` column.
pub const STORE_FMT: &str = "%Y-%m-%d %H:%M:%S";

const DATETIME_FMTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FMTS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a match date. Date-only values land on midnight.
pub fn parse(cell: &str) -> Option<NaiveDateTime> {
    let t = cell.trim();
    if t.is_empty() { return None; }

    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, fmt) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt.naive_utc());
    }
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

pub fn format_store(dt: &NaiveDateTime) -> String {
    dt.format(STORE_FMT).to_string()
}

pub mod serde_store {
    //! `#[serde(with = ...)]` adapter for the `date` column.
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&super::format_store(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(de)?;
        super::parse(&s).ok_or_else(|| de::Error::custom(format!("bad date {s:?}")))
    }
}
