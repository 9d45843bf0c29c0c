use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Registry lifecycle state of a GSTIN.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GstinStatus {
    Active,
    Cancelled,
    /// Any other registry state (e.g. "Suspended", "Inactive").
    Other(String),
}

impl GstinStatus {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Active" => GstinStatus::Active,
            "Cancelled" => GstinStatus::Cancelled,
            other => GstinStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            GstinStatus::Active => "Active",
            GstinStatus::Cancelled => "Cancelled",
            GstinStatus::Other(s) => s.as_str(),
        }
    }

    /// `true` for the two states a transaction may be raised against.
    pub fn is_known(&self) -> bool {
        matches!(self, GstinStatus::Active | GstinStatus::Cancelled)
    }
}

impl fmt::Display for GstinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for GstinStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GstinStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(GstinStatus::parse(&s))
    }
}

/// Registry lookup result for one GSTIN.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    #[serde(default)]
    pub gstin: String,
    pub status: GstinStatus,
    #[serde(default, with = "lenient_date")]
    pub registration_date: Option<NaiveDate>,
    #[serde(default, with = "lenient_date")]
    pub cancelled_date: Option<NaiveDate>,
    #[serde(default, with = "lenient_datetime")]
    pub last_updated_on: Option<NaiveDateTime>,
}

impl RegistryEntry {
    pub fn new(gstin: impl Into<String>, status: GstinStatus) -> Self {
        Self {
            gstin: gstin.into(),
            status,
            registration_date: None,
            cancelled_date: None,
            last_updated_on: None,
        }
    }

    pub fn registered_on(mut self, date: NaiveDate) -> Self {
        self.registration_date = Some(date);
        self
    }

    pub fn cancelled_on(mut self, date: NaiveDate) -> Self {
        self.cancelled_date = Some(date);
        self
    }

    pub fn updated_at(mut self, at: NaiveDateTime) -> Self {
        self.last_updated_on = Some(at);
        self
    }
}

/// Parse a host date (`YYYY-MM-DD`, optionally followed by a time part).
/// Empty strings are treated as unset.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    let date_part = t.get(..10).unwrap_or(t);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(t, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| parse_date(t).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

/// Host user date format (`dd-mm-yyyy`).
pub fn format_user_date(d: NaiveDate) -> String {
    d.format("%d-%m-%Y").to_string()
}

mod lenient_date {
    use super::*;

    pub fn serialize<S: Serializer>(v: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(d) => s.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.as_deref().and_then(parse_date))
    }
}

mod lenient_datetime {
    use super::*;

    pub fn serialize<S: Serializer>(v: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(dt) => s.serialize_str(&dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.as_deref().and_then(parse_datetime))
    }
}
