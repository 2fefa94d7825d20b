/// Data models for the appointment calendar.
///
/// This module defines the records consumed from the clinic API:
/// - StatusCategory: display category derived from the free-form status
/// - Appointment: a scheduled visit as returned by the appointments endpoint
///
/// Appointments are read-only here. Decoding is deliberately lenient: a
/// malformed date makes the appointment unscheduled instead of failing the
/// whole response.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Duration assumed when the record carries none.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Longest appointment the calendar will lay out; longer values are clamped.
pub const MAX_DURATION_MINUTES: i64 = 7 * 24 * 60;

/// Label shown when the record has no patient name.
pub const DEFAULT_PATIENT_LABEL: &str = "Patient";

/// Display category for an appointment status.
///
/// The API sends status as a plain string, so unknown values are expected
/// and fall back to `Other` rather than being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusCategory {
    Confirmed,
    Pending,
    Cancelled,
    Completed,
    Other,
}

impl StatusCategory {
    pub const ALL: [StatusCategory; 5] = [
        StatusCategory::Confirmed,
        StatusCategory::Pending,
        StatusCategory::Cancelled,
        StatusCategory::Completed,
        StatusCategory::Other,
    ];

    /// Map a raw status string onto a category.
    pub fn from_label(value: &str) -> Self {
        match value.to_lowercase().trim() {
            "confirmed" | "scheduled" => StatusCategory::Confirmed,
            "pending" => StatusCategory::Pending,
            "cancelled" | "canceled" => StatusCategory::Cancelled,
            "completed" => StatusCategory::Completed,
            _ => StatusCategory::Other,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StatusCategory::Confirmed => "CONFIRMED",
            StatusCategory::Pending => "PENDING",
            StatusCategory::Cancelled => "CANCELLED",
            StatusCategory::Completed => "COMPLETED",
            StatusCategory::Other => "OTHER",
        }
    }

    /// Hex colour used for chips and blocks of this category.
    pub fn color(&self) -> &'static str {
        match self {
            StatusCategory::Confirmed => "#2e7d32",
            StatusCategory::Pending => "#ed6c02",
            StatusCategory::Cancelled => "#d32f2f",
            StatusCategory::Completed => "#0288d1",
            StatusCategory::Other => "#757575",
        }
    }
}

/// An appointment record as returned by the clinic API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub patient_email: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub appointment_date: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub duration: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub meet_link: Option<String>,
}

impl Appointment {
    /// Create an appointment with only the identity and start set.
    pub fn new(id: impl Into<String>, appointment_date: Option<DateTime<FixedOffset>>) -> Self {
        Appointment {
            id: id.into(),
            patient_name: None,
            patient_email: None,
            appointment_date,
            duration: None,
            status: None,
            notes: None,
            meet_link: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.patient_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_PATIENT_LABEL)
    }

    /// Length in minutes, falling back to the default for absent or
    /// non-positive values and capped at a week.
    pub fn duration_minutes(&self) -> i64 {
        match self.duration {
            Some(minutes) if minutes > 0 => minutes.min(MAX_DURATION_MINUTES),
            _ => DEFAULT_DURATION_MINUTES,
        }
    }

    pub fn status_category(&self) -> StatusCategory {
        self.status
            .as_deref()
            .map(StatusCategory::from_label)
            .unwrap_or(StatusCategory::Other)
    }

    /// Case-insensitive substring match over patient name, email and notes.
    /// An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        [&self.patient_name, &self.patient_email, &self.notes]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Parse an appointment start as sent by the API.
///
/// RFC 3339 is tried first. Naive timestamps and bare dates are read as UTC.
pub fn parse_appointment_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "invalid appointment id: {}",
            other
        ))),
    }
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => parse_appointment_date(&raw),
        _ => None,
    })
}

fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
