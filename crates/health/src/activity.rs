use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use agrolytics_core::{ParcelId, ValueObject};

/// Operational activity type.
///
/// Legacy records carry Spanish tags; both spellings map to the same variant.
/// Unrecognized tags are preserved verbatim so nothing is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    Harvest,
    Milking,
    Weighing,
    Irrigation,
    Fertilization,
    Sowing,
    Other(String),
}

impl ActivityType {
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "harvest" | "cosecha" => Self::Harvest,
            "milking" | "ordeño" => Self::Milking,
            "weighing" | "pesaje" => Self::Weighing,
            "irrigation" | "riego" => Self::Irrigation,
            "fertilization" | "fertilización" => Self::Fertilization,
            "sowing" | "siembra" => Self::Sowing,
            _ => Self::Other(tag.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Harvest => "Harvest",
            Self::Milking => "Milking",
            Self::Weighing => "Weighing",
            Self::Irrigation => "Irrigation",
            Self::Fertilization => "Fertilization",
            Self::Sowing => "Sowing",
            Self::Other(tag) => tag,
        }
    }

    /// Activities that produce measurable output (yield, milk, weight).
    pub fn is_productive(&self) -> bool {
        matches!(self, Self::Harvest | Self::Milking | Self::Weighing)
    }
}

impl From<String> for ActivityType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for ActivityType {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<ActivityType> for String {
    fn from(value: ActivityType) -> Self {
        match value {
            ActivityType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl core::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dated, typed operational event recorded against one parcel.
///
/// Produced by the external activity ledger; the engine only reads it.
/// `timestamp` is `None` when the source value was missing or unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub parcel_id: ParcelId,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    #[serde(default, deserialize_with = "deserialize_lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
}

impl ValueObject for ActivityRecord {}

impl ActivityRecord {
    pub fn new(
        parcel_id: ParcelId,
        activity_type: impl Into<ActivityType>,
        timestamp: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            parcel_id,
            activity_type: activity_type.into(),
            timestamp: Some(timestamp),
            description: description.into(),
        }
    }

    /// Build a record from a raw timestamp string as stored upstream.
    pub fn from_raw(
        parcel_id: ParcelId,
        activity_type: impl Into<ActivityType>,
        raw_timestamp: &str,
        description: impl Into<String>,
    ) -> Self {
        Self {
            parcel_id,
            activity_type: activity_type.into(),
            timestamp: parse_timestamp(raw_timestamp),
            description: description.into(),
        }
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a stored timestamp leniently.
///
/// Accepts RFC 3339, naive date-times (taken as UTC) and bare dates (midnight
/// UTC). Anything else yields `None` and is excluded from recency computation.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    tracing::debug!(raw, "dropping unparseable activity timestamp");
    None
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn deserialize_lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawTimestamp>::deserialize(deserializer)? {
        Some(RawTimestamp::Text(raw)) => parse_timestamp(&raw),
        Some(RawTimestamp::Other(_)) | None => None,
    })
}
