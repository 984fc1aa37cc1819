use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Severity of a synthesized [`LogEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single synthesized application log record.
///
/// The base fields are always populated. The optional ones are only set
/// under their level/service conditions and are omitted from the JSON
/// payload when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    #[serde(serialize_with = "serialize_utc", deserialize_with = "deserialize_utc")]
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub service: String,
    pub host: String,
    pub request_id: String,
    pub message: String,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LogEvent {
    /// Record key used when publishing; keeps one service on one partition.
    pub fn key(&self) -> &str {
        &self.service
    }

    /// Serialize the event into the JSON payload sent to the broker.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Render an instant as ISO-8601 with a `Z` suffix.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn serialize_utc<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

fn deserialize_utc<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> LogEvent {
        LogEvent {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            level: Level::Warn,
            service: "db-service".to_string(),
            host: "db-server-01".to_string(),
            request_id: "req-0a1b2c3d".to_string(),
            message: "Memory usage above 80%".to_string(),
            status_code: 200,
            duration_ms: None,
            user_id: Some("user-12345".to_string()),
            ip_address: None,
            amount: None,
            error: None,
        }
    }

    #[test]
    fn test_timestamp_uses_z_suffix() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["timestamp"], "2024-05-01T12:30:00.000000Z");
    }

    #[test]
    fn test_absent_optional_fields_are_omitted() {
        let json = serde_json::to_value(sample()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("user_id"));
        for field in ["duration_ms", "ip_address", "amount", "error"] {
            assert!(!obj.contains_key(field), "{field} should be omitted");
        }
        assert_eq!(obj["level"], "WARN");
    }

    #[test]
    fn test_key_is_service() {
        assert_eq!(sample().key(), "db-service");
    }

    #[test]
    fn test_payload_parses_back() {
        let event = sample();
        let bytes = event.to_json_bytes().unwrap();
        let parsed: LogEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, event);
    }
}
