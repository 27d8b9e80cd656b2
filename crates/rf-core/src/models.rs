//! # Domain Models
//!
//! A feed has exactly one entity: the published [`Post`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One published title/content/timestamp record.
///
/// Stored as `{"title": .., "content": .., "timestamp": ..}` with no other fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Post {
    pub title: String,
    pub content: String,
    /// Assigned by the controller at publish time.
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl Post {
    pub fn new(title: impl Into<String>, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            timestamp,
        }
    }
}

/// RFC 3339 in UTC with millisecond precision (`2024-05-01T08:30:00.000Z`).
/// Any RFC 3339 instant is accepted when reading.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_serializes_like_a_browser_date() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let json = serde_json::to_value(Post::new("Hello", "World", ts)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Hello",
                "content": "World",
                "timestamp": "2024-05-01T08:30:00.000Z"
            })
        );
    }

    #[test]
    fn accepts_offset_timestamps() {
        let raw = r#"{"title":"a","content":"b","timestamp":"2024-05-01T11:30:00+03:00"}"#;
        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.timestamp, Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn rejects_extra_fields() {
        let raw = r#"{"title":"a","content":"b","timestamp":"2024-05-01T08:30:00Z","id":1}"#;
        assert!(serde_json::from_str::<Post>(raw).is_err());
    }
}
