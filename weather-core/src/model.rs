use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Raw JSON returned by the weather provider, stored untouched.
pub type WeatherPayload = serde_json::Value;

/// Inbound submission: where and when, plus free-form notes.
///
/// Missing or `null` fields decode as empty strings so that the service's
/// presence check reports them, rather than failing at the decoding step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherSubmission {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

impl WeatherSubmission {
    pub fn new(date: impl Into<String>, location: impl Into<String>) -> Self {
        Self { date: date.into(), location: location.into(), notes: String::new() }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// A submission combined with the weather fetched for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub id: String,
    pub request_date: String,
    pub location: String,
    pub notes: String,
    pub weather_data: WeatherPayload,
    pub created_at: DateTime<Utc>,
}

/// Body returned after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRecord {
    pub id: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
