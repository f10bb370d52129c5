use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Know,
    DontKnow,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Know => "know",
            Outcome::DontKnow => "dont_know",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingEvent {
    pub poem_id: String,
    pub outcome: Outcome,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl GradingEvent {
    pub fn new(poem_id: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            poem_id: poem_id.into(),
            outcome,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn at(poem_id: impl Into<String>, outcome: Outcome, timestamp: i64) -> Self {
        Self {
            poem_id: poem_id.into(),
            outcome,
            timestamp,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryData {
    pub schema_version: u32,
    pub events: Vec<GradingEvent>,
}

impl Default for HistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            events: Vec::new(),
        }
    }
}

impl HistoryData {
    /// Check if loaded data has a stale schema version and must be discarded.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serializes_as_snake_case_tag() {
        let event = GradingEvent::at("007", Outcome::DontKnow, 1_700_000_000_000);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"poem_id":"007","outcome":"dont_know","timestamp":1700000000000}"#
        );
    }

    #[test]
    fn test_unknown_outcome_tag_is_rejected() {
        let json = r#"{"poem_id":"007","outcome":"maybe","timestamp":1}"#;
        assert!(serde_json::from_str::<GradingEvent>(json).is_err());
    }

    #[test]
    fn test_default_history_is_current_schema() {
        let data = HistoryData::default();
        assert!(!data.needs_reset());
        assert!(data.events.is_empty());
    }
}
