use serde::{Deserialize, Serialize};

/// Reviewer decision state.  No state is terminal; either action may be
/// taken again at any time and simply overwrites the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Draft,
    Approved,
    NeedsChanges,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Draft => "draft",
            ReviewStatus::Approved => "approved",
            ReviewStatus::NeedsChanges => "needs_changes",
        }
    }
}

/// Working state persisted per trace id: the edited document, the calendar
/// controls, the decision status, and a write timestamp (Unix millis).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewRecord {
    pub md: String,
    pub weeks: u32,
    #[serde(rename = "startISO")]
    pub start_iso: Option<String>,
    pub status: ReviewStatus,
    pub ts: i64,
}

impl Default for ReviewRecord {
    fn default() -> Self {
        Self {
            md: String::new(),
            weeks: 4,
            start_iso: None,
            status: ReviewStatus::default(),
            ts: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        for (status, label) in [
            (ReviewStatus::Draft, "\"draft\""),
            (ReviewStatus::Approved, "\"approved\""),
            (ReviewStatus::NeedsChanges, "\"needs_changes\""),
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, label);
            let back: ReviewStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn record_serde_roundtrip_keeps_field_names() {
        let record = ReviewRecord {
            md: "### 유산소 운동".to_string(),
            weeks: 6,
            start_iso: Some("2025-09-01T09:00:00".to_string()),
            status: ReviewStatus::Approved,
            ts: 1_756_000_000_000,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"startISO\""));
        assert!(json.contains("\"status\":\"approved\""));
        let back: ReviewRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn record_tolerates_missing_fields() {
        let back: ReviewRecord = serde_json::from_str(r#"{"md":"x"}"#).unwrap();
        assert_eq!(back.md, "x");
        assert_eq!(back.weeks, 4);
        assert_eq!(back.status, ReviewStatus::Draft);
        assert!(back.start_iso.is_none());
    }
}
