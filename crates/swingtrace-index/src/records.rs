use chrono::{DateTime, Utc};
use swingtrace_types::SessionId;

/// Lightweight session summary for list operations.
///
/// Carries counts only; use `Database::load_session` for the full tree.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    pub movement_count: usize,
    pub sample_count: usize,
}
