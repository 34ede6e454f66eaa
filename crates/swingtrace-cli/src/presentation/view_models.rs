use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use swingtrace_engine::{MovementSummary, SessionStats};
use swingtrace_runtime::Config;
use swingtrace_types::{Hand, MovementId, MovementType, Quaternion, SessionId, Vec3};

// --------------------------------------------------------
// Common envelope
// --------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusBadge {
    pub level: StatusLevel,
    pub label: String,
}

impl StatusBadge {
    pub fn success(label: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Success,
            label: label.into(),
        }
    }

    pub fn info(label: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            label: label.into(),
        }
    }

    pub fn warning(label: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Warning,
            label: label.into(),
        }
    }

    pub fn icon(&self) -> &str {
        match self.level {
            StatusLevel::Success => "[ok]",
            StatusLevel::Info => "[i]",
            StatusLevel::Warning => "[!]",
            StatusLevel::Error => "[x]",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Guidance {
    pub description: String,
    pub command: Option<String>,
}

impl Guidance {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: None,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }
}

#[derive(Debug, Serialize)]
pub struct CommandResultViewModel<T>
where
    T: Serialize,
{
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<StatusBadge>,

    pub content: T,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Guidance>,
}

impl<T> CommandResultViewModel<T>
where
    T: Serialize,
{
    pub fn new(content: T) -> Self {
        Self {
            badge: None,
            content,
            suggestions: Vec::new(),
        }
    }

    pub fn with_badge(mut self, badge: StatusBadge) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn with_suggestion(mut self, guide: Guidance) -> Self {
        self.suggestions.push(guide);
        self
    }
}

// --------------------------------------------------------
// Sessions
// --------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SessionListEntry {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    pub movement_count: usize,
    pub sample_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionListViewModel {
    pub sessions: Vec<SessionListEntry>,
    pub total_count: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovementEntry {
    pub id: MovementId,
    pub movement_type: MovementType,
    pub hand: Hand,
    pub created_at: DateTime<Utc>,
    pub summary: MovementSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionDetailViewModel {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    pub stats: SessionStats,
    pub movements: Vec<MovementEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionDeleteViewModel {
    pub id: SessionId,
    pub movement_count: usize,
    pub sample_count: usize,
}

// --------------------------------------------------------
// Recording
// --------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RecordedMovementEntry {
    pub id: MovementId,
    pub movement_type: MovementType,
    pub hand: Hand,
    pub sample_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordViewModel {
    pub session_id: SessionId,
    pub movements: Vec<RecordedMovementEntry>,
    pub sample_count: usize,
    /// Stopped early by Ctrl-C.
    pub interrupted: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_commands: Vec<String>,
}

// --------------------------------------------------------
// Movements
// --------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ExportViewModel {
    pub movement_id: MovementId,
    pub path: PathBuf,
    pub row_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryViewModel {
    pub movement_id: MovementId,
    pub movement_type: MovementType,
    pub hand: Hand,
    pub sample_count: usize,
    pub max_speed: f64,
    pub positions: Vec<Vec3>,
    pub speeds: Vec<f64>,
    /// Hex color per segment.
    pub colors: Vec<String>,
    pub orientations: Vec<Quaternion>,
    pub key_times: Vec<f64>,
}

// --------------------------------------------------------
// Config
// --------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ConfigViewModel {
    pub path: PathBuf,
    pub exists: bool,
    pub config: Config,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInitViewModel {
    pub path: PathBuf,
    pub written: bool,
}
