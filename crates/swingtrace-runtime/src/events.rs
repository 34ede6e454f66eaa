use serde::{Deserialize, Serialize};
use std::fmt;
use swingtrace_types::{Hand, MovementId, MovementType, SessionId};

/// Lifecycle state of the capture side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaptureState {
    Idle,
    SessionActive,
    MovementActive,
}

impl CaptureState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureState::Idle => "idle",
            CaptureState::SessionActive => "sessionActive",
            CaptureState::MovementActive => "movementActive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(CaptureState::Idle),
            "sessionActive" => Some(CaptureState::SessionActive),
            "movementActive" => Some(CaptureState::MovementActive),
            _ => None,
        }
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notifications emitted by the capture side after it handles an input.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    StateChanged {
        from: CaptureState,
        to: CaptureState,
    },
    MovementRecorded {
        session_id: SessionId,
        movement_id: MovementId,
        movement_type: MovementType,
        hand: Hand,
        sample_count: usize,
    },
    /// A late reading was appended to an already recorded movement.
    MovementExtended {
        session_id: SessionId,
        movement_id: MovementId,
        sample_count: usize,
    },
    SessionEnded {
        session_id: SessionId,
        movement_count: usize,
        sample_count: usize,
    },
    /// A command that had no effect in the current state, or was refused.
    CommandIgnored {
        command: &'static str,
        state: CaptureState,
        reason: String,
    },
    PersistenceFailed {
        session_id: SessionId,
        message: String,
    },
}
