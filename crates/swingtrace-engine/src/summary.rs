use serde::{Deserialize, Serialize};
use swingtrace_types::{Movement, Session};

/// Headline numbers for one recorded movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementSummary {
    pub sample_count: usize,
    pub duration_secs: f64,
    /// Observed delivery rate; 0 when fewer than two samples.
    pub mean_rate_hz: f64,
    pub peak_user_acceleration: f64,
    pub peak_rotation_rate: f64,
}

impl MovementSummary {
    pub fn from_movement(movement: &Movement) -> Self {
        let sample_count = movement.samples.len();
        let duration_secs = movement.duration();
        let mean_rate_hz = if sample_count > 1 && duration_secs > 0.0 {
            (sample_count - 1) as f64 / duration_secs
        } else {
            0.0
        };

        let peak = |f: fn(&swingtrace_types::Sample) -> f64| {
            movement.samples.iter().map(f).fold(0.0, f64::max)
        };

        Self {
            sample_count,
            duration_secs,
            mean_rate_hz,
            peak_user_acceleration: peak(|s| s.user_acceleration.norm()),
            peak_rotation_rate: peak(|s| s.rotation_rate.norm()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub movement_count: usize,
    pub sample_count: usize,
    pub recorded_secs: f64,
}

impl SessionStats {
    pub fn from_session(session: &Session) -> Self {
        Self {
            movement_count: session.movements().len(),
            sample_count: session.sample_count(),
            recorded_secs: session.movements().iter().map(Movement::duration).sum(),
        }
    }
}
