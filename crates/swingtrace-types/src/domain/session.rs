use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Hand, MovementId, MovementType, Sample, SessionId};
use crate::{Error, Result};

// ==========================================
// 1. Session (a recording spanning many movements)
// ==========================================

/// Top-level recording.
///
/// The movement list grows only while the session is active. Once
/// [`Session::end`] has been called the list is frozen and
/// [`Session::append_movement`] fails with [`Error::SessionClosed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    /// Recording order.
    movements: Vec<Movement>,
}

impl Session {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self::with_id(SessionId::new(), created_at)
    }

    pub fn with_id(id: SessionId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            ended_at: None,
            movements: Vec::new(),
        }
    }

    /// Rebuild a session from storage. The movement order is trusted as-is.
    pub fn restore(
        id: SessionId,
        created_at: DateTime<Utc>,
        ended_at: Option<DateTime<Utc>>,
        movements: Vec<Movement>,
    ) -> Self {
        Self {
            id,
            created_at,
            ended_at,
            movements,
        }
    }

    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn last_movement_mut(&mut self) -> Option<&mut Movement> {
        if !self.is_active() {
            return None;
        }
        self.movements.last_mut()
    }

    pub fn append_movement(&mut self, movement: Movement) -> Result<()> {
        if !self.is_active() {
            return Err(Error::SessionClosed(self.id.to_string()));
        }
        self.movements.push(movement);
        Ok(())
    }

    /// Freeze the session. Calling it again keeps the first end time.
    pub fn end(&mut self, at: DateTime<Utc>) {
        if self.ended_at.is_none() {
            self.ended_at = Some(at);
        }
    }

    pub fn sample_count(&self) -> usize {
        self.movements.iter().map(|m| m.samples.len()).sum()
    }
}

// ==========================================
// 2. Movement (one discrete stroke)
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
    pub movement_type: MovementType,
    pub hand: Hand,
    pub samples: Vec<Sample>,
}

/// First place where a movement's samples break ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderingViolation {
    IndexNotIncreasing { position: usize, previous: u64, current: u64 },
    TimestampDecreasing { position: usize, previous: f64, current: f64 },
    ForeignSample { position: usize },
}

impl fmt::Display for OrderingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingViolation::IndexNotIncreasing {
                position,
                previous,
                current,
            } => write!(
                f,
                "sample {}: index {} does not follow {}",
                position, current, previous
            ),
            OrderingViolation::TimestampDecreasing {
                position,
                previous,
                current,
            } => write!(
                f,
                "sample {}: sensor timestamp {} is before {}",
                position, current, previous
            ),
            OrderingViolation::ForeignSample { position } => {
                write!(f, "sample {} belongs to another movement", position)
            }
        }
    }
}

impl Movement {
    pub fn new(
        session_id: SessionId,
        movement_type: MovementType,
        hand: Hand,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MovementId::new(),
            session_id,
            created_at,
            movement_type,
            hand,
            samples: Vec::new(),
        }
    }

    /// Seconds between the first and last sample on the sensor clock.
    pub fn duration(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.sensor_timestamp - first.sensor_timestamp,
            _ => 0.0,
        }
    }

    /// Check that indices strictly increase and sensor timestamps never go back.
    pub fn check_ordering(&self) -> std::result::Result<(), OrderingViolation> {
        for (position, sample) in self.samples.iter().enumerate() {
            if sample.movement_id != self.id {
                return Err(OrderingViolation::ForeignSample { position });
            }
            if position == 0 {
                continue;
            }
            let prev = &self.samples[position - 1];
            if sample.index <= prev.index {
                return Err(OrderingViolation::IndexNotIncreasing {
                    position,
                    previous: prev.index,
                    current: sample.index,
                });
            }
            if sample.sensor_timestamp < prev.sensor_timestamp {
                return Err(OrderingViolation::TimestampDecreasing {
                    position,
                    previous: prev.sensor_timestamp,
                    current: sample.sensor_timestamp,
                });
            }
        }
        Ok(())
    }
}
