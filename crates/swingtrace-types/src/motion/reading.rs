use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Quaternion, Vec3};

/// Euler angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Euler {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Euler {
    pub const fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }
}

/// Device orientation, carried both ways the sensor reports it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Attitude {
    pub euler: Euler,
    pub quaternion: Quaternion,
}

/// One raw delivery from the sensor driver.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorReading {
    /// Sensor clock, seconds.
    pub timestamp: f64,
    pub user_acceleration: Vec3,
    pub rotation_rate: Vec3,
    pub attitude: Attitude,
    pub gravity: Vec3,
    pub magnetic_field: Vec3,
}

impl SensorReading {
    /// Reading at `timestamp` with every other channel at rest.
    pub fn at(timestamp: f64) -> Self {
        Self {
            timestamp,
            ..Default::default()
        }
    }
}

/// A reading stamped with the wall-clock time it was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapturedReading {
    pub captured_at: DateTime<Utc>,
    pub reading: SensorReading,
}

impl CapturedReading {
    pub fn new(captured_at: DateTime<Utc>, reading: SensorReading) -> Self {
        Self {
            captured_at,
            reading,
        }
    }
}
