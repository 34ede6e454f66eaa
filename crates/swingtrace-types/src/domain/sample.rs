use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MovementId;
use crate::motion::{Attitude, Vec3};

/// One timestamped multi-axis reading belonging to a movement.
///
/// Units are device-native: m/s² for accelerations, rad/s for rotation
/// rate, radians for Euler angles, µT for the magnetic field. Timestamps on
/// the sensor clock are seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub movement_id: MovementId,
    /// Wall-clock time the reading was delivered.
    pub captured_at: DateTime<Utc>,
    /// Device-local monotonic sensor clock.
    pub sensor_timestamp: f64,
    /// `sensor_timestamp` minus the first sample's sensor timestamp.
    pub relative_timestamp: f64,
    /// Position in the movement, starting at 0.
    pub index: u64,
    /// Acceleration with gravity removed.
    pub user_acceleration: Vec3,
    pub rotation_rate: Vec3,
    pub attitude: Attitude,
    pub gravity: Vec3,
    pub magnetic_field: Vec3,
}
