use std::f64::consts::PI;
use swingtrace_types::{Attitude, Euler, Quaternion, SensorReading, Vec3};

use crate::Result;
use crate::stream::{SensorFeed, SensorSource};

/// Duration of one simulated stroke.
pub const SWING_PERIOD_SECS: f64 = 1.2;
const PEAK_ACCELERATION: f64 = 12.0;

/// Reading `t` seconds into a simulated forehand-like stroke.
///
/// A yaw sweep of half a turn with a sin² acceleration pulse along the
/// body x axis, repeating every [`SWING_PERIOD_SECS`].
pub fn swing_reading(timestamp: f64, t: f64) -> SensorReading {
    let phase = (t.rem_euclid(SWING_PERIOD_SECS)) / SWING_PERIOD_SECS;
    let pulse = (PI * phase).sin().powi(2);
    let yaw = -PI / 2.0 + PI * phase;

    SensorReading {
        timestamp,
        user_acceleration: Vec3::new(PEAK_ACCELERATION * pulse, 0.4 * pulse, 0.0),
        rotation_rate: Vec3::new(0.0, 0.0, PI / SWING_PERIOD_SECS),
        attitude: Attitude {
            euler: Euler::new(0.0, 0.0, yaw),
            quaternion: Quaternion::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), yaw),
        },
        gravity: Vec3::new(0.0, 0.0, -1.0),
        magnetic_field: Vec3::new(22.0, 5.0, -40.0),
    }
}

/// Sensor stand-in for hosts without motion hardware. Every feed it opens
/// runs forever on its own sensor clock.
#[derive(Debug, Clone)]
pub struct SyntheticSwingSource {
    rate_hz: f64,
    clock: f64,
}

impl SyntheticSwingSource {
    pub fn new(rate_hz: f64) -> Self {
        Self {
            rate_hz: if rate_hz > 0.0 { rate_hz } else { 60.0 },
            clock: 1000.0,
        }
    }
}

impl SensorSource for SyntheticSwingSource {
    fn open(&mut self) -> Result<Box<dyn SensorFeed>> {
        let feed = SyntheticSwingFeed {
            start: self.clock,
            step: 1.0 / self.rate_hz,
            n: 0,
        };
        // Later feeds continue the same monotonic clock.
        self.clock += 3600.0;
        Ok(Box::new(feed))
    }
}

struct SyntheticSwingFeed {
    start: f64,
    step: f64,
    n: u64,
}

impl SensorFeed for SyntheticSwingFeed {
    fn next_reading(&mut self) -> Option<SensorReading> {
        let t = self.n as f64 * self.step;
        self.n += 1;
        Some(swing_reading(self.start + t, t))
    }
}
