//! Approximate world-frame path reconstruction.
//!
//! This is a heuristic, visual reconstruction and not inertial navigation.
//! Double-integrating consumer IMU acceleration drifts within a fraction of a
//! second, so the integration is pinned by three ad-hoc terms:
//!
//! - a noise floor that zeroes small world-frame accelerations,
//! - a spring pulling the position back toward the origin,
//! - a per-step velocity damping factor.
//!
//! The result is a bounded, plausible-looking path with a per-segment speed
//! used for color mapping. Absolute displacement is not meaningful.

use serde::{Deserialize, Serialize};
use swingtrace_types::{Quaternion, Sample, Vec3};

use crate::color::{Rgb, SpeedColorMap};

/// Tuning for [`TrajectoryReconstructor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    /// World-frame accelerations below this magnitude (m/s²) are zeroed.
    pub noise_floor: f64,
    /// Restoring term `k` in `a -= k * position`.
    pub spring_constant: f64,
    /// Velocity multiplier applied after every integration step.
    pub damping: f64,
    /// Visual amplification applied to emitted positions.
    pub scale: f64,
    pub colors: SpeedColorMap,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            noise_floor: 0.02,
            spring_constant: 2.0,
            damping: 0.95,
            scale: 10.0,
            colors: SpeedColorMap::default(),
        }
    }
}

/// Renderable path for one movement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trajectory {
    /// One per sample, scaled; the first is always the origin.
    pub positions: Vec<Vec3>,
    /// One per segment (`positions.len() - 1`), in unscaled units per second.
    pub speeds: Vec<f64>,
    /// The samples' attitude quaternions, untouched.
    pub orientations: Vec<Quaternion>,
    /// Keyframe time of each sample, normalized to `[0, 1]`.
    pub key_times: Vec<f64>,
}

impl Trajectory {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn segment_colors(&self, map: &SpeedColorMap) -> Vec<Rgb> {
        map.colors(&self.speeds)
    }

    pub fn max_speed(&self) -> f64 {
        self.speeds.iter().copied().fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrajectoryReconstructor {
    config: TrajectoryConfig,
}

impl TrajectoryReconstructor {
    pub fn new(config: TrajectoryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrajectoryConfig {
        &self.config
    }

    /// Reconstruct from samples already in movement order.
    pub fn reconstruct(&self, samples: &[Sample]) -> Trajectory {
        let Some(first) = samples.first() else {
            return Trajectory::default();
        };
        let cfg = &self.config;

        let mut positions = Vec::with_capacity(samples.len());
        let mut speeds = Vec::with_capacity(samples.len() - 1);
        positions.push(Vec3::ZERO);

        let mut position = Vec3::ZERO;
        let mut velocity = Vec3::ZERO;

        for pair in samples.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);
            let dt = step_dt(prev.sensor_timestamp, cur.sensor_timestamp);

            let mut accel = prev.attitude.quaternion.rotate(prev.user_acceleration);
            if !accel.is_finite() || accel.norm() < cfg.noise_floor {
                accel = Vec3::ZERO;
            }
            accel = accel - position * cfg.spring_constant;

            velocity += accel * dt;
            velocity = velocity * cfg.damping;

            let previous = position;
            position += velocity * dt;

            positions.push(position * cfg.scale);
            speeds.push(if dt > 0.0 {
                position.distance(&previous) / dt
            } else {
                0.0
            });
        }

        Trajectory {
            positions,
            speeds,
            orientations: samples.iter().map(|s| s.attitude.quaternion).collect(),
            key_times: key_times(samples, first.sensor_timestamp),
        }
    }
}

/// Non-positive or non-finite steps contribute nothing.
fn step_dt(prev: f64, cur: f64) -> f64 {
    let dt = cur - prev;
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

fn key_times(samples: &[Sample], start: f64) -> Vec<f64> {
    let n = samples.len();
    if n == 1 {
        return vec![0.0];
    }
    let duration = samples[n - 1].sensor_timestamp - start;
    if !(duration.is_finite() && duration > 0.0) {
        return (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
    }
    samples
        .iter()
        .map(|s| ((s.sensor_timestamp - start) / duration).clamp(0.0, 1.0))
        .collect()
}
