//! Sample data generation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::path::Path;
use swingtrace_index::Database;
use swingtrace_types::{
    Attitude, CapturedReading, Hand, Movement, MovementType, Quaternion, Sample, SensorReading,
    Session, Vec3,
};

/// Fixed wall-clock origin so fixtures are reproducible.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 18, 10, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Identity-attitude readings with constant user acceleration.
pub fn constant_readings(count: usize, acceleration: Vec3, dt: f64) -> Vec<SensorReading> {
    (0..count)
        .map(|i| SensorReading {
            user_acceleration: acceleration,
            ..SensorReading::at(100.0 + i as f64 * dt)
        })
        .collect()
}

/// `count` readings of a simulated stroke at `rate_hz`.
pub fn swing_readings(count: usize, rate_hz: f64) -> Vec<SensorReading> {
    (0..count)
        .map(|i| {
            let t = i as f64 / rate_hz;
            swingtrace_runtime::synthetic::swing_reading(500.0 + t, t)
        })
        .collect()
}

pub fn captured(reading: SensorReading, offset_ms: i64) -> CapturedReading {
    CapturedReading::new(epoch() + Duration::milliseconds(offset_ms), reading)
}

/// Samples of one movement with the given accelerations and attitudes,
/// spaced `dt` apart, indices from 0.
pub fn samples_for(
    movement: &Movement,
    accelerations: &[Vec3],
    attitudes: &[Quaternion],
    dt: f64,
) -> Vec<Sample> {
    accelerations
        .iter()
        .zip(attitudes.iter().chain(std::iter::repeat(&Quaternion::identity())))
        .enumerate()
        .map(|(i, (accel, q))| {
            let t = i as f64 * dt;
            Sample {
                movement_id: movement.id,
                captured_at: movement.created_at + Duration::milliseconds((t * 1000.0) as i64),
                sensor_timestamp: 50.0 + t,
                relative_timestamp: t,
                index: i as u64,
                user_acceleration: *accel,
                rotation_rate: Vec3::new(0.0, 0.0, 1.5),
                attitude: Attitude {
                    quaternion: *q,
                    ..Attitude::default()
                },
                gravity: Vec3::new(0.0, 0.0, -1.0),
                magnetic_field: Vec3::new(20.0, 0.0, -40.0),
            }
        })
        .collect()
}

/// An ended session with `movements` movements of `samples_each` samples.
pub fn recorded_session(movements: usize, samples_each: usize) -> Session {
    let mut session = Session::new(epoch());
    let kinds = MovementType::ALL;
    for i in 0..movements {
        let mut movement = Movement::new(
            session.id,
            kinds[i % kinds.len()],
            if i % 2 == 0 { Hand::Right } else { Hand::Left },
            epoch() + Duration::seconds(10 * i as i64),
        );
        let accel: Vec<Vec3> = (0..samples_each)
            .map(|n| Vec3::new((n as f64 * 0.3).sin() * 4.0, 0.5, 0.0))
            .collect();
        movement.samples = samples_for(&movement, &accel, &[], 1.0 / 60.0);
        // Infallible: the session has not ended yet.
        let _ = session.append_movement(movement);
    }
    session.end(epoch() + Duration::minutes(5));
    session
}

/// Write sessions straight into `<data_dir>/swingtrace.db`.
pub fn seed_database(data_dir: &Path, sessions: &[Session]) -> anyhow::Result<()> {
    let mut db = Database::open(&data_dir.join(swingtrace_runtime::config::DATABASE_FILE))?;
    for session in sessions {
        db.write_session(session)?;
    }
    Ok(())
}
