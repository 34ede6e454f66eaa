use rusqlite::{Connection, params};
use swingtrace_types::{Attitude, Euler, MovementId, Quaternion, Sample, Vec3};

use super::{ts_from_sql, ts_to_sql};
use crate::error::is_key_conflict;
use crate::{Error, Result};

pub fn insert_all(conn: &Connection, movement_id: &MovementId, samples: &[Sample]) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        r#"
        INSERT INTO samples (
            movement_id, idx, captured_at, sensor_ts, relative_ts,
            accel_x, accel_y, accel_z, rot_x, rot_y, rot_z,
            roll, pitch, yaw, quat_x, quat_y, quat_z, quat_w,
            grav_x, grav_y, grav_z, mag_x, mag_y, mag_z
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
            ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24
        )
        "#,
    )?;

    let movement_id = movement_id.to_string();
    for s in samples {
        let index =
            i64::try_from(s.index).map_err(|_| Error::SampleIndexOutOfRange(s.index))?;
        let a = &s.attitude;
        stmt.execute(params![
            movement_id,
            index,
            ts_to_sql(&s.captured_at),
            s.sensor_timestamp,
            s.relative_timestamp,
            s.user_acceleration.x,
            s.user_acceleration.y,
            s.user_acceleration.z,
            s.rotation_rate.x,
            s.rotation_rate.y,
            s.rotation_rate.z,
            a.euler.roll,
            a.euler.pitch,
            a.euler.yaw,
            a.quaternion.x,
            a.quaternion.y,
            a.quaternion.z,
            a.quaternion.w,
            s.gravity.x,
            s.gravity.y,
            s.gravity.z,
            s.magnetic_field.x,
            s.magnetic_field.y,
            s.magnetic_field.z,
        ])
        .map_err(|err| {
            if is_key_conflict(&err) {
                Error::DuplicateSample {
                    movement_id: movement_id.clone(),
                    index: s.index,
                }
            } else {
                Error::from(err)
            }
        })?;
    }
    Ok(())
}

pub fn list_for_movement(conn: &Connection, movement_id: &MovementId) -> Result<Vec<Sample>> {
    let mut stmt = conn.prepare_cached(
        r#"
        SELECT idx, captured_at, sensor_ts, relative_ts,
               accel_x, accel_y, accel_z, rot_x, rot_y, rot_z,
               roll, pitch, yaw, quat_x, quat_y, quat_z, quat_w,
               grav_x, grav_y, grav_z, mag_x, mag_y, mag_z
        FROM samples
        WHERE movement_id = ?1
        ORDER BY idx ASC
        "#,
    )?;

    let rows = stmt
        .query_map([movement_id.to_string()], |row| {
            let v = |i: usize| -> rusqlite::Result<Vec3> {
                Ok(Vec3::new(row.get(i)?, row.get(i + 1)?, row.get(i + 2)?))
            };
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
                v(4)?,
                v(7)?,
                Attitude {
                    euler: Euler::new(row.get(10)?, row.get(11)?, row.get(12)?),
                    quaternion: Quaternion::new(
                        row.get(13)?,
                        row.get(14)?,
                        row.get(15)?,
                        row.get(16)?,
                    ),
                },
                v(17)?,
                v(20)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(
            |(idx, captured_at, sensor_ts, relative_ts, accel, rot, attitude, grav, mag)| {
                Ok(Sample {
                    movement_id: *movement_id,
                    captured_at: ts_from_sql("samples.captured_at", &captured_at)?,
                    sensor_timestamp: sensor_ts,
                    relative_timestamp: relative_ts,
                    index: idx as u64,
                    user_acceleration: accel,
                    rotation_rate: rot,
                    attitude,
                    gravity: grav,
                    magnetic_field: mag,
                })
            },
        )
        .collect()
}
