use chrono::SecondsFormat;
use swingtrace_types::{Movement, Sample};

/// Header row for the row-oriented sample export, in column order.
pub const SAMPLE_COLUMNS: [&str; 24] = [
    "movement_id",
    "captured_at",
    "sensor_timestamp",
    "relative_timestamp",
    "index",
    "user_acceleration_x",
    "user_acceleration_y",
    "user_acceleration_z",
    "rotation_rate_x",
    "rotation_rate_y",
    "rotation_rate_z",
    "roll",
    "pitch",
    "yaw",
    "quaternion_x",
    "quaternion_y",
    "quaternion_z",
    "quaternion_w",
    "gravity_x",
    "gravity_y",
    "gravity_z",
    "magnetic_field_x",
    "magnetic_field_y",
    "magnetic_field_z",
];

pub fn sample_row(sample: &Sample) -> Vec<String> {
    let a = &sample.attitude;
    let mut row = Vec::with_capacity(SAMPLE_COLUMNS.len());
    row.push(sample.movement_id.to_string());
    row.push(
        sample
            .captured_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    );
    row.push(sample.sensor_timestamp.to_string());
    row.push(sample.relative_timestamp.to_string());
    row.push(sample.index.to_string());

    let numbers = [
        sample.user_acceleration.x,
        sample.user_acceleration.y,
        sample.user_acceleration.z,
        sample.rotation_rate.x,
        sample.rotation_rate.y,
        sample.rotation_rate.z,
        a.euler.roll,
        a.euler.pitch,
        a.euler.yaw,
        a.quaternion.x,
        a.quaternion.y,
        a.quaternion.z,
        a.quaternion.w,
        sample.gravity.x,
        sample.gravity.y,
        sample.gravity.z,
        sample.magnetic_field.x,
        sample.magnetic_field.y,
        sample.magnetic_field.z,
    ];
    row.extend(numbers.iter().map(f64::to_string));
    row
}

/// Data rows for a finalized movement, in index order.
pub fn export_rows(movement: &Movement) -> Vec<Vec<String>> {
    let mut ordered: Vec<&Sample> = movement.samples.iter().collect();
    ordered.sort_by_key(|s| s.index);
    ordered.into_iter().map(sample_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use swingtrace_types::{Attitude, Hand, MovementType, SessionId, Vec3};

    #[test]
    fn test_row_width_matches_header() {
        let mut movement =
            Movement::new(SessionId::new(), MovementType::Serve, Hand::Right, Utc::now());
        movement.samples.push(Sample {
            movement_id: movement.id,
            captured_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            sensor_timestamp: 100.5,
            relative_timestamp: 0.0,
            index: 0,
            user_acceleration: Vec3::new(1.0, 2.0, 3.0),
            rotation_rate: Vec3::ZERO,
            attitude: Attitude::default(),
            gravity: Vec3::new(0.0, 0.0, -1.0),
            magnetic_field: Vec3::ZERO,
        });

        let rows = export_rows(&movement);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), SAMPLE_COLUMNS.len());
        assert_eq!(rows[0][1], "2025-03-01T12:00:00.000Z");
        assert_eq!(rows[0][2], "100.5");
        assert_eq!(rows[0][17], "1");
    }

    #[test]
    fn test_rows_follow_index_order() {
        let mut movement =
            Movement::new(SessionId::new(), MovementType::Lob, Hand::Left, Utc::now());
        for index in [2u64, 0, 1] {
            movement.samples.push(Sample {
                movement_id: movement.id,
                captured_at: Utc::now(),
                sensor_timestamp: index as f64,
                relative_timestamp: index as f64,
                index,
                user_acceleration: Vec3::ZERO,
                rotation_rate: Vec3::ZERO,
                attitude: Attitude::default(),
                gravity: Vec3::ZERO,
                magnetic_field: Vec3::ZERO,
            });
        }
        let indices: Vec<_> = export_rows(&movement).into_iter().map(|r| r[4].clone()).collect();
        assert_eq!(indices, vec!["0", "1", "2"]);
    }
}
