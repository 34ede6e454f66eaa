use rusqlite::Connection;

use crate::Result;

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

// NOTE: Ownership is enforced by the schema.
// movements -> sessions and samples -> movements are ON DELETE CASCADE, so a
// single DELETE on sessions removes everything recorded under it. That only
// works with foreign_keys enabled, which SQLite leaves off per connection.

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version != SCHEMA_VERSION {
        if current_version != 0 {
            tracing::warn!(
                from = current_version,
                to = SCHEMA_VERSION,
                "schema version changed, recreating tables"
            );
        }
        drop_all_tables(conn)?;
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            created_at TEXT NOT NULL,
            ended_at TEXT
        );

        CREATE TABLE IF NOT EXISTS movements (
            id TEXT PRIMARY KEY,
            session_id TEXT NOT NULL,
            ordinal INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            movement_type TEXT NOT NULL,
            hand TEXT NOT NULL,
            FOREIGN KEY (session_id) REFERENCES sessions(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS samples (
            movement_id TEXT NOT NULL,
            idx INTEGER NOT NULL,
            captured_at TEXT NOT NULL,
            sensor_ts REAL NOT NULL,
            relative_ts REAL NOT NULL,
            accel_x REAL NOT NULL, accel_y REAL NOT NULL, accel_z REAL NOT NULL,
            rot_x REAL NOT NULL, rot_y REAL NOT NULL, rot_z REAL NOT NULL,
            roll REAL NOT NULL, pitch REAL NOT NULL, yaw REAL NOT NULL,
            quat_x REAL NOT NULL, quat_y REAL NOT NULL, quat_z REAL NOT NULL, quat_w REAL NOT NULL,
            grav_x REAL NOT NULL, grav_y REAL NOT NULL, grav_z REAL NOT NULL,
            mag_x REAL NOT NULL, mag_y REAL NOT NULL, mag_z REAL NOT NULL,
            PRIMARY KEY (movement_id, idx),
            FOREIGN KEY (movement_id) REFERENCES movements(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_created ON sessions(created_at DESC);
        CREATE INDEX IF NOT EXISTS idx_movements_session ON movements(session_id, ordinal);
        "#,
    )?;

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

    Ok(())
}

fn drop_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS samples;
        DROP TABLE IF EXISTS movements;
        DROP TABLE IF EXISTS sessions;
        "#,
    )?;
    Ok(())
}
