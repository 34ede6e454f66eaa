use rusqlite::{Connection, params};
use swingtrace_types::{Movement, MovementId, SessionId};

use super::{ID_PREFIX_MATCH, decode, resolve_prefix, sample, ts_from_sql, ts_to_sql};
use crate::Result;

pub fn insert(conn: &Connection, movement: &Movement, ordinal: usize) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO movements (id, session_id, ordinal, created_at, movement_type, hand)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            movement.id.to_string(),
            movement.session_id.to_string(),
            ordinal as i64,
            ts_to_sql(&movement.created_at),
            movement.movement_type.as_str(),
            movement.hand.as_str(),
        ],
    )?;
    sample::insert_all(conn, &movement.id, &movement.samples)
}

pub fn delete_for_session(conn: &Connection, session_id: &SessionId) -> Result<usize> {
    Ok(conn.execute(
        "DELETE FROM movements WHERE session_id = ?1",
        [session_id.to_string()],
    )?)
}

struct MovementRow {
    id: String,
    session_id: String,
    created_at: String,
    movement_type: String,
    hand: String,
}

const SELECT_COLUMNS: &str = "id, session_id, created_at, movement_type, hand";

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MovementRow> {
    Ok(MovementRow {
        id: row.get(0)?,
        session_id: row.get(1)?,
        created_at: row.get(2)?,
        movement_type: row.get(3)?,
        hand: row.get(4)?,
    })
}

fn hydrate(conn: &Connection, row: MovementRow) -> Result<Movement> {
    let id: MovementId = decode("movements.id", &row.id)?;
    Ok(Movement {
        id,
        session_id: decode("movements.session_id", &row.session_id)?,
        created_at: ts_from_sql("movements.created_at", &row.created_at)?,
        movement_type: decode("movements.movement_type", &row.movement_type)?,
        hand: decode("movements.hand", &row.hand)?,
        samples: sample::list_for_movement(conn, &id)?,
    })
}

pub fn list_for_session(conn: &Connection, session_id: &SessionId) -> Result<Vec<Movement>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM movements WHERE session_id = ?1 ORDER BY ordinal ASC",
        SELECT_COLUMNS
    ))?;
    let rows = stmt
        .query_map([session_id.to_string()], read_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    rows.into_iter().map(|row| hydrate(conn, row)).collect()
}

pub fn get_by_id(conn: &Connection, id: &MovementId) -> Result<Option<Movement>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM movements WHERE id = ?1",
        SELECT_COLUMNS
    ))?;
    let mut rows = stmt.query([id.to_string()])?;
    match rows.next()? {
        Some(row) => {
            let row = read_row(row)?;
            Ok(Some(hydrate(conn, row)?))
        }
        None => Ok(None),
    }
}

pub fn find_by_prefix(conn: &Connection, prefix: &str) -> Result<Option<MovementId>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id FROM movements WHERE {} LIMIT 2",
        ID_PREFIX_MATCH
    ))?;
    let ids = stmt
        .query_map([prefix], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    resolve_prefix(ids, prefix)?
        .map(|id| decode("movements.id", &id))
        .transpose()
}
