use rusqlite::{Connection, params};
use swingtrace_types::{Session, SessionId};

use super::{ID_PREFIX_MATCH, decode, resolve_prefix, ts_from_sql, ts_to_sql};
use crate::{Result, records::SessionSummary};

pub fn upsert(conn: &Connection, session: &Session) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO sessions (id, created_at, ended_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(id) DO UPDATE SET
            created_at = ?2,
            ended_at = COALESCE(?3, ended_at)
        "#,
        params![
            session.id.to_string(),
            ts_to_sql(&session.created_at),
            session.ended_at.as_ref().map(ts_to_sql),
        ],
    )?;
    Ok(())
}

pub struct SessionRow {
    pub id: SessionId,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
}

pub fn get_by_id(conn: &Connection, id: &SessionId) -> Result<Option<SessionRow>> {
    let mut stmt = conn.prepare("SELECT created_at, ended_at FROM sessions WHERE id = ?1")?;
    let mut rows = stmt.query([id.to_string()])?;
    let Some(row) = rows.next()? else {
        return Ok(None);
    };

    let created_at: String = row.get(0)?;
    let ended_at: Option<String> = row.get(1)?;
    Ok(Some(SessionRow {
        id: *id,
        created_at: ts_from_sql("sessions.created_at", &created_at)?,
        ended_at: ended_at
            .as_deref()
            .map(|raw| ts_from_sql("sessions.ended_at", raw))
            .transpose()?,
    }))
}

pub fn list(conn: &Connection, limit: Option<usize>) -> Result<Vec<SessionSummary>> {
    let limit_clause = limit.map(|l| format!("LIMIT {}", l)).unwrap_or_default();
    let query = format!(
        r#"
        SELECT s.id, s.created_at, s.ended_at,
               (SELECT COUNT(*) FROM movements m WHERE m.session_id = s.id),
               (SELECT COUNT(*) FROM samples x
                  JOIN movements m ON x.movement_id = m.id
                 WHERE m.session_id = s.id)
        FROM sessions s
        ORDER BY s.created_at DESC
        {}
        "#,
        limit_clause
    );

    let mut stmt = conn.prepare(&query)?;
    let raw = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    raw.into_iter()
        .map(|(id, created_at, ended_at, movements, samples)| {
            Ok(SessionSummary {
                id: decode("sessions.id", &id)?,
                created_at: ts_from_sql("sessions.created_at", &created_at)?,
                ended_at: ended_at
                    .as_deref()
                    .map(|raw| ts_from_sql("sessions.ended_at", raw))
                    .transpose()?,
                movement_count: movements as usize,
                sample_count: samples as usize,
            })
        })
        .collect()
}

pub fn delete(conn: &Connection, id: &SessionId) -> Result<bool> {
    let affected = conn.execute("DELETE FROM sessions WHERE id = ?1", [id.to_string()])?;
    Ok(affected > 0)
}

pub fn find_by_prefix(conn: &Connection, prefix: &str) -> Result<Option<SessionId>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id FROM sessions WHERE {} LIMIT 2",
        ID_PREFIX_MATCH
    ))?;
    let ids = stmt
        .query_map([prefix], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    resolve_prefix(ids, prefix)?
        .map(|id| decode("sessions.id", &id))
        .transpose()
}
