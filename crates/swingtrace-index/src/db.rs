use rusqlite::Connection;
use std::path::Path;
use swingtrace_types::{Movement, MovementId, Session, SessionId};

use crate::{Result, queries, records::SessionSummary, schema};

// NOTE: Staged writes
// `insert` only records intent; nothing reaches disk until `save`. Sessions
// staged before a failed `save` are discarded rather than retried, so each
// staged session is persisted at most once.

pub struct Database {
    conn: Connection,
    staged: Vec<Session>,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        schema::init_schema(&conn)?;
        tracing::debug!(path = %db_path.display(), "opened session store");
        Ok(Self {
            conn,
            staged: Vec::new(),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::init_schema(&conn)?;
        Ok(Self {
            conn,
            staged: Vec::new(),
        })
    }

    // Staging

    pub fn insert(&mut self, session: Session) {
        self.staged.push(session);
    }

    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    /// Write every staged session in one transaction. Returns how many were written.
    pub fn save(&mut self) -> Result<usize> {
        let staged = std::mem::take(&mut self.staged);
        if staged.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        for session in &staged {
            write_session_tree(&tx, session)?;
        }
        tx.commit()?;

        tracing::debug!(sessions = staged.len(), "saved staged sessions");
        Ok(staged.len())
    }

    // Direct writes

    /// Upsert one session immediately. Rewrites its movements so repeated
    /// writes of the same session are idempotent.
    pub fn write_session(&mut self, session: &Session) -> Result<()> {
        let tx = self.conn.transaction()?;
        write_session_tree(&tx, session)?;
        tx.commit()?;
        Ok(())
    }

    pub fn delete_session(&self, id: &SessionId) -> Result<bool> {
        queries::session::delete(&self.conn, id)
    }

    // Reads

    pub fn list_sessions(&self, limit: Option<usize>) -> Result<Vec<SessionSummary>> {
        queries::session::list(&self.conn, limit)
    }

    pub fn load_session(&self, id: &SessionId) -> Result<Option<Session>> {
        let Some(row) = queries::session::get_by_id(&self.conn, id)? else {
            return Ok(None);
        };
        let movements = queries::movement::list_for_session(&self.conn, id)?;
        Ok(Some(Session::restore(
            row.id,
            row.created_at,
            row.ended_at,
            movements,
        )))
    }

    pub fn load_movement(&self, id: &MovementId) -> Result<Option<Movement>> {
        queries::movement::get_by_id(&self.conn, id)
    }

    pub fn find_session_by_prefix(&self, prefix: &str) -> Result<Option<SessionId>> {
        queries::session::find_by_prefix(&self.conn, prefix)
    }

    pub fn find_movement_by_prefix(&self, prefix: &str) -> Result<Option<MovementId>> {
        queries::movement::find_by_prefix(&self.conn, prefix)
    }
}

fn write_session_tree(conn: &Connection, session: &Session) -> Result<()> {
    queries::session::upsert(conn, session)?;
    queries::movement::delete_for_session(conn, &session.id)?;
    for (ordinal, movement) in session.movements().iter().enumerate() {
        queries::movement::insert(conn, movement, ordinal)?;
    }
    Ok(())
}
