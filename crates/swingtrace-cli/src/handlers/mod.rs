pub mod config;
pub mod movement_export;
pub mod movement_trajectory;
pub mod record;
pub mod session_delete;
pub mod session_list;
pub mod session_show;

use anyhow::{Result, anyhow};
use swingtrace_index::Database;
use swingtrace_types::{Movement, Session};

/// Resolve a full id or unique prefix to a stored session.
pub(crate) fn load_session(db: &Database, prefix: &str) -> Result<Session> {
    let id = db
        .find_session_by_prefix(prefix)?
        .ok_or_else(|| anyhow!("Session not found: {}", prefix))?;
    db.load_session(&id)?
        .ok_or_else(|| anyhow!("Session not found: {}", prefix))
}

pub(crate) fn load_movement(db: &Database, prefix: &str) -> Result<Movement> {
    let id = db
        .find_movement_by_prefix(prefix)?
        .ok_or_else(|| anyhow!("Movement not found: {}", prefix))?;
    db.load_movement(&id)?
        .ok_or_else(|| anyhow!("Movement not found: {}", prefix))
}
