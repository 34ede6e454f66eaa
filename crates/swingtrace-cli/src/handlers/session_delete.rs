use crate::presentation::ConsoleRenderer;
use crate::presentation::presenters;
use anyhow::{Result, bail};
use swingtrace_index::Database;

pub fn handle(db: &Database, prefix: &str, renderer: &ConsoleRenderer) -> Result<()> {
    // Loaded first so the report can say what went away.
    let session = super::load_session(db, prefix)?;
    if !db.delete_session(&session.id)? {
        bail!("Session not found: {}", prefix);
    }

    tracing::info!(session_id = %session.id, "deleted session");
    renderer.render(presenters::present_session_deleted(&session))
}
