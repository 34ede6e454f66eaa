use crate::presentation::ConsoleRenderer;
use crate::presentation::presenters;
use anyhow::Result;
use swingtrace_index::Database;

pub fn handle(db: &Database, limit: usize, renderer: &ConsoleRenderer) -> Result<()> {
    let sessions = db.list_sessions(Some(limit))?;
    renderer.render(presenters::present_session_list(sessions, limit))
}
