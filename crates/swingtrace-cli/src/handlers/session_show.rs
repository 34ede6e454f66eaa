use crate::presentation::ConsoleRenderer;
use crate::presentation::presenters;
use anyhow::Result;
use swingtrace_index::Database;

pub fn handle(db: &Database, prefix: &str, renderer: &ConsoleRenderer) -> Result<()> {
    let session = super::load_session(db, prefix)?;
    renderer.render(presenters::present_session_detail(&session))
}
