use swingtrace_index::Database;
use swingtrace_types::Session;

/// Persistence collaborator. The capture side only calls it at session end.
pub trait SessionStore: Send {
    fn insert(&mut self, session: Session);
    fn save(&mut self) -> swingtrace_index::Result<()>;
}

impl SessionStore for Database {
    fn insert(&mut self, session: Session) {
        Database::insert(self, session);
    }

    fn save(&mut self) -> swingtrace_index::Result<()> {
        Database::save(self).map(|_| ())
    }
}
