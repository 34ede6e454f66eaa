// SQLite session store
// Sessions own movements own samples; deleting a session cascades.

mod db;
mod error;
mod queries;
mod records;
mod schema;

// Public API
pub use db::Database;
pub use error::{Error, Result};
pub use records::SessionSummary;
pub use schema::SCHEMA_VERSION;
