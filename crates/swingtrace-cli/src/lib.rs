// swingtrace CLI
// Records go through the capture runtime exactly as a paired controller
// would drive it: every verb crosses the relay as a wire message.

mod args;
mod commands;
mod handlers;
mod logging;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands, ConfigCommand, MovementCommand, SessionCommand};
pub use commands::run;
