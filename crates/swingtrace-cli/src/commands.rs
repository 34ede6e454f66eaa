use super::args::{Cli, Commands, ConfigCommand, MovementCommand, SessionCommand};
use super::handlers;
use super::logging;
use crate::presentation::ConsoleRenderer;
use anyhow::Result;
use std::time::Duration;
use swingtrace_index::Database;
use swingtrace_runtime::config::DATABASE_FILE;
use swingtrace_runtime::{Config, resolve_data_dir};

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let renderer = ConsoleRenderer::new(cli.format);
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");

    match cli.command {
        Commands::Record {
            movement,
            hand,
            count,
            duration_ms,
        } => {
            let config = Config::load(&data_dir)?;
            let options = handlers::record::RecordOptions {
                movement_type: movement.into(),
                hand: hand.into(),
                count,
                duration: Duration::from_millis(duration_ms),
            };
            handlers::record::handle(&data_dir, &config, options, &renderer)
        }

        Commands::Session { command } => {
            let db = Database::open(&data_dir.join(DATABASE_FILE))?;

            match command {
                SessionCommand::List { limit } => handlers::session_list::handle(&db, limit, &renderer),
                SessionCommand::Show { session_id } => {
                    handlers::session_show::handle(&db, &session_id, &renderer)
                }
                SessionCommand::Delete { session_id } => {
                    handlers::session_delete::handle(&db, &session_id, &renderer)
                }
            }
        }

        Commands::Movement { command } => {
            let db = Database::open(&data_dir.join(DATABASE_FILE))?;

            match command {
                MovementCommand::Export {
                    movement_id,
                    output,
                } => handlers::movement_export::handle(
                    &db,
                    &movement_id,
                    output.as_deref(),
                    &renderer,
                ),
                MovementCommand::Trajectory { movement_id } => {
                    let config = Config::load(&data_dir)?;
                    handlers::movement_trajectory::handle(&db, &config, &movement_id, &renderer)
                }
            }
        }

        Commands::Config { command } => match command {
            ConfigCommand::Init { force } => handlers::config::init(&data_dir, force, &renderer),
            ConfigCommand::Show => handlers::config::show(&data_dir, &renderer),
        },
    }
}
