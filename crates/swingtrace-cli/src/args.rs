// NOTE: Command Organization
// Namespaced subcommands: `session` works on whole recordings, `movement`
// on single strokes. `record` is the only command that captures.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::{HandArg, LogLevel, MovementArg, OutputFormat};

#[derive(Parser)]
#[command(name = "swingtrace")]
#[command(about = "Record swing sessions and reconstruct stroke trajectories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (default: $SWINGTRACE_PATH, then the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    /// Log verbosity on stderr; RUST_LOG takes precedence
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Capture a session from the simulated wrist sensor")]
    Record {
        #[arg(long, value_enum)]
        movement: MovementArg,

        #[arg(long, value_enum)]
        hand: HandArg,

        /// Number of movements to record
        #[arg(long, default_value = "1")]
        count: usize,

        /// Recording time per movement
        #[arg(long, default_value = "1200")]
        duration_ms: u64,
    },

    #[command(about = "Browse and manage recorded sessions")]
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },

    #[command(about = "Export or visualize a single movement")]
    Movement {
        #[command(subcommand)]
        command: MovementCommand,
    },

    #[command(about = "Manage configuration")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum SessionCommand {
    #[command(about = "List sessions, newest first")]
    List {
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    #[command(about = "Show a session and its movements")]
    Show {
        /// Session id or unique prefix
        session_id: String,
    },

    #[command(about = "Delete a session with all its movements and samples")]
    Delete {
        /// Session id or unique prefix
        session_id: String,
    },
}

#[derive(Subcommand)]
pub enum MovementCommand {
    #[command(about = "Write a movement's samples as CSV")]
    Export {
        /// Movement id or unique prefix
        movement_id: String,

        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    #[command(about = "Reconstruct a movement's approximate path")]
    Trajectory {
        /// Movement id or unique prefix
        movement_id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Write a default config.toml")]
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    #[command(about = "Print the effective configuration")]
    Show,
}
