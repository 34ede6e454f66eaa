use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Movement-type tag as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum MovementArg {
    Forehand,
    Backhand,
    Volley,
    Serve,
    Smash,
    Lob,
    Unknown,
}

impl From<MovementArg> for swingtrace_types::MovementType {
    fn from(arg: MovementArg) -> Self {
        use swingtrace_types::MovementType;
        match arg {
            MovementArg::Forehand => MovementType::Forehand,
            MovementArg::Backhand => MovementType::Backhand,
            MovementArg::Volley => MovementType::Volley,
            MovementArg::Serve => MovementType::Serve,
            MovementArg::Smash => MovementType::Smash,
            MovementArg::Lob => MovementType::Lob,
            MovementArg::Unknown => MovementType::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum HandArg {
    Left,
    Right,
}

impl From<HandArg> for swingtrace_types::Hand {
    fn from(arg: HandArg) -> Self {
        match arg {
            HandArg::Left => swingtrace_types::Hand::Left,
            HandArg::Right => swingtrace_types::Hand::Right,
        }
    }
}
