//! Testing infrastructure for swingtrace.
//!
//! - `TestWorld`: isolated data directory plus CLI execution
//! - `doubles`: scripted sensors, in-memory and failing stores, recording feedback
//! - `fixtures`: sample/reading generators and seeded databases
//! - `events`: helpers for waiting on capture events

pub mod doubles;
pub mod events;
pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
