// Engine module - pure processing over recorded samples
// Nothing here touches threads, clocks or storage; the runtime feeds it and
// the CLI renders what it returns.

pub mod color;
pub mod export;
pub mod sample_builder;
pub mod summary;
pub mod trajectory;

pub use color::{Rgb, SpeedColorMap};
pub use export::{SAMPLE_COLUMNS, export_rows, sample_row};
pub use sample_builder::{MotionSampleBuilder, SampleBuffer};
pub use summary::{MovementSummary, SessionStats};
pub use trajectory::{Trajectory, TrajectoryConfig, TrajectoryReconstructor};

use swingtrace_types::{Movement, Sample};

// Façade API - stable entry points for the runtime and CLI layers

/// Reconstruct a movement's path with the given parameters
pub fn reconstruct_trajectory(samples: &[Sample], config: &TrajectoryConfig) -> Trajectory {
    TrajectoryReconstructor::new(config.clone()).reconstruct(samples)
}

/// Summarize one recorded movement
pub fn summarize_movement(movement: &Movement) -> MovementSummary {
    MovementSummary::from_movement(movement)
}
