use crate::presentation::ConsoleRenderer;
use crate::presentation::presenters;
use anyhow::Result;
use swingtrace_index::Database;
use swingtrace_runtime::Config;

pub fn handle(
    db: &Database,
    config: &Config,
    prefix: &str,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let movement = super::load_movement(db, prefix)?;
    let trajectory = swingtrace_engine::reconstruct_trajectory(&movement.samples, &config.trajectory);
    tracing::debug!(
        movement_id = %movement.id,
        points = trajectory.positions.len(),
        "reconstructed trajectory"
    );

    renderer.render(presenters::present_trajectory(
        &movement,
        trajectory,
        &config.trajectory,
    ))
}
