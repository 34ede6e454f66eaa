use std::path::PathBuf;
use swingtrace_engine::{SessionStats, Trajectory, TrajectoryConfig, summarize_movement};
use swingtrace_index::SessionSummary;
use swingtrace_runtime::Config;
use swingtrace_types::{Movement, Session};

use super::formatters::{plural, short_id};
use super::view_models::{
    CommandResultViewModel, ConfigInitViewModel, ConfigViewModel, ExportViewModel, Guidance,
    MovementEntry, RecordViewModel, SessionDeleteViewModel, SessionDetailViewModel,
    SessionListEntry, SessionListViewModel, StatusBadge, TrajectoryViewModel,
};

pub fn present_session_list(
    sessions: Vec<SessionSummary>,
    limit: usize,
) -> CommandResultViewModel<SessionListViewModel> {
    let total_count = sessions.len();
    let entries = sessions
        .into_iter()
        .map(|s| SessionListEntry {
            id: s.id,
            created_at: s.created_at,
            ended_at: s.ended_at,
            movement_count: s.movement_count,
            sample_count: s.sample_count,
        })
        .collect();

    let result = CommandResultViewModel::new(SessionListViewModel {
        sessions: entries,
        total_count,
        limit,
    });

    if total_count == 0 {
        result
            .with_badge(StatusBadge::info("No sessions found"))
            .with_suggestion(
                Guidance::new("Record a session")
                    .with_command("swingtrace record --movement forehand --hand right"),
            )
    } else {
        result.with_badge(StatusBadge::success(format!(
            "{} found",
            plural(total_count, "session")
        )))
    }
}

pub fn present_session_detail(session: &Session) -> CommandResultViewModel<SessionDetailViewModel> {
    let movements = session
        .movements()
        .iter()
        .map(|m| MovementEntry {
            id: m.id,
            movement_type: m.movement_type,
            hand: m.hand,
            created_at: m.created_at,
            summary: summarize_movement(m),
        })
        .collect::<Vec<_>>();

    let mut result = CommandResultViewModel::new(SessionDetailViewModel {
        id: session.id,
        created_at: session.created_at,
        ended_at: session.ended_at,
        stats: SessionStats::from_session(session),
        movements,
    });

    if let Some(first) = session.movements().first() {
        result = result.with_suggestion(
            Guidance::new("Reconstruct a movement's path")
                .with_command(format!("swingtrace movement trajectory {}", short_id(&first.id))),
        );
    }
    result
}

pub fn present_session_deleted(session: &Session) -> CommandResultViewModel<SessionDeleteViewModel> {
    CommandResultViewModel::new(SessionDeleteViewModel {
        id: session.id,
        movement_count: session.movements().len(),
        sample_count: session.sample_count(),
    })
    .with_badge(StatusBadge::success("Session deleted"))
}

pub fn present_record(record: RecordViewModel) -> CommandResultViewModel<RecordViewModel> {
    let badge = if record.interrupted {
        StatusBadge::warning(format!(
            "Interrupted; saved {}",
            plural(record.movements.len(), "movement")
        ))
    } else {
        StatusBadge::success(format!(
            "Recorded {} ({})",
            plural(record.movements.len(), "movement"),
            plural(record.sample_count, "sample")
        ))
    };
    let show = format!("swingtrace session show {}", short_id(&record.session_id));

    CommandResultViewModel::new(record)
        .with_badge(badge)
        .with_suggestion(Guidance::new("Inspect the session").with_command(show))
}

pub fn present_export(
    movement: &Movement,
    path: PathBuf,
    row_count: usize,
) -> CommandResultViewModel<ExportViewModel> {
    CommandResultViewModel::new(ExportViewModel {
        movement_id: movement.id,
        path,
        row_count,
    })
}

pub fn present_trajectory(
    movement: &Movement,
    trajectory: Trajectory,
    config: &TrajectoryConfig,
) -> CommandResultViewModel<TrajectoryViewModel> {
    let colors = trajectory
        .segment_colors(&config.colors)
        .into_iter()
        .map(|c| c.to_hex())
        .collect();
    let max_speed = trajectory.max_speed();

    let Trajectory {
        positions,
        speeds,
        orientations,
        key_times,
    } = trajectory;

    CommandResultViewModel::new(TrajectoryViewModel {
        movement_id: movement.id,
        movement_type: movement.movement_type,
        hand: movement.hand,
        sample_count: movement.samples.len(),
        max_speed,
        positions,
        speeds,
        colors,
        orientations,
        key_times,
    })
}

pub fn present_config(
    path: PathBuf,
    exists: bool,
    config: Config,
) -> CommandResultViewModel<ConfigViewModel> {
    let result = CommandResultViewModel::new(ConfigViewModel {
        path,
        exists,
        config,
    });
    if exists {
        result
    } else {
        result.with_suggestion(
            Guidance::new("Write these defaults to disk").with_command("swingtrace config init"),
        )
    }
}

pub fn present_config_init(path: PathBuf, written: bool) -> CommandResultViewModel<ConfigInitViewModel> {
    let badge = if written {
        StatusBadge::success("Configuration written")
    } else {
        StatusBadge::info("Configuration unchanged")
    };
    CommandResultViewModel::new(ConfigInitViewModel { path, written }).with_badge(badge)
}
