use crate::presentation::ConsoleRenderer;
use crate::presentation::presenters;
use crate::presentation::view_models::{RecordViewModel, RecordedMovementEntry};
use anyhow::{Context, Result, anyhow, bail};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use swingtrace_index::Database;
use swingtrace_runtime::config::DATABASE_FILE;
use swingtrace_runtime::{
    CaptureEvent, CaptureRuntime, CaptureRuntimeConfig, Config, LoopbackChannel, PeerTracker,
    RelayChannel, RelayClient, RelayInbound, SyntheticSwingSource,
};
use swingtrace_types::{Hand, MovementType};

/// How long to wait for the capture thread to save after `endSession`.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub struct RecordOptions {
    pub movement_type: MovementType,
    pub hand: Hand,
    pub count: usize,
    pub duration: Duration,
}

pub fn handle(
    data_dir: &Path,
    config: &Config,
    options: RecordOptions,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let db = Database::open(&data_dir.join(DATABASE_FILE))?;
    let rate_hz = config.capture.sample_rate_hz;

    // Status reports flow back to the controller side over their own channel.
    let peer = Arc::new(PeerTracker::new());
    let peer_sink = Arc::clone(&peer);
    let to_controller: Arc<dyn RelayChannel> = Arc::new(LoopbackChannel::new(move |message| {
        peer_sink.observe(&message);
    }));

    let mut runtime_config =
        CaptureRuntimeConfig::new(Box::new(SyntheticSwingSource::new(rate_hz)), Box::new(db));
    runtime_config.sample_rate_hz = rate_hz;
    runtime_config.status_channel = Some(to_controller);
    let runtime = CaptureRuntime::start(runtime_config)?;

    let inbound = RelayInbound::new(runtime.handle());
    let to_capture: Arc<dyn RelayChannel> = Arc::new(LoopbackChannel::new(move |message| {
        inbound.receive(&message);
    }));
    let client = RelayClient::new(to_capture);
    tracing::debug!(connectivity = %client.connectivity(), "relay ready");

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("failed to install Ctrl-C handler")?;

    client.start_session()?;
    for n in 0..options.count {
        if interrupted.load(Ordering::SeqCst) {
            break;
        }
        client.start_movement(options.movement_type, options.hand)?;
        record_for(options.duration, &interrupted);
        client.stop_movement()?;
        tracing::info!(movement = n + 1, of = options.count, "movement captured");
    }
    client.end_session()?;

    let mut record = settle(runtime.receiver())?;
    record.interrupted = interrupted.load(Ordering::SeqCst);
    tracing::debug!(peer_state = ?peer.peer_state(), "capture settled");

    runtime.shutdown()?;
    renderer.render(presenters::present_record(record))
}

fn record_for(duration: Duration, interrupted: &AtomicBool) {
    let deadline = Instant::now() + duration;
    while !interrupted.load(Ordering::SeqCst) {
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        std::thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

/// Drain capture events until the session is saved or saving fails.
fn settle(events: &Receiver<CaptureEvent>) -> Result<RecordViewModel> {
    let mut movements = Vec::new();
    let mut ignored_commands = Vec::new();
    let deadline = Instant::now() + SETTLE_TIMEOUT;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let event = match events.recv_timeout(remaining) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => {
                bail!("timed out waiting for the session to be saved")
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(anyhow!("capture runtime stopped before the session ended"));
            }
        };

        match event {
            CaptureEvent::MovementRecorded {
                movement_id,
                movement_type,
                hand,
                sample_count,
                ..
            } => movements.push(RecordedMovementEntry {
                id: movement_id,
                movement_type,
                hand,
                sample_count,
            }),
            CaptureEvent::MovementExtended {
                movement_id,
                sample_count,
                ..
            } => {
                if let Some(entry) = movements.iter_mut().find(|m| m.id == movement_id) {
                    entry.sample_count = sample_count;
                }
            }
            CaptureEvent::CommandIgnored {
                command,
                state,
                reason,
            } => ignored_commands.push(format!("{} in {}: {}", command, state, reason)),
            CaptureEvent::SessionEnded {
                session_id,
                sample_count,
                ..
            } => {
                return Ok(RecordViewModel {
                    session_id,
                    movements,
                    sample_count,
                    interrupted: false,
                    ignored_commands,
                });
            }
            CaptureEvent::PersistenceFailed {
                session_id,
                message,
            } => bail!("failed to save session {}: {}", session_id, message),
            CaptureEvent::StateChanged { .. } => {}
        }
    }
}
