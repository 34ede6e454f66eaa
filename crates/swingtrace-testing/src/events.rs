use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use swingtrace_runtime::CaptureEvent;

/// Wait until an event matching `pred` arrives. Non-matching events are
/// returned alongside so tests can still inspect them.
pub fn wait_for(
    rx: &Receiver<CaptureEvent>,
    timeout: Duration,
    pred: impl Fn(&CaptureEvent) -> bool,
) -> (Option<CaptureEvent>, Vec<CaptureEvent>) {
    let deadline = Instant::now() + timeout;
    let mut skipped = Vec::new();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(event) if pred(&event) => return (Some(event), skipped),
            Ok(event) => skipped.push(event),
            Err(_) => return (None, skipped),
        }
    }
}

/// Everything already queued, without waiting.
pub fn drain(rx: &Receiver<CaptureEvent>) -> Vec<CaptureEvent> {
    rx.try_iter().collect()
}
