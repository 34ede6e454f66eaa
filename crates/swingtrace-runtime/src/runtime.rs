use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::capture::CaptureSessionManager;
use crate::events::CaptureEvent;
use crate::feedback::{Feedback, LogFeedback};
use crate::relay::{RelayChannel, RelayCommand, StatusReporter};
use crate::store::SessionStore;
use crate::stream::{DeliverySink, SampleStream, SensorSource, StreamDelivery};
use crate::{Error, Result};

/// Everything the owner thread consumes, on one queue.
#[derive(Debug)]
pub enum CaptureInput {
    Reading(StreamDelivery),
    Command(RelayCommand),
    Shutdown,
}

/// Cloneable way for other contexts to marshal work onto the owner thread.
#[derive(Clone)]
pub struct CaptureHandle {
    tx: Sender<CaptureInput>,
}

impl CaptureHandle {
    pub fn send_command(&self, command: RelayCommand) -> Result<()> {
        self.send(CaptureInput::Command(command))
    }

    pub fn request_shutdown(&self) -> Result<()> {
        self.send(CaptureInput::Shutdown)
    }

    /// Sink for a [`SampleStream`] that forwards readings to the owner.
    pub fn delivery_sink(&self) -> DeliverySink {
        let tx = self.tx.clone();
        Arc::new(move |delivery| {
            let _ = tx.send(CaptureInput::Reading(delivery));
        })
    }

    fn send(&self, input: CaptureInput) -> Result<()> {
        self.tx
            .send(input)
            .map_err(|_| Error::InvalidOperation("capture runtime has stopped".to_string()))
    }
}

pub struct CaptureRuntimeConfig {
    pub source: Box<dyn SensorSource>,
    pub store: Box<dyn SessionStore>,
    pub feedback: Box<dyn Feedback>,
    pub sample_rate_hz: f64,
    /// Where status reports go, if anywhere.
    pub status_channel: Option<Arc<dyn RelayChannel>>,
}

impl CaptureRuntimeConfig {
    pub fn new(source: Box<dyn SensorSource>, store: Box<dyn SessionStore>) -> Self {
        Self {
            source,
            store,
            feedback: Box::new(LogFeedback),
            sample_rate_hz: 60.0,
            status_channel: None,
        }
    }
}

/// Owner thread for a [`CaptureSessionManager`].
///
/// Sensor readings and relay commands are two independent producers feeding
/// the same queue; the thread applies them one at a time. Events come out
/// on [`CaptureRuntime::receiver`].
pub struct CaptureRuntime {
    handle: CaptureHandle,
    rx: Receiver<CaptureEvent>,
    thread: Option<JoinHandle<()>>,
}

impl CaptureRuntime {
    pub fn start(config: CaptureRuntimeConfig) -> Result<Self> {
        let (tx_input, rx_input) = channel();
        let (tx_events, rx_events) = channel();
        let handle = CaptureHandle { tx: tx_input };
        let sink = handle.delivery_sink();

        let CaptureRuntimeConfig {
            source,
            store,
            feedback,
            sample_rate_hz,
            status_channel,
        } = config;

        let thread = std::thread::Builder::new()
            .name("swingtrace-capture".to_string())
            .spawn(move || {
                let stream = SampleStream::new(source, sample_rate_hz);
                let mut manager = CaptureSessionManager::new(stream, sink, store)
                    .with_feedback(feedback)
                    .with_events(tx_events);
                let reporter = status_channel.map(StatusReporter::new);

                run_owner_loop(&mut manager, &rx_input, reporter.as_ref());
                tracing::debug!("capture runtime stopped");
            })?;

        Ok(Self {
            handle,
            rx: rx_events,
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> CaptureHandle {
        self.handle.clone()
    }

    pub fn receiver(&self) -> &Receiver<CaptureEvent> {
        &self.rx
    }

    /// End any open session, then wait for the owner thread to exit.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop_and_join()
    }

    fn stop_and_join(&mut self) -> Result<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        // Already gone if the thread exited on its own.
        let _ = self.handle.request_shutdown();
        thread
            .join()
            .map_err(|_| Error::InvalidOperation("capture thread panicked".to_string()))
    }
}

impl Drop for CaptureRuntime {
    fn drop(&mut self) {
        if let Err(e) = self.stop_and_join() {
            tracing::error!(error = %e, "capture runtime did not shut down cleanly");
        }
    }
}

fn run_owner_loop(
    manager: &mut CaptureSessionManager,
    rx: &Receiver<CaptureInput>,
    reporter: Option<&StatusReporter>,
) {
    while let Ok(input) = rx.recv() {
        let before = manager.state();
        let keep_running = match input {
            CaptureInput::Reading(delivery) => {
                manager.handle_delivery(delivery);
                true
            }
            CaptureInput::Command(command) => {
                if let Err(e) = manager.apply(command) {
                    tracing::warn!(command = command.name(), error = %e, "command failed");
                }
                true
            }
            CaptureInput::Shutdown => {
                if let Err(e) = manager.shutdown() {
                    tracing::warn!(error = %e, "session not saved during shutdown");
                }
                false
            }
        };

        let after = manager.state();
        if after != before
            && let Some(reporter) = reporter
        {
            reporter.report(after);
        }
        if !keep_running {
            break;
        }
    }
}
