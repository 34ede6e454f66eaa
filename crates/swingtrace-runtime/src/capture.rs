use chrono::Utc;
use std::sync::mpsc::Sender;
use swingtrace_engine::{MotionSampleBuilder, SampleBuffer};
use swingtrace_types::{Hand, Movement, MovementType, Session};

use crate::events::{CaptureEvent, CaptureState};
use crate::feedback::{Feedback, FeedbackSignal, LogFeedback};
use crate::relay::RelayCommand;
use crate::store::SessionStore;
use crate::stream::{DeliverySink, SampleStream, StreamDelivery};
use crate::{Error, Result};

/// What a transition call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Transition {
    Applied,
    Ignored,
}

impl Transition {
    pub fn is_applied(self) -> bool {
        self == Transition::Applied
    }
}

// NOTE: Late readings
// `SampleStream::stop` cannot recall a reading its worker already pulled, so
// one delivery tagged with the stopped generation may still arrive. It was
// captured before the stop instant, so it is appended to the movement that
// was just finalized (the builder is untouched until the next start, so its
// index continues). Only one such reading is taken, and only while the
// session is still open. Anything else that does not carry the live
// generation is dropped. An accepted late reading is announced with
// `CaptureEvent::MovementExtended` carrying the corrected sample count.

/// Session/Movement lifecycle state machine.
///
/// All methods take `&mut self`: the manager must be confined to one owner
/// context. Readings arrive through [`CaptureSessionManager::handle_delivery`]
/// after being marshalled onto that context by the stream's sink.
pub struct CaptureSessionManager {
    stream: SampleStream,
    sink: DeliverySink,
    store: Box<dyn SessionStore>,
    feedback: Box<dyn Feedback>,
    events: Option<Sender<CaptureEvent>>,

    builder: MotionSampleBuilder,
    buffer: SampleBuffer,
    session: Option<Session>,
    movement: Option<Movement>,
    live_generation: Option<u64>,
    late_generation: Option<u64>,
}

impl CaptureSessionManager {
    pub fn new(stream: SampleStream, sink: DeliverySink, store: Box<dyn SessionStore>) -> Self {
        Self {
            stream,
            sink,
            store,
            feedback: Box::new(LogFeedback),
            events: None,
            builder: MotionSampleBuilder::new(),
            buffer: SampleBuffer::new(),
            session: None,
            movement: None,
            live_generation: None,
            late_generation: None,
        }
    }

    pub fn with_feedback(mut self, feedback: Box<dyn Feedback>) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn with_events(mut self, events: Sender<CaptureEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn state(&self) -> CaptureState {
        match (&self.session, &self.movement) {
            (None, _) => CaptureState::Idle,
            (Some(_), None) => CaptureState::SessionActive,
            (Some(_), Some(_)) => CaptureState::MovementActive,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_movement(&self) -> Option<&Movement> {
        self.movement.as_ref()
    }

    pub fn buffered_samples(&self) -> usize {
        self.buffer.len()
    }

    // Transitions

    pub fn start_session(&mut self) -> Transition {
        let from = self.state();
        if from != CaptureState::Idle {
            self.ignored("startSession", "session already active");
            return Transition::Ignored;
        }

        let session = Session::new(Utc::now());
        tracing::info!(session_id = %session.id, "session started");
        self.session = Some(session);
        self.movement = None;
        self.late_generation = None;
        self.changed(from);
        Transition::Applied
    }

    /// Begin recording a movement. Fails with [`Error::NoActiveSession`]
    /// when idle and with [`Error::SensorUnavailable`] when the sensor will
    /// not start; in both cases the state is unchanged.
    pub fn start_movement(&mut self, movement_type: MovementType, hand: Hand) -> Result<Transition> {
        let from = self.state();
        let session_id = match (&self.session, from) {
            (None, _) => {
                tracing::warn!(%movement_type, %hand, "movement start without an active session");
                return Err(Error::NoActiveSession);
            }
            (Some(_), CaptureState::MovementActive) => {
                self.ignored("startMovementRecording", "movement already recording");
                return Ok(Transition::Ignored);
            }
            (Some(session), _) => session.id,
        };

        let movement = Movement::new(session_id, movement_type, hand, Utc::now());
        let generation = self.stream.start(self.sink.clone())?;
        // The builder still numbers a pending late reading until the new
        // stream is actually running.
        self.builder.reset();
        self.buffer.clear();
        tracing::info!(
            movement_id = %movement.id,
            %movement_type,
            %hand,
            generation,
            "movement recording started"
        );

        self.movement = Some(movement);
        self.live_generation = Some(generation);
        self.late_generation = None;
        self.feedback.signal(FeedbackSignal::MovementStarted);
        self.changed(from);
        Ok(Transition::Applied)
    }

    pub fn stop_movement(&mut self) -> Transition {
        let from = self.state();
        if from != CaptureState::MovementActive {
            self.ignored("stopMovementRecording", "no movement recording");
            return Transition::Ignored;
        }

        self.finalize_movement();
        self.feedback.signal(FeedbackSignal::MovementStopped);
        self.changed(from);
        Transition::Applied
    }

    /// End the session, finalizing an in-flight movement first, and hand
    /// the frozen session to the store.
    ///
    /// The manager is idle afterwards whatever the store says. On a failed
    /// save the session comes back inside [`Error::PersistenceFailure`].
    pub fn end_session(&mut self) -> Result<Transition> {
        let from = self.state();
        if from == CaptureState::Idle {
            self.ignored("endSession", "no active session");
            return Ok(Transition::Ignored);
        }

        if from == CaptureState::MovementActive {
            tracing::info!("ending session mid-movement, finalizing movement first");
            self.finalize_movement();
            self.feedback.signal(FeedbackSignal::MovementStopped);
        }

        let Some(mut session) = self.session.take() else {
            return Ok(Transition::Ignored);
        };
        session.end(Utc::now());
        self.late_generation = None;
        self.changed(from);

        let session_id = session.id;
        let movement_count = session.movements().len();
        let sample_count = session.sample_count();

        self.store.insert(session.clone());
        match self.store.save() {
            Ok(()) => {
                tracing::info!(%session_id, movement_count, sample_count, "session saved");
                self.emit(CaptureEvent::SessionEnded {
                    session_id,
                    movement_count,
                    sample_count,
                });
                Ok(Transition::Applied)
            }
            Err(source) => {
                tracing::error!(%session_id, error = %source, "failed to save session");
                self.emit(CaptureEvent::PersistenceFailed {
                    session_id,
                    message: source.to_string(),
                });
                Err(Error::PersistenceFailure {
                    session: Box::new(session),
                    source,
                })
            }
        }
    }

    /// Dispatch a decoded relay command. Errors are reported as
    /// [`CaptureEvent::CommandIgnored`] or [`CaptureEvent::PersistenceFailed`]
    /// and also returned.
    pub fn apply(&mut self, command: RelayCommand) -> Result<Transition> {
        tracing::debug!(command = command.name(), state = %self.state(), "applying command");
        match command {
            RelayCommand::StartSession => Ok(self.start_session()),
            RelayCommand::EndSession => self.end_session(),
            RelayCommand::StopMovementRecording => Ok(self.stop_movement()),
            RelayCommand::StartMovementRecording {
                movement_type,
                hand,
            } => self.start_movement(movement_type, hand).inspect_err(|e| {
                let reason = e.to_string();
                self.ignored(command.name(), &reason);
            }),
        }
    }

    // Readings

    /// Accept one reading from the stream.
    pub fn handle_delivery(&mut self, delivery: StreamDelivery) {
        if let Some(movement) = &self.movement
            && self.live_generation == Some(delivery.generation)
        {
            let sample = self.builder.ingest(movement.id, &delivery.reading);
            self.buffer.push(sample);
            return;
        }

        if self.late_generation == Some(delivery.generation) {
            self.late_generation = None;
            if let Some(session) = self.session.as_mut()
                && let Some(last) = session.last_movement_mut()
            {
                let sample = self.builder.ingest(last.id, &delivery.reading);
                tracing::debug!(
                    movement_id = %last.id,
                    index = sample.index,
                    "late reading appended to finalized movement"
                );
                last.samples.push(sample);
                let event = CaptureEvent::MovementExtended {
                    session_id: last.session_id,
                    movement_id: last.id,
                    sample_count: last.samples.len(),
                };
                self.emit(event);
                return;
            }
        }

        tracing::debug!(generation = delivery.generation, "discarding stale reading");
    }

    /// End any open session and stop the stream.
    pub fn shutdown(&mut self) -> Result<Transition> {
        let result = self.end_session();
        self.stream.stop();
        result
    }

    // Internals

    fn finalize_movement(&mut self) {
        self.stream.stop();
        self.late_generation = self.live_generation.take();

        let Some(mut movement) = self.movement.take() else {
            return;
        };
        movement.samples = self.buffer.take();

        let event = CaptureEvent::MovementRecorded {
            session_id: movement.session_id,
            movement_id: movement.id,
            movement_type: movement.movement_type,
            hand: movement.hand,
            sample_count: movement.samples.len(),
        };
        tracing::info!(
            movement_id = %movement.id,
            samples = movement.samples.len(),
            "movement finalized"
        );

        if let Some(session) = self.session.as_mut()
            && let Err(e) = session.append_movement(movement)
        {
            tracing::error!(error = %e, "dropping movement for closed session");
            return;
        }
        self.emit(event);
    }

    fn changed(&self, from: CaptureState) {
        let to = self.state();
        if from != to {
            tracing::debug!(%from, %to, "capture state changed");
            self.emit(CaptureEvent::StateChanged { from, to });
        }
    }

    fn ignored(&self, command: &'static str, reason: &str) {
        let state = self.state();
        tracing::debug!(command, %state, reason, "command ignored");
        self.emit(CaptureEvent::CommandIgnored {
            command,
            state,
            reason: reason.to_string(),
        });
    }

    fn emit(&self, event: CaptureEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }
}
