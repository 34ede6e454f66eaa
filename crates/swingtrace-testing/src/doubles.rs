//! Stand-ins for the capture runtime's collaborators.

use std::sync::{Arc, Mutex};
use swingtrace_index::Error as IndexError;
use swingtrace_runtime::{
    Error, Feedback, FeedbackSignal, Result, SensorFeed, SensorSource, SessionStore,
};
use swingtrace_types::{SensorReading, Session};

// --------------------------------------------------------
// Sensors
// --------------------------------------------------------

/// Replays the same readings on every `open`, then ends the feed.
#[derive(Debug, Clone)]
pub struct ScriptedSensor {
    readings: Vec<SensorReading>,
    opened: Arc<Mutex<usize>>,
    open_limit: Option<usize>,
}

impl ScriptedSensor {
    pub fn new(readings: Vec<SensorReading>) -> Self {
        Self {
            readings,
            opened: Arc::new(Mutex::new(0)),
            open_limit: None,
        }
    }

    /// Refuse every `open` after the first `limit`.
    pub fn with_open_limit(mut self, limit: usize) -> Self {
        self.open_limit = Some(limit);
        self
    }

    /// Shared counter of how many feeds were opened.
    pub fn open_count(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.opened)
    }
}

impl SensorSource for ScriptedSensor {
    fn open(&mut self) -> Result<Box<dyn SensorFeed>> {
        if let Ok(mut n) = self.opened.lock() {
            if self.open_limit.is_some_and(|limit| *n >= limit) {
                return Err(Error::SensorUnavailable("sensor went away".to_string()));
            }
            *n += 1;
        }
        Ok(Box::new(ScriptedFeed {
            readings: self.readings.clone().into_iter(),
        }))
    }
}

struct ScriptedFeed {
    readings: std::vec::IntoIter<SensorReading>,
}

impl SensorFeed for ScriptedFeed {
    fn next_reading(&mut self) -> Option<SensorReading> {
        self.readings.next()
    }
}

/// A sensor that never opens.
#[derive(Debug, Clone, Default)]
pub struct UnavailableSensor;

impl SensorSource for UnavailableSensor {
    fn open(&mut self) -> Result<Box<dyn SensorFeed>> {
        Err(Error::SensorUnavailable(
            "motion sensor not available".to_string(),
        ))
    }
}

// --------------------------------------------------------
// Stores
// --------------------------------------------------------

/// In-memory store whose contents stay inspectable after the store itself
/// has been moved onto the capture thread.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    staged: Vec<Session>,
    saved: Arc<Mutex<Vec<Session>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Arc<Mutex<Vec<Session>>> {
        Arc::clone(&self.saved)
    }
}

impl SessionStore for MemoryStore {
    fn insert(&mut self, session: Session) {
        self.staged.push(session);
    }

    fn save(&mut self) -> swingtrace_index::Result<()> {
        let staged = std::mem::take(&mut self.staged);
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| IndexError::Io(std::io::Error::other("memory store poisoned")))?;
        saved.extend(staged);
        Ok(())
    }
}

/// Store whose `save` always fails. Staged sessions are dropped, matching
/// the at-most-once contract of the real store.
#[derive(Debug, Clone, Default)]
pub struct FailingStore {
    attempts: Arc<Mutex<usize>>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.attempts)
    }
}

impl SessionStore for FailingStore {
    fn insert(&mut self, _session: Session) {}

    fn save(&mut self) -> swingtrace_index::Result<()> {
        if let Ok(mut n) = self.attempts.lock() {
            *n += 1;
        }
        Err(IndexError::Io(std::io::Error::other("disk full")))
    }
}

// --------------------------------------------------------
// Feedback
// --------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    signals: Arc<Mutex<Vec<FeedbackSignal>>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signals(&self) -> Vec<FeedbackSignal> {
        self.signals.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Feedback for RecordingFeedback {
    fn signal(&mut self, signal: FeedbackSignal) {
        if let Ok(mut s) = self.signals.lock() {
            s.push(signal);
        }
    }
}
