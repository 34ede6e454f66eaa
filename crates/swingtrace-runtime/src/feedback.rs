/// Physical cue played on the capture device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackSignal {
    MovementStarted,
    MovementStopped,
}

/// Haptic/audio feedback collaborator.
pub trait Feedback: Send {
    fn signal(&mut self, signal: FeedbackSignal);
}

/// Default feedback for hosts without a haptic engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFeedback;

impl Feedback for LogFeedback {
    fn signal(&mut self, signal: FeedbackSignal) {
        tracing::info!(?signal, "feedback");
    }
}
