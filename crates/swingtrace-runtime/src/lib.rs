// Capture runtime
// One owner thread holds the session state machine; the sensor stream and
// the relay marshal onto it through a single input queue.

pub mod capture;
pub mod config;
pub mod error;
pub mod events;
pub mod feedback;
pub mod relay;
pub mod runtime;
pub mod store;
pub mod stream;
pub mod synthetic;

pub use capture::{CaptureSessionManager, Transition};
pub use config::{CaptureConfig, Config, resolve_data_dir};
pub use error::{Error, Result};
pub use events::{CaptureEvent, CaptureState};
pub use feedback::{Feedback, FeedbackSignal, LogFeedback};
pub use relay::{
    ChannelStatus, Connectivity, DecodeError, LoopbackChannel, PeerTracker, RelayChannel,
    RelayClient, RelayCommand, RelayInbound, RelayMessage, StatusReporter, WireMessage,
};
pub use runtime::{CaptureHandle, CaptureInput, CaptureRuntime, CaptureRuntimeConfig};
pub use store::SessionStore;
pub use stream::{DeliverySink, SampleStream, SensorFeed, SensorSource, StreamDelivery};
pub use synthetic::SyntheticSwingSource;
