//! Two-device command relay.
//!
//! Messages are flat string maps. A command message carries a mandatory
//! `command` key; `startMovementRecording` adds `movementType` and `handType`.
//! The capture side answers state changes with an advisory `status` message.
//!
//! The channel is best effort: messages may be lost, delayed or duplicated.
//! Receivers stay correct under duplicates because every command is
//! idempotent in the capture state machine. Reordering is not repaired.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use swingtrace_types::{Hand, MovementType};

use crate::events::CaptureState;
use crate::runtime::CaptureHandle;
use crate::{Error, Result};

pub type WireMessage = Map<String, Value>;

const KEY_COMMAND: &str = "command";
const KEY_MOVEMENT_TYPE: &str = "movementType";
const KEY_HAND_TYPE: &str = "handType";
const KEY_STATUS: &str = "status";

// ==========================================
// 1. Message codec
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayCommand {
    StartSession,
    EndSession,
    StartMovementRecording {
        movement_type: MovementType,
        hand: Hand,
    },
    StopMovementRecording,
}

impl RelayCommand {
    pub fn name(&self) -> &'static str {
        match self {
            RelayCommand::StartSession => "startSession",
            RelayCommand::EndSession => "endSession",
            RelayCommand::StartMovementRecording { .. } => "startMovementRecording",
            RelayCommand::StopMovementRecording => "stopMovementRecording",
        }
    }

    pub fn to_message(&self) -> WireMessage {
        let mut message = Map::new();
        message.insert(KEY_COMMAND.to_string(), Value::from(self.name()));
        if let RelayCommand::StartMovementRecording {
            movement_type,
            hand,
        } = self
        {
            message.insert(
                KEY_MOVEMENT_TYPE.to_string(),
                Value::from(movement_type.as_str()),
            );
            message.insert(KEY_HAND_TYPE.to_string(), Value::from(hand.as_str()));
        }
        message
    }

    pub fn from_message(message: &WireMessage) -> std::result::Result<Self, DecodeError> {
        let command = string_field(message, KEY_COMMAND)?;
        match command {
            "startSession" => Ok(RelayCommand::StartSession),
            "endSession" => Ok(RelayCommand::EndSession),
            "stopMovementRecording" => Ok(RelayCommand::StopMovementRecording),
            "startMovementRecording" => {
                let movement_type = string_field(message, KEY_MOVEMENT_TYPE)?
                    .parse()
                    .map_err(|_| DecodeError::InvalidField(KEY_MOVEMENT_TYPE))?;
                let hand = string_field(message, KEY_HAND_TYPE)?
                    .parse()
                    .map_err(|_| DecodeError::InvalidField(KEY_HAND_TYPE))?;
                Ok(RelayCommand::StartMovementRecording {
                    movement_type,
                    hand,
                })
            }
            other => Err(DecodeError::UnknownCommand(other.to_string())),
        }
    }
}

pub fn status_message(state: CaptureState) -> WireMessage {
    let mut message = Map::new();
    message.insert(KEY_STATUS.to_string(), Value::from(state.as_str()));
    message
}

/// Anything that can arrive over the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayMessage {
    Command(RelayCommand),
    Status(CaptureState),
}

impl RelayMessage {
    pub fn decode(message: &WireMessage) -> std::result::Result<Self, DecodeError> {
        if message.contains_key(KEY_COMMAND) {
            return RelayCommand::from_message(message).map(RelayMessage::Command);
        }
        if message.contains_key(KEY_STATUS) {
            let raw = string_field(message, KEY_STATUS)?;
            return CaptureState::parse(raw)
                .map(RelayMessage::Status)
                .ok_or(DecodeError::InvalidField(KEY_STATUS));
        }
        Err(DecodeError::MissingField(KEY_COMMAND))
    }
}

fn string_field<'a>(
    message: &'a WireMessage,
    key: &'static str,
) -> std::result::Result<&'a str, DecodeError> {
    match message.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(DecodeError::InvalidField(key)),
        None => Err(DecodeError::MissingField(key)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    MissingField(&'static str),
    InvalidField(&'static str),
    UnknownCommand(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MissingField(key) => write!(f, "missing field '{}'", key),
            DecodeError::InvalidField(key) => write!(f, "invalid value for '{}'", key),
            DecodeError::UnknownCommand(name) => write!(f, "unknown command '{}'", name),
        }
    }
}

impl std::error::Error for DecodeError {}

// ==========================================
// 2. Channel and connectivity
// ==========================================

/// Raw link facts as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelStatus {
    pub supported: bool,
    pub paired: bool,
    pub peer_app_installed: bool,
    pub reachable: bool,
}

/// The first thing standing between us and the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Unsupported,
    Unpaired,
    PeerAppMissing,
    Unreachable,
    Reachable,
}

impl ChannelStatus {
    pub fn connected() -> Self {
        Self {
            supported: true,
            paired: true,
            peer_app_installed: true,
            reachable: true,
        }
    }

    pub fn connectivity(&self) -> Connectivity {
        if !self.supported {
            Connectivity::Unsupported
        } else if !self.paired {
            Connectivity::Unpaired
        } else if !self.peer_app_installed {
            Connectivity::PeerAppMissing
        } else if !self.reachable {
            Connectivity::Unreachable
        } else {
            Connectivity::Reachable
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.connectivity() == Connectivity::Reachable
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Connectivity::Unsupported => "channel unsupported",
            Connectivity::Unpaired => "not paired",
            Connectivity::PeerAppMissing => "peer app not installed",
            Connectivity::Unreachable => "peer not reachable",
            Connectivity::Reachable => "reachable",
        };
        f.write_str(s)
    }
}

/// One direction of the inter-device link.
pub trait RelayChannel: Send + Sync {
    fn status(&self) -> ChannelStatus;

    /// Fire and forget. An `Err` means the platform refused the message;
    /// `Ok` says nothing about delivery.
    fn send(&self, message: WireMessage) -> Result<()>;
}

// ==========================================
// 3. Outbound (controller side)
// ==========================================

/// Sends commands to the capture device. Never blocks, never retries.
#[derive(Clone)]
pub struct RelayClient {
    channel: Arc<dyn RelayChannel>,
}

impl RelayClient {
    pub fn new(channel: Arc<dyn RelayChannel>) -> Self {
        Self { channel }
    }

    pub fn connectivity(&self) -> Connectivity {
        self.channel.status().connectivity()
    }

    pub fn send(&self, command: RelayCommand) -> Result<()> {
        send_gated(self.channel.as_ref(), command.to_message())?;
        tracing::debug!(command = command.name(), "relay command sent");
        Ok(())
    }

    pub fn start_session(&self) -> Result<()> {
        self.send(RelayCommand::StartSession)
    }

    pub fn start_movement(&self, movement_type: MovementType, hand: Hand) -> Result<()> {
        self.send(RelayCommand::StartMovementRecording {
            movement_type,
            hand,
        })
    }

    pub fn stop_movement(&self) -> Result<()> {
        self.send(RelayCommand::StopMovementRecording)
    }

    pub fn end_session(&self) -> Result<()> {
        self.send(RelayCommand::EndSession)
    }
}

fn send_gated(channel: &dyn RelayChannel, message: WireMessage) -> Result<()> {
    let status = channel.status();
    if !status.is_reachable() {
        return Err(Error::ChannelUnreachable(status));
    }
    channel.send(message)
}

/// Last capture state the peer reported. Advisory only.
#[derive(Debug, Default)]
pub struct PeerTracker {
    state: Mutex<Option<CaptureState>>,
}

impl PeerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a status report. Returns false for anything else.
    pub fn observe(&self, message: &WireMessage) -> bool {
        match RelayMessage::decode(message) {
            Ok(RelayMessage::Status(state)) => {
                if let Ok(mut slot) = self.state.lock() {
                    *slot = Some(state);
                }
                true
            }
            Ok(RelayMessage::Command(_)) => false,
            Err(e) => {
                tracing::debug!(error = %e, "dropping malformed status message");
                false
            }
        }
    }

    pub fn peer_state(&self) -> Option<CaptureState> {
        self.state.lock().ok().and_then(|slot| *slot)
    }
}

// ==========================================
// 4. Inbound (capture side)
// ==========================================

/// Decodes arriving messages and marshals commands onto the capture owner.
///
/// Safe to call from whatever context the channel delivers on.
#[derive(Clone)]
pub struct RelayInbound {
    handle: CaptureHandle,
}

impl RelayInbound {
    pub fn new(handle: CaptureHandle) -> Self {
        Self { handle }
    }

    /// Returns true when a command was forwarded.
    pub fn receive(&self, message: &WireMessage) -> bool {
        match RelayMessage::decode(message) {
            Ok(RelayMessage::Command(command)) => match self.handle.send_command(command) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(command = command.name(), error = %e, "capture runtime gone");
                    false
                }
            },
            Ok(RelayMessage::Status(_)) => false,
            Err(e) => {
                tracing::debug!(error = %e, "dropping malformed relay message");
                false
            }
        }
    }
}

/// Sends advisory status reports from the capture owner back to the peer.
pub struct StatusReporter {
    channel: Arc<dyn RelayChannel>,
}

impl StatusReporter {
    pub fn new(channel: Arc<dyn RelayChannel>) -> Self {
        Self { channel }
    }

    pub fn report(&self, state: CaptureState) {
        if let Err(e) = send_gated(self.channel.as_ref(), status_message(state)) {
            tracing::debug!(%state, error = %e, "status report not sent");
        }
    }
}

// ==========================================
// 5. In-process loopback
// ==========================================

type Deliver = Box<dyn Fn(WireMessage) + Send + Sync>;

/// One-way in-process channel that hands each message to a closure on the
/// sender's thread. Reachability can be toggled to simulate a lost peer.
pub struct LoopbackChannel {
    deliver: Deliver,
    reachable: AtomicBool,
    refuse_sends: AtomicBool,
    sent: AtomicUsize,
}

impl LoopbackChannel {
    pub fn new(deliver: impl Fn(WireMessage) + Send + Sync + 'static) -> Self {
        Self {
            deliver: Box::new(deliver),
            reachable: AtomicBool::new(true),
            refuse_sends: AtomicBool::new(false),
            sent: AtomicUsize::new(0),
        }
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Make `send` fail while the link still looks reachable.
    pub fn set_refuse_sends(&self, refuse: bool) {
        self.refuse_sends.store(refuse, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

impl RelayChannel for LoopbackChannel {
    fn status(&self) -> ChannelStatus {
        ChannelStatus {
            reachable: self.reachable.load(Ordering::SeqCst),
            ..ChannelStatus::connected()
        }
    }

    fn send(&self, message: WireMessage) -> Result<()> {
        if self.refuse_sends.load(Ordering::SeqCst) {
            return Err(Error::Send("loopback refused message".to_string()));
        }
        self.sent.fetch_add(1, Ordering::SeqCst);
        (self.deliver)(message);
        Ok(())
    }
}
