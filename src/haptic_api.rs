// The seam between the controller side and whatever actually makes the
// actuator move. The device state machine only talks to these traits; the
// cpal backend in audio/ is one implementation, the test fixture another.

use crossbeam_channel::Receiver;
use thiserror::Error;

pub use crate::pipeline::{DiscreteFeedbackKind, PatternDescriptor};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartTime {
    Immediate,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no haptic output device available")]
    NoDevice,
    #[error("haptic output device is busy or misconfigured: {0}")]
    Busy(String),
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum PatternError {
    #[error("engine is not running")]
    EngineNotRunning,
    #[error("{field} = {value} is not a playable value")]
    InvalidParameter { field: &'static str, value: f32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("player was already started")]
    AlreadyStarted,
    #[error("playback queue is full")]
    QueueFull,
    #[error("haptic engine has shut down")]
    Disconnected,
    #[error("haptic engine is not running")]
    NotRunning,
}

pub trait HapticPlayer {
    fn id(&self) -> PlayerId;
    fn start(&mut self, at: StartTime) -> Result<(), PlaybackError>;
}

pub trait PlatformHapticEngine {
    type Player: HapticPlayer;

    fn start(&mut self) -> Result<(), EngineError>;
    fn make_player(&mut self, pattern: &PatternDescriptor) -> Result<Self::Player, PatternError>;

    /// Ids of players whose playback ran to completion, in the order they
    /// finished.
    fn completions(&self) -> &Receiver<PlayerId>;
}

// Optional capability: only some platforms have pre-tuned semantic effects.
// Fire-and-forget, but an effect that can't be played right now is refused
// instead of held back.
pub trait PlatformSemanticFeedback {
    fn trigger(&self, kind: DiscreteFeedbackKind) -> Result<(), PlaybackError>;
}

// What the UI thread sends down to the audio thread.
#[derive(Clone, Debug)]
pub enum HapticCommand {
    Play { id: PlayerId, pattern: PatternDescriptor },
    Discrete(DiscreteFeedbackKind),
}
