use thiserror::Error;

use super::device::DeviceState;
use crate::haptic_api::{EngineError, PatternError, PlaybackError};

/// Everything the device can report back. None of these are fatal; the
/// controller logs them and carries on.
#[derive(Debug, Error)]
pub enum HapticError {
    #[error("haptic engine unavailable: {0}")]
    EngineUnavailable(#[from] EngineError),

    #[error("could not build haptic pattern: {0}")]
    PatternConstructionFailed(#[from] PatternError),

    #[error("playback rejected, device is {0}")]
    PlaybackRejected(DeviceState),

    #[error("could not start haptic player: {0}")]
    PlaybackDispatchFailed(#[from] PlaybackError),

    #[error("semantic feedback is not available on this platform")]
    FeedbackUnavailable,
}
