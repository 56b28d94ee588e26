use std::fmt;

use log::{debug, info, warn};

use super::error::HapticError;
use crate::haptic_api::{
    DiscreteFeedbackKind, HapticPlayer, PatternDescriptor, PlatformHapticEngine,
    PlatformSemanticFeedback, PlayerId, StartTime,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceState {
    Uninitialized,
    Ready,
    Playing,
    Failed,
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceState::Uninitialized => "not ready",
            DeviceState::Ready => "ready",
            DeviceState::Playing => "playing",
            DeviceState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Drives a platform engine through its lifecycle and keeps at most one
/// continuous player alive at a time.
///
/// ```text
/// Uninitialized --prepare ok--> Ready --play--> Playing --completion--> Ready
///       |                         ^
///       +--prepare err--> Failed -+ (prepare ok)
/// ```
pub struct HapticDevice<E: PlatformHapticEngine> {
    engine: E,
    feedback: Option<Box<dyn PlatformSemanticFeedback>>,
    state: DeviceState,
    // the player has to outlive its playback on some platforms
    active: Option<E::Player>,
}

impl<E: PlatformHapticEngine> HapticDevice<E> {
    pub fn new(engine: E, feedback: Option<Box<dyn PlatformSemanticFeedback>>) -> Self {
        Self {
            engine,
            feedback,
            state: DeviceState::Uninitialized,
            active: None,
        }
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn has_semantic_feedback(&self) -> bool {
        self.feedback.is_some()
    }

    pub fn prepare(&mut self) -> Result<(), HapticError> {
        match self.state {
            DeviceState::Ready | DeviceState::Playing => Ok(()),
            DeviceState::Uninitialized | DeviceState::Failed => match self.engine.start() {
                Ok(()) => {
                    info!("haptic engine started");
                    self.transition(DeviceState::Ready);
                    Ok(())
                }
                Err(e) => {
                    warn!("failed to start haptic engine: {e}");
                    self.transition(DeviceState::Failed);
                    Err(e.into())
                }
            },
        }
    }

    /// Start `pattern` now. Only accepted from `Ready`; anything else is
    /// rejected rather than queued so pulses never overlap.
    pub fn play(&mut self, pattern: &PatternDescriptor) -> Result<PlayerId, HapticError> {
        if self.state != DeviceState::Ready {
            warn!("play rejected, device is {}", self.state);
            return Err(HapticError::PlaybackRejected(self.state));
        }

        let mut player = self.engine.make_player(pattern).map_err(|e| {
            warn!("failed to build haptic pattern: {e}");
            HapticError::from(e)
        })?;
        player.start(StartTime::Immediate).map_err(|e| {
            warn!("failed to start haptic player: {e}");
            HapticError::from(e)
        })?;

        let id = player.id();
        debug!("dispatched player {id:?} for {:.2}s", pattern.duration);
        self.active = Some(player);
        self.transition(DeviceState::Playing);
        Ok(id)
    }

    /// Fire a semantic effect. Fire-and-forget, so the lifecycle state is
    /// neither checked nor changed.
    pub fn play_discrete(&mut self, kind: DiscreteFeedbackKind) -> Result<(), HapticError> {
        match &self.feedback {
            Some(feedback) => {
                debug!("semantic feedback {kind:?}");
                feedback.trigger(kind).map_err(|e| {
                    warn!("semantic feedback {kind:?} dropped: {e}");
                    HapticError::from(e)
                })
            }
            None => {
                warn!("semantic feedback {kind:?} requested but not available");
                Err(HapticError::FeedbackUnavailable)
            }
        }
    }

    /// Drain the engine's completion notifications. Returns true if the
    /// device went back to `Ready`.
    pub fn pump_completions(&mut self) -> bool {
        let mut finished = false;
        loop {
            let Ok(id) = self.engine.completions().try_recv() else {
                break;
            };
            let is_active = self.active.as_ref().is_some_and(|p| p.id() == id);
            if is_active && self.state == DeviceState::Playing {
                debug!("player {id:?} finished");
                self.active = None;
                self.transition(DeviceState::Ready);
                finished = true;
            } else {
                debug!("ignoring completion for stale player {id:?}");
            }
        }
        finished
    }

    fn transition(&mut self, next: DeviceState) {
        if self.state != next {
            debug!("haptic device {} -> {}", self.state, next);
            self.state = next;
        }
    }
}
