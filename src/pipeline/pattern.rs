use std::time::Duration;

use super::params::ParameterSet;

/// One continuous haptic event, ready to hand to a playback device.
///
/// Always a single event starting at `relative_time == 0.0` and lasting
/// `duration` seconds. There is no decay phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatternDescriptor {
    pub intensity: f32,
    pub sharpness: f32,
    pub attack_time: f32,
    pub release_time: f32,
    pub relative_time: f32,
    pub duration: f32,
}

impl PatternDescriptor {
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f32(self.duration.max(0.0))
    }
}

/// Build a fresh descriptor from the current parameters. Pure and total;
/// call it on every play request instead of keeping the result around.
pub fn build(params: &ParameterSet) -> PatternDescriptor {
    PatternDescriptor {
        intensity: params.intensity(),
        sharpness: params.sharpness(),
        attack_time: params.attack_time(),
        release_time: params.release_time(),
        relative_time: 0.0,
        duration: params.duration(),
    }
}
