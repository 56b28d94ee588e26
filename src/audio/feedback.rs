// Pre-tuned semantic effects. Each kind is a short, fixed run of taps that
// the engine schedules all at once when the kind is triggered.
// Adding a kind = adding a row here.

use crate::haptic_api::DiscreteFeedbackKind;

use super::voice::VoiceShape;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tap {
    pub at: f32, // seconds after the trigger
    pub duration: f32,
    pub intensity: f32,
    pub sharpness: f32,
}

// fast edges so taps feel crisp instead of swelling
const TAP_EDGE: f32 = 0.005;

const fn tap(at: f32, duration: f32, intensity: f32, sharpness: f32) -> Tap {
    Tap { at, duration, intensity, sharpness }
}

impl Tap {
    pub fn shape(&self) -> VoiceShape {
        VoiceShape {
            delay: self.at,
            duration: self.duration,
            intensity: self.intensity,
            sharpness: self.sharpness,
            attack: TAP_EDGE,
            release: TAP_EDGE,
        }
    }
}

pub fn taps(kind: DiscreteFeedbackKind) -> &'static [Tap] {
    match kind {
        DiscreteFeedbackKind::Start => const { &[tap(0.0, 0.06, 0.7, 0.6)] },
        DiscreteFeedbackKind::Stop => const { &[tap(0.0, 0.08, 0.6, 0.3)] },
        DiscreteFeedbackKind::Alignment => const { &[tap(0.0, 0.02, 0.5, 1.0)] },
        DiscreteFeedbackKind::Decrease => const { &[tap(0.0, 0.04, 0.6, 0.4), tap(0.08, 0.04, 0.4, 0.3)] },
        DiscreteFeedbackKind::Increase => const { &[tap(0.0, 0.04, 0.4, 0.3), tap(0.08, 0.04, 0.6, 0.5)] },
        DiscreteFeedbackKind::LevelChange => const { &[tap(0.0, 0.05, 0.8, 0.7)] },
        DiscreteFeedbackKind::Selection => const { &[tap(0.0, 0.015, 0.4, 0.9)] },
        DiscreteFeedbackKind::Success => const { &[tap(0.0, 0.05, 0.6, 0.5), tap(0.12, 0.07, 0.9, 0.7)] },
        DiscreteFeedbackKind::Warning => const { &[tap(0.0, 0.08, 0.9, 0.4), tap(0.16, 0.08, 0.6, 0.4)] },
        DiscreteFeedbackKind::Error => const {
            &[
                tap(0.0, 0.06, 1.0, 0.8),
                tap(0.1, 0.06, 1.0, 0.8),
                tap(0.2, 0.06, 1.0, 0.8),
            ]
        },
    }
}
