use crossbeam_channel::Sender;

use crate::haptic_api::{HapticCommand, PlayerId};

use super::feedback;
use super::voice::{Voice, VoiceShape};

const MAX_VOICES: usize = 16; // hard cap so we wont malloc in audio callback

#[derive(Clone, Copy, Debug)]
pub struct EngineSettings {
    pub carrier_hz: (f32, f32),
    pub output_gain: f32,
}

// Lives on the audio thread; only reachable through HapticCommand.
pub struct Engine {
    sample_rate: f32,
    settings: EngineSettings,
    voices: [Voice; MAX_VOICES], // fixed pool of voices
    done_tx: Sender<PlayerId>,
}

impl Engine {
    pub fn new(sample_rate: f32, settings: EngineSettings, done_tx: Sender<PlayerId>) -> Self {
        Self {
            sample_rate,
            settings,
            voices: [Voice::SILENT; MAX_VOICES],
            done_tx,
        }
    }

    pub fn handle_cmd(&mut self, cmd: HapticCommand) {
        match cmd {
            HapticCommand::Play { id, pattern } => self.spawn(&VoiceShape::from(&pattern), Some(id)),
            HapticCommand::Discrete(kind) => {
                for tap in feedback::taps(kind) {
                    self.spawn(&tap.shape(), None);
                }
            }
        }
    }

    fn spawn(&mut self, shape: &VoiceShape, owner: Option<PlayerId>) {
        let voice = Voice::new(shape, self.sample_rate, self.settings.carrier_hz, owner);
        if voice.length() == 0 {
            // nothing to render, but whoever started it still gets told it's over
            self.finished(owner);
            return;
        }

        // what slot do we write to?
        let slot = self.voices.iter().position(|v| !v.active).unwrap_or(0);
        let evicted = self.voices[slot];
        if evicted.active {
            self.finished(evicted.owner);
        }
        self.voices[slot] = voice;
    }

    fn finished(&self, owner: Option<PlayerId>) {
        if let Some(id) = owner {
            let _ = self.done_tx.try_send(id);
        }
    }

    pub fn next_sample(&mut self) -> f32 {
        let mut out = 0.0f32;
        for i in 0..MAX_VOICES {
            let v = &mut self.voices[i];
            if !v.active {
                continue;
            }
            out += v.next_sample();
            if !v.active {
                let owner = v.owner;
                self.finished(owner);
            }
        }
        (out * self.settings.output_gain).clamp(-1.0, 1.0)
    }

    // same signal on every channel
    pub fn render_block(&mut self, data: &mut [f32], channels: usize) {
        for frame in data.chunks_mut(channels.max(1)) {
            let s = self.next_sample();
            for sample in frame.iter_mut() {
                *sample = s;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haptic_api::{DiscreteFeedbackKind, PatternDescriptor};
    use crossbeam_channel::Receiver;

    const SR: f32 = 1000.0;

    fn engine() -> (Engine, Receiver<PlayerId>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let settings = EngineSettings { carrier_hz: (40.0, 250.0), output_gain: 1.0 };
        (Engine::new(SR, settings, tx), rx)
    }

    fn pattern(duration: f32) -> PatternDescriptor {
        PatternDescriptor {
            intensity: 1.0,
            sharpness: 1.0,
            attack_time: 0.0,
            release_time: 0.0,
            relative_time: 0.0,
            duration,
        }
    }

    #[test]
    fn completion_is_sent_when_the_duration_elapses() {
        let (mut e, done) = engine();
        e.handle_cmd(HapticCommand::Play { id: PlayerId(7), pattern: pattern(0.1) });
        for _ in 0..99 {
            e.next_sample();
        }
        assert!(done.try_recv().is_err());
        e.next_sample();
        assert_eq!(done.try_recv(), Ok(PlayerId(7)));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let (mut e, done) = engine();
        e.handle_cmd(HapticCommand::Play { id: PlayerId(1), pattern: pattern(0.0) });
        assert_eq!(done.try_recv(), Ok(PlayerId(1)));
        assert_eq!(e.next_sample(), 0.0);
    }

    #[test]
    fn discrete_taps_never_report_completion() {
        let (mut e, done) = engine();
        e.handle_cmd(HapticCommand::Discrete(DiscreteFeedbackKind::Error));
        let mut heard = false;
        for _ in 0..1000 {
            heard |= e.next_sample() != 0.0;
        }
        assert!(heard);
        assert!(done.try_recv().is_err());
    }

    #[test]
    fn render_block_fills_every_channel() {
        let (mut e, _done) = engine();
        e.handle_cmd(HapticCommand::Play { id: PlayerId(0), pattern: pattern(1.0) });
        let mut data = vec![0.0f32; 64];
        e.render_block(&mut data, 2);
        for frame in data.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
        assert!(data.iter().any(|s| *s != 0.0));
    }

    #[test]
    fn evicted_player_is_reported_finished() {
        let (mut e, done) = engine();
        e.handle_cmd(HapticCommand::Play { id: PlayerId(0), pattern: pattern(3.0) });
        for _ in 0..MAX_VOICES {
            e.handle_cmd(HapticCommand::Discrete(DiscreteFeedbackKind::Start));
        }
        assert_eq!(done.try_recv(), Ok(PlayerId(0)));
    }
}
