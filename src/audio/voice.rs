use crate::haptic_api::{PatternDescriptor, PlayerId};

// Everything the engine needs to schedule one burst, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoiceShape {
    pub delay: f32,
    pub duration: f32,
    pub intensity: f32,
    pub sharpness: f32,
    pub attack: f32,
    pub release: f32,
}

impl From<&PatternDescriptor> for VoiceShape {
    fn from(p: &PatternDescriptor) -> Self {
        Self {
            delay: p.relative_time,
            duration: p.duration,
            intensity: p.intensity,
            sharpness: p.sharpness,
            attack: p.attack_time,
            release: p.release_time,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Voice {
    phase: f32,
    phase_inc: f32,
    amp: f32,
    delay: usize, // frames left before the burst starts
    pos: usize,
    length: usize,
    attack: usize,
    release: usize,
    pub owner: Option<PlayerId>, // None for semantic taps, nobody waits on those
    pub active: bool,
}

impl Voice {
    pub const SILENT: Voice = Voice {
        phase: 0.0,
        phase_inc: 0.0,
        amp: 0.0,
        delay: 0,
        pos: 0,
        length: 0,
        attack: 0,
        release: 0,
        owner: None,
        active: false,
    };

    pub fn new(shape: &VoiceShape, sample_rate: f32, carrier_hz: (f32, f32), owner: Option<PlayerId>) -> Self {
        let frames = |secs: f32| (secs.max(0.0) * sample_rate).round() as usize;
        let length = frames(shape.duration);
        let mut attack = frames(shape.attack);
        let mut release = frames(shape.release);

        // attack and release share the duration when they don't both fit
        let edges = attack + release;
        if edges > length {
            attack = attack * length / edges;
            release = release * length / edges;
        }

        let sharpness = shape.sharpness.clamp(0.0, 1.0);
        let freq = carrier_hz.0 + (carrier_hz.1 - carrier_hz.0) * sharpness;

        Self {
            phase: 0.0,
            phase_inc: std::f32::consts::TAU * freq / sample_rate,
            amp: shape.intensity.clamp(0.0, 1.0),
            delay: frames(shape.delay),
            pos: 0,
            length,
            attack,
            release,
            owner,
            active: true,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    fn envelope(&self) -> f32 {
        let mut gain = 1.0f32;
        if self.attack > 0 && self.pos < self.attack {
            gain = gain.min(self.pos as f32 / self.attack as f32);
        }
        let release_start = self.length - self.release;
        if self.release > 0 && self.pos >= release_start {
            gain = gain.min((self.length - self.pos) as f32 / self.release as f32);
        }
        gain
    }

    /// Next mono sample. Flips `active` off once the burst is over.
    pub fn next_sample(&mut self) -> f32 {
        if !self.active {
            return 0.0;
        }
        if self.delay > 0 {
            self.delay -= 1;
            return 0.0;
        }
        if self.pos >= self.length {
            self.active = false;
            return 0.0;
        }

        let out = self.amp * self.envelope() * self.phase.sin();
        self.phase += self.phase_inc;
        if self.phase > std::f32::consts::TAU {
            self.phase -= std::f32::consts::TAU;
        }
        self.pos += 1;
        if self.pos >= self.length {
            self.active = false;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 1000.0;
    const CARRIER: (f32, f32) = (40.0, 250.0);

    fn shape(duration: f32, attack: f32, release: f32) -> VoiceShape {
        VoiceShape {
            delay: 0.0,
            duration,
            intensity: 1.0,
            sharpness: 0.5,
            attack,
            release,
        }
    }

    #[test]
    fn runs_for_exactly_its_duration() {
        let mut v = Voice::new(&shape(0.25, 0.0, 0.0), SR, CARRIER, None);
        assert_eq!(v.length(), 250);
        let mut frames = 0;
        while v.active {
            v.next_sample();
            frames += 1;
        }
        assert_eq!(frames, 250);
    }

    #[test]
    fn envelope_starts_silent_and_peaks_after_attack() {
        let mut v = Voice::new(&shape(1.0, 0.1, 0.1), SR, CARRIER, None);
        assert_eq!(v.envelope(), 0.0);
        for _ in 0..100 {
            v.next_sample();
        }
        assert_eq!(v.envelope(), 1.0);
        for _ in 0..850 {
            v.next_sample();
        }
        assert!(v.envelope() < 1.0);
    }

    #[test]
    fn edges_are_squeezed_into_short_durations() {
        let v = Voice::new(&shape(0.1, 1.0, 1.0), SR, CARRIER, None);
        assert!(v.attack + v.release <= v.length);
    }

    #[test]
    fn output_never_exceeds_intensity() {
        let mut s = shape(0.5, 0.05, 0.05);
        s.intensity = 0.4;
        let mut v = Voice::new(&s, SR, CARRIER, None);
        while v.active {
            assert!(v.next_sample().abs() <= 0.4 + 1e-6);
        }
    }

    #[test]
    fn delay_is_silent() {
        let mut s = shape(0.1, 0.0, 0.0);
        s.delay = 0.05;
        let mut v = Voice::new(&s, SR, CARRIER, None);
        for _ in 0..50 {
            assert_eq!(v.next_sample(), 0.0);
        }
        assert!(v.active);
    }

    #[test]
    fn sharpness_picks_the_carrier() {
        let mut s = shape(0.1, 0.0, 0.0);
        s.sharpness = 0.0;
        let low = Voice::new(&s, SR, CARRIER, None);
        s.sharpness = 1.0;
        let high = Voice::new(&s, SR, CARRIER, None);
        assert!((low.phase_inc - std::f32::consts::TAU * 40.0 / SR).abs() < 1e-6);
        assert!((high.phase_inc - std::f32::consts::TAU * 250.0 / SR).abs() < 1e-6);
    }
}
