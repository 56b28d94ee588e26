// The live slider values. Everything that writes here goes through a clamp,
// so the rest of the app never has to re-check ranges.

use std::ops::RangeInclusive;

use super::presets::CurvePreset;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamField {
    Duration,
    Intensity,
    Sharpness,
    AttackTime,
    ReleaseTime,
}

impl ParamField {
    // slider order, top to bottom
    pub const ALL: [ParamField; 5] = [
        ParamField::Duration,
        ParamField::Intensity,
        ParamField::Sharpness,
        ParamField::AttackTime,
        ParamField::ReleaseTime,
    ];

    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            ParamField::Duration => 0.0..=3.0, // seconds
            _ => 0.0..=1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParamField::Duration => "Duration",
            ParamField::Intensity => "Intensity",
            ParamField::Sharpness => "Sharpness",
            ParamField::AttackTime => "Attack Time",
            ParamField::ReleaseTime => "Release Time",
        }
    }

    // text for the info popover
    pub fn description(self) -> &'static str {
        match self {
            ParamField::Duration => "Duration of the haptic feedback.",
            ParamField::Intensity => "Intensity of the haptic feedback.",
            ParamField::Sharpness => "Sharpness of the haptic feedback.",
            ParamField::AttackTime => "The time when a haptic pattern's intensity begins increasing.",
            ParamField::ReleaseTime => "The time at which to begin fading the haptic pattern.",
        }
    }

    pub fn next(self) -> Self {
        let i = self.index();
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = self.index();
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    // Clamp into range. NaN has no meaningful position in the range, so the
    // caller gets None and keeps whatever was stored before.
    fn clamp(self, value: f32) -> Option<f32> {
        if value.is_nan() {
            return None;
        }
        let range = self.range();
        Some(value.clamp(*range.start(), *range.end()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterSet {
    duration: f32,
    intensity: f32,
    sharpness: f32,
    attack_time: f32,
    release_time: f32,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            duration: 1.0,
            intensity: 1.0,
            sharpness: 1.0,
            attack_time: 0.1,
            release_time: 0.1,
        }
    }
}

impl ParameterSet {
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn sharpness(&self) -> f32 {
        self.sharpness
    }

    pub fn attack_time(&self) -> f32 {
        self.attack_time
    }

    pub fn release_time(&self) -> f32 {
        self.release_time
    }

    pub fn get(&self, field: ParamField) -> f32 {
        match field {
            ParamField::Duration => self.duration,
            ParamField::Intensity => self.intensity,
            ParamField::Sharpness => self.sharpness,
            ParamField::AttackTime => self.attack_time,
            ParamField::ReleaseTime => self.release_time,
        }
    }

    /// Store `value` clamped into the field's range. Returns true if the
    /// stored value changed.
    pub fn set(&mut self, field: ParamField, value: f32) -> bool {
        let Some(value) = field.clamp(value) else {
            return false;
        };
        let slot = match field {
            ParamField::Duration => &mut self.duration,
            ParamField::Intensity => &mut self.intensity,
            ParamField::Sharpness => &mut self.sharpness,
            ParamField::AttackTime => &mut self.attack_time,
            ParamField::ReleaseTime => &mut self.release_time,
        };
        let changed = *slot != value;
        *slot = value;
        changed
    }

    // knob-style relative change
    pub fn nudge(&mut self, field: ParamField, delta: f32) -> bool {
        self.set(field, self.get(field) + delta)
    }

    /// Overwrite intensity, sharpness, attack and release from `preset`.
    /// Duration is left alone, the preset's own duration (and its decay
    /// time) are informational only.
    pub fn apply_preset(&mut self, preset: &CurvePreset) {
        let mut next = *self;
        next.set(ParamField::Intensity, preset.intensity);
        next.set(ParamField::Sharpness, preset.sharpness);
        next.set(ParamField::AttackTime, preset.attack_time);
        next.set(ParamField::ReleaseTime, preset.release_time);
        *self = next;
    }
}
