// Purely for testing: a scripted engine that records what it was asked to
// play and only finishes a player when the test says so.

use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender};

use crate::haptic_api::{
    DiscreteFeedbackKind, EngineError, HapticPlayer, PatternDescriptor, PatternError,
    PlatformHapticEngine, PlatformSemanticFeedback, PlaybackError, PlayerId, StartTime,
};

#[derive(Default)]
struct Shared {
    start_calls: usize,
    played: Vec<PatternDescriptor>,
}

pub struct FakeEngine {
    shared: Arc<Mutex<Shared>>,
    done_rx: Receiver<PlayerId>,
    running: bool,
    failing_starts: usize,
    fail_patterns: bool,
    fail_dispatch: bool,
    next_id: u64,
}

// The test's handle on the engine after the device has taken ownership of it.
pub struct FakeRemote {
    shared: Arc<Mutex<Shared>>,
    done_tx: Sender<PlayerId>,
}

impl FakeEngine {
    pub fn new() -> (Self, FakeRemote) {
        let shared = Arc::new(Mutex::new(Shared::default()));
        let (done_tx, done_rx) = crossbeam_channel::unbounded();
        let engine = Self {
            shared: shared.clone(),
            done_rx,
            running: false,
            failing_starts: 0,
            fail_patterns: false,
            fail_dispatch: false,
            next_id: 0,
        };
        (engine, FakeRemote { shared, done_tx })
    }

    // the next `n` calls to start() fail
    pub fn failing_starts(mut self, n: usize) -> Self {
        self.failing_starts = n;
        self
    }

    pub fn failing_patterns(mut self) -> Self {
        self.fail_patterns = true;
        self
    }

    pub fn failing_dispatch(mut self) -> Self {
        self.fail_dispatch = true;
        self
    }
}

impl PlatformHapticEngine for FakeEngine {
    type Player = FakePlayer;

    fn start(&mut self) -> Result<(), EngineError> {
        self.shared.lock().unwrap().start_calls += 1;
        if self.failing_starts > 0 {
            self.failing_starts -= 1;
            return Err(EngineError::NoDevice);
        }
        self.running = true;
        Ok(())
    }

    fn make_player(&mut self, pattern: &PatternDescriptor) -> Result<FakePlayer, PatternError> {
        if !self.running {
            return Err(PatternError::EngineNotRunning);
        }
        if self.fail_patterns {
            return Err(PatternError::InvalidParameter {
                field: "intensity",
                value: pattern.intensity,
            });
        }
        let id = PlayerId(self.next_id);
        self.next_id += 1;
        Ok(FakePlayer {
            id,
            pattern: *pattern,
            started: false,
            fail_dispatch: self.fail_dispatch,
            shared: self.shared.clone(),
        })
    }

    fn completions(&self) -> &Receiver<PlayerId> {
        &self.done_rx
    }
}

pub struct FakePlayer {
    id: PlayerId,
    pattern: PatternDescriptor,
    started: bool,
    fail_dispatch: bool,
    shared: Arc<Mutex<Shared>>,
}

impl HapticPlayer for FakePlayer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn start(&mut self, _at: StartTime) -> Result<(), PlaybackError> {
        if self.fail_dispatch {
            return Err(PlaybackError::QueueFull);
        }
        if self.started {
            return Err(PlaybackError::AlreadyStarted);
        }
        self.started = true;
        self.shared.lock().unwrap().played.push(self.pattern);
        Ok(())
    }
}

impl FakeRemote {
    // what the platform would do once the pattern's duration elapsed
    pub fn finish(&self, id: PlayerId) {
        self.done_tx.send(id).unwrap();
    }

    pub fn played(&self) -> Vec<PatternDescriptor> {
        self.shared.lock().unwrap().played.clone()
    }

    pub fn start_calls(&self) -> usize {
        self.shared.lock().unwrap().start_calls
    }
}

#[derive(Default)]
pub struct RecordingFeedback {
    fired: Arc<Mutex<Vec<DiscreteFeedbackKind>>>,
}

impl RecordingFeedback {
    pub fn fired_handle(&self) -> Arc<Mutex<Vec<DiscreteFeedbackKind>>> {
        self.fired.clone()
    }
}

impl PlatformSemanticFeedback for RecordingFeedback {
    fn trigger(&self, kind: DiscreteFeedbackKind) -> Result<(), PlaybackError> {
        self.fired.lock().unwrap().push(kind);
        Ok(())
    }
}
