// Desktop stand-in for a haptic actuator: effects are rendered as a low
// frequency signal on the default audio output (bass shaker, transducer,
// or just headphones while tuning).
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info, warn};

use crate::config::Config;
use crate::haptic_api::{
    DiscreteFeedbackKind, EngineError, HapticCommand, HapticPlayer, PatternDescriptor,
    PatternError, PlatformHapticEngine, PlatformSemanticFeedback, PlaybackError, PlayerId,
    StartTime,
};
use crate::pipeline::ParamField;

mod engine;
mod feedback;
mod voice;

use engine::{Engine, EngineSettings};

pub struct CpalHapticEngine {
    settings: EngineSettings,
    tx: Sender<HapticCommand>,
    rx: Receiver<HapticCommand>,
    done_tx: Sender<PlayerId>,
    done_rx: Receiver<PlayerId>,
    stream: Option<cpal::Stream>, // None until start() succeeds
    running: Arc<AtomicBool>, // shared with the semantic feedback handle
    next_id: u64,
}

impl CpalHapticEngine {
    pub fn new(config: &Config) -> Self {
        let (tx, rx) = crossbeam_channel::bounded::<HapticCommand>(64);
        let (done_tx, done_rx) = crossbeam_channel::bounded::<PlayerId>(64);
        Self {
            settings: EngineSettings {
                carrier_hz: (config.carrier_min_hz, config.carrier_max_hz),
                output_gain: config.output_gain,
            },
            tx,
            rx,
            done_tx,
            done_rx,
            stream: None,
            running: Arc::new(AtomicBool::new(false)),
            next_id: 0,
        }
    }

    // Semantic effects go down the same command queue as continuous ones.
    pub fn semantic_feedback(&self) -> CpalSemanticFeedback {
        CpalSemanticFeedback {
            tx: self.tx.clone(),
            running: self.running.clone(),
        }
    }
}

impl PlatformHapticEngine for CpalHapticEngine {
    type Player = CpalPlayer;

    fn start(&mut self) -> Result<(), EngineError> {
        if self.stream.is_some() {
            return Ok(());
        }
        // nothing queued before the stream existed should play late
        let stale = self.rx.try_iter().count();
        if stale > 0 {
            warn!("discarding {stale} haptic command(s) queued while stopped");
        }
        let stream = open_output_stream(self.settings, self.rx.clone(), self.done_tx.clone())?;
        self.stream = Some(stream);
        self.running.store(true, Ordering::Release);
        Ok(())
    }

    fn make_player(&mut self, pattern: &PatternDescriptor) -> Result<CpalPlayer, PatternError> {
        if self.stream.is_none() {
            return Err(PatternError::EngineNotRunning);
        }
        check_pattern(pattern)?;
        let id = PlayerId(self.next_id);
        self.next_id += 1;
        Ok(CpalPlayer {
            id,
            pattern: *pattern,
            tx: self.tx.clone(),
            started: false,
        })
    }

    fn completions(&self) -> &Receiver<PlayerId> {
        &self.done_rx
    }
}

// Hand-written descriptors can be out of range; built ones never are.
fn check_pattern(p: &PatternDescriptor) -> Result<(), PatternError> {
    let fields = [
        (ParamField::Duration, p.duration),
        (ParamField::Intensity, p.intensity),
        (ParamField::Sharpness, p.sharpness),
        (ParamField::AttackTime, p.attack_time),
        (ParamField::ReleaseTime, p.release_time),
    ];
    for (field, value) in fields {
        if !field.range().contains(&value) {
            return Err(PatternError::InvalidParameter { field: field.label(), value });
        }
    }
    if p.relative_time != 0.0 {
        return Err(PatternError::InvalidParameter { field: "Relative Time", value: p.relative_time });
    }
    Ok(())
}

pub struct CpalPlayer {
    id: PlayerId,
    pattern: PatternDescriptor,
    tx: Sender<HapticCommand>,
    started: bool,
}

impl HapticPlayer for CpalPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn start(&mut self, at: StartTime) -> Result<(), PlaybackError> {
        if self.started {
            return Err(PlaybackError::AlreadyStarted);
        }
        match at {
            StartTime::Immediate => {}
        }
        self.tx
            .try_send(HapticCommand::Play { id: self.id, pattern: self.pattern })
            .map_err(|e| {
                if e.is_full() {
                    PlaybackError::QueueFull
                } else {
                    PlaybackError::Disconnected
                }
            })?;
        self.started = true;
        Ok(())
    }
}

pub struct CpalSemanticFeedback {
    tx: Sender<HapticCommand>,
    running: Arc<AtomicBool>,
}

impl PlatformSemanticFeedback for CpalSemanticFeedback {
    fn trigger(&self, kind: DiscreteFeedbackKind) -> Result<(), PlaybackError> {
        if !self.running.load(Ordering::Acquire) {
            return Err(PlaybackError::NotRunning);
        }
        self.tx.try_send(HapticCommand::Discrete(kind)).map_err(|e| {
            if e.is_full() {
                PlaybackError::QueueFull
            } else {
                PlaybackError::Disconnected
            }
        })
    }
}

// ── Output stream ─────────────────────────────────────────────────

fn open_output_stream(
    settings: EngineSettings,
    rx: Receiver<HapticCommand>,
    done_tx: Sender<PlayerId>,
) -> Result<cpal::Stream, EngineError> {
    let host = cpal::default_host();
    let device = host.default_output_device().ok_or(EngineError::NoDevice)?;
    let supported = device
        .default_output_config()
        .map_err(|e| EngineError::Busy(e.to_string()))?;

    if supported.sample_format() != cpal::SampleFormat::F32 {
        // only f32 supported for now
        return Err(EngineError::UnsupportedFormat(format!("{:?}", supported.sample_format())));
    }

    let channels = supported.channels() as usize;
    let sample_rate = supported.sample_rate() as f32;
    let config: cpal::StreamConfig = supported.into();

    let mut engine = Engine::new(sample_rate, settings, done_tx);
    let err_fn = |err| error!("haptic output stream error: {err}");

    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [f32], _info| {
                while let Ok(cmd) = rx.try_recv() { // set up command handling
                    engine.handle_cmd(cmd);
                }
                engine.render_block(data, channels);
            },
            err_fn,
            None,
        )
        .map_err(|e| EngineError::Busy(e.to_string()))?;

    stream.play().map_err(|e| EngineError::Busy(e.to_string()))?;
    info!("haptic output on {channels} channel(s) at {sample_rate} Hz");
    Ok(stream)
}
