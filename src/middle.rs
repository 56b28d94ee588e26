// The controller: owns the slider values, the catalog and the device, and
// turns semantic input events into parameter edits or playback.

use crossbeam_channel::{Receiver, Sender};
use log::{info, warn};

use crate::haptic_api::PlatformHapticEngine;
use crate::haptics::{DeviceState, HapticDevice, HapticError};
use crate::pipeline::{pattern, Catalog, CatalogEntry, ParamField, ParameterSet};
use crate::shared::{DisplayState, InputEvent, SliderState};

/// Pushed to every subscriber whenever something the UI shows changes.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    ParamsChanged(ParameterSet),
    PresetSelected(usize),
    DeviceState(DeviceState),
    Diagnostic(String),
}

pub struct Controller<E: PlatformHapticEngine> {
    params: ParameterSet,
    catalog: Catalog,
    device: HapticDevice<E>,
    selected_preset: Option<usize>,
    status: String,
    listeners: Vec<Sender<Notification>>,
}

impl<E: PlatformHapticEngine> Controller<E> {
    /// Takes the device unprepared and tries to bring it up once; a failure
    /// is reported but the controller is usable regardless.
    pub fn new(device: HapticDevice<E>, catalog: Catalog) -> Self {
        if catalog.is_empty() {
            warn!("preset catalog is empty");
        }
        let mut controller = Self {
            params: ParameterSet::default(),
            catalog,
            device,
            selected_preset: None,
            status: String::new(),
            listeners: Vec::new(),
        };
        let _ = controller.prepare();
        controller
    }

    pub fn subscribe(&mut self) -> Receiver<Notification> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.listeners.push(tx);
        rx
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn device_state(&self) -> DeviceState {
        self.device.state()
    }

    pub fn set_param(&mut self, field: ParamField, value: f32) {
        if self.params.set(field, value) {
            self.notify(Notification::ParamsChanged(self.params));
        }
    }

    pub fn nudge_param(&mut self, field: ParamField, delta: f32) {
        if self.params.nudge(field, delta) {
            self.notify(Notification::ParamsChanged(self.params));
        }
    }

    /// Curve presets overwrite the sliders; semantic kinds fire right away.
    pub fn select_preset(&mut self, index: usize) -> Result<(), HapticError> {
        match self.catalog.entry(index) {
            Some(CatalogEntry::Curve(preset)) => {
                info!("applying preset {} ({})", preset.name, preset.id);
                self.params.apply_preset(preset);
                self.selected_preset = Some(index);
                self.notify(Notification::PresetSelected(index));
                self.notify(Notification::ParamsChanged(self.params));
                Ok(())
            }
            // semantic kinds are momentary, the highlight stays on the last curve
            Some(CatalogEntry::Discrete(kind)) => {
                let result = self.device.play_discrete(kind);
                match &result {
                    Ok(()) => self.set_status(format!("{} fired", kind.name())),
                    Err(e) => self.report(e),
                }
                result
            }
            None => Ok(()), // key past the end of a short catalog
        }
    }

    pub fn play_requested(&mut self) -> Result<(), HapticError> {
        let descriptor = pattern::build(&self.params);
        let result = self.device.play(&descriptor).map(|_| ());
        match &result {
            Ok(()) => self.set_status(format!("playing {:.2?}", descriptor.duration())),
            Err(HapticError::PlaybackRejected(DeviceState::Failed | DeviceState::Uninitialized)) => {
                self.set_status("haptic engine not ready, press r to retry".to_string())
            }
            Err(e) => self.report(e),
        }
        self.notify_state();
        result
    }

    pub fn prepare(&mut self) -> Result<(), HapticError> {
        let result = self.device.prepare();
        match &result {
            Ok(()) => self.set_status("ready".to_string()),
            Err(e) => self.report(e),
        }
        self.notify_state();
        result
    }

    // Called once per UI loop; picks up completions from the engine.
    pub fn tick(&mut self) {
        if self.device.pump_completions() {
            self.set_status("ready".to_string());
            self.notify_state();
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PlayPress => {
                let _ = self.play_requested();
            }
            InputEvent::Prepare => {
                let _ = self.prepare();
            }
            InputEvent::SelectPreset(n) => {
                let _ = self.select_preset(n as usize);
            }
            InputEvent::AdjustParam(field, delta) => self.nudge_param(field, delta),
            InputEvent::SetParam(field, value) => self.set_param(field, value),
            InputEvent::Quit => {}
        }
    }

    pub fn display_state(&self) -> DisplayState {
        let sliders = ParamField::ALL.map(|field| {
            let range = field.range();
            SliderState {
                field,
                value: self.params.get(field),
                min: *range.start(),
                max: *range.end(),
            }
        });
        DisplayState {
            sliders,
            catalog_title: match self.catalog {
                Catalog::Continuous(_) => "Presets",
                Catalog::Discrete(_) => "Feedback",
            },
            catalog: self.catalog.names(),
            selected_preset: self.selected_preset,
            device_state: self.device.state(),
            status: self.status.clone(),
        }
    }

    // the device has already logged it, this only surfaces it on screen
    fn report(&mut self, err: &HapticError) {
        self.set_status(err.to_string());
    }

    fn set_status(&mut self, status: String) {
        self.notify(Notification::Diagnostic(status.clone()));
        self.status = status;
    }

    fn notify_state(&mut self) {
        self.notify(Notification::DeviceState(self.device.state()));
    }

    fn notify(&mut self, n: Notification) {
        // drop subscribers that went away
        self.listeners.retain(|tx| tx.send(n.clone()).is_ok());
    }
}
