// Types shared by the TUI and the controller.
//
// Keys (resolved in tui/input.rs):
//   Up / Down      //  move the slider cursor (TUI only)
//   Left / Right   //  AdjustParam(selected, -step / +step)
//   - / =          //  same as Left / Right
//   Home / End     //  SetParam(selected, min / max)
//   1..9, 0        //  SelectPreset(0..8, 9)
//   Space / Enter  //  PlayPress
//   i              //  toggle the info popover (TUI only)
//   r              //  Prepare (retry the haptic engine)
//   Esc / q        //  Quit
//
// The controller owns every value; each frame the TUI asks for a
// `DisplayState` and just draws it.

use crate::haptics::DeviceState;
use crate::pipeline::ParamField;

pub const NUM_SLIDERS: usize = ParamField::ALL.len();

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PlayPress,
    Prepare,
    SelectPreset(u8), // index into the active catalog
    AdjustParam(ParamField, f32), // relative change
    SetParam(ParamField, f32), // absolute, clamped by the controller
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderState {
    pub field: ParamField,
    pub value: f32,
    pub min: f32,
    pub max: f32,
}

impl SliderState {
    // 0..1 position of the handle
    pub fn ratio(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        (((self.value - self.min) / span) as f64).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug)]
pub struct DisplayState {
    pub sliders: [SliderState; NUM_SLIDERS],
    pub catalog_title: &'static str, // "Presets" or "Feedback"
    pub catalog: Vec<&'static str>,
    pub selected_preset: Option<usize>,
    pub device_state: DeviceState,
    pub status: String, // latest diagnostic, one line
}
