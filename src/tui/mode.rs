use crate::config::Config;
use crate::pipeline::ParamField;

// state local to tui: which slider the cursor is on and whether the info
// popover is open. Nothing here reaches the controller.
#[derive(Clone, Debug)]
pub struct TuiState {
    pub selected: ParamField,
    pub info_open: bool,
    // nudge sizes, from config
    pub param_step: f32,
    pub duration_step: f32,
}

impl TuiState {
    pub fn new(config: &Config) -> Self {
        Self {
            selected: ParamField::Duration,
            info_open: false,
            param_step: config.param_step,
            duration_step: config.duration_step,
        }
    }

    pub fn step_for(&self, field: ParamField) -> f32 {
        match field {
            ParamField::Duration => self.duration_step,
            _ => self.param_step,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
