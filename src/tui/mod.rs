pub mod input;
pub mod mode;
mod sliders;
pub mod view;
