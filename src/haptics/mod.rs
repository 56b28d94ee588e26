mod device;
mod error;
#[cfg(test)]
pub mod test_fixture;

pub use device::{DeviceState, HapticDevice};
pub use error::HapticError;
