//! Output drivers, hardware initialisation, and raw pin wrappers.

pub mod hw_init;
pub mod status_led;
