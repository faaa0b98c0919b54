//! Application core: pure domain logic, zero I/O.
//!
//! The acquisition cycle, the posture status decision and the per-cycle
//! reading record.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod reading;
pub mod service;
pub mod status;
