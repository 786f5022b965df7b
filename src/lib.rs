//! Instrument cluster signal synthesis
//!
//! Reads wheel speed and crank pulses, the coolant and fuel senders and the
//! oil pressure switch, and drives the gauges an OEM cluster expects: two
//! square-wave frequency outputs, two PWM outputs and the oil lamp.
//!
//! Everything in this library is hardware-independent and runs on the host
//! under `cargo test`. The AVR binary (`main.rs`) supplies the register-level
//! HAL and the interrupt handlers that feed it.

#![cfg_attr(not(test), no_std)]

pub mod application;
pub mod calibration;
pub mod config;
pub mod drivers;
pub mod error;
pub mod shared;
pub mod state;

pub use application::Cluster;
pub use error::Error;
pub use state::{MeasuredState, Measurements, OutputSetpoints};
