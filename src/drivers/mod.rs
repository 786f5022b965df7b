pub mod analog_sampler;
pub mod gauge;
pub mod oil_gate;
pub mod pulse_counter;
pub mod rate_estimator;
pub mod serial_console;
pub mod waveform;

pub use analog_sampler::{AnalogChannel, AnalogSampler};
pub use oil_gate::OilPressureGate;
pub use pulse_counter::PulseCounter;
pub use rate_estimator::RateEstimator;
pub use serial_console::SerialConsole;
pub use waveform::{SquareWave, WaveformGenerator};
