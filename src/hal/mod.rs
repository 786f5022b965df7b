pub mod adc;
pub mod exint;
pub mod gpio;
pub mod pwm;
pub mod timer;
pub mod uart;

pub use adc::Adc;
pub use gpio::board;
pub use timer::{WaveTimer, WindowTimer};
pub use uart::Uart;
