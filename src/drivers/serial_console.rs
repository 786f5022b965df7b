//! Debug text output over the UART
//!
//! The line is one-way: no flow control, no acknowledgement. Every byte is
//! pushed with a blocking write, so the main loop runs no faster than the
//! line drains.

use embedded_hal::serial;
use ufmt::{uDisplay, uWrite, uwrite, Formatter};

use crate::config::{VERSION, WAVE_TICK_HZ, WINDOW_PERIOD_MS};
use crate::state::Measurements;

pub struct SerialConsole<S> {
    serial: S,
}

impl<S: serial::Write<u8>> SerialConsole<S> {
    pub fn new(serial: S) -> Self {
        Self { serial }
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), S::Error> {
        nb::block!(self.serial.write(byte))
    }

    /// Write one `rpm=..,speed=..,temp=..,fuel=..,oil=..` telemetry line.
    pub fn telemetry(&mut self, values: &Measurements) -> Result<(), S::Error> {
        uwrite!(self, "{}\r\n", *values)
    }

    /// Start-up banner, written once before interrupts are enabled.
    pub fn banner(&mut self) -> Result<(), S::Error> {
        uwrite!(self, "[INF] cluster firmware v{}\r\n", VERSION)?;
        uwrite!(
            self,
            "[INF] wave tick {} Hz, window {} ms\r\n",
            WAVE_TICK_HZ,
            WINDOW_PERIOD_MS
        )
    }

    // Print formatted debug info
    pub fn debug(&mut self, msg: &str, val: u16) -> Result<(), S::Error> {
        uwrite!(self, "[DBG] {}: {}\r\n", msg, val)
    }
}

impl<S: serial::Write<u8>> uWrite for SerialConsole<S> {
    type Error = S::Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        for byte in s.bytes() {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}

impl uDisplay for Measurements {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uwrite!(
            f,
            "rpm={},speed={},temp={},fuel={},oil={}",
            self.rpm,
            self.speed,
            self.temperature,
            self.fuel_raw,
            self.oil_switch as u8
        )
    }
}
