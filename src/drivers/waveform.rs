//! Square wave synthesis for the tach and speedometer outputs
//!
//! Each output toggles every `setpoint` waveform ticks, so its frequency is
//! `WAVE_TICK_HZ / (2 * setpoint)`. The setpoint is only sampled when the
//! countdown expires; a new value takes effect at the next edge.

use embedded_hal::digital::v2::OutputPin;

use crate::config::OUTPUT_DISABLED;
use crate::shared::SharedCell;
use crate::state::OutputSetpoints;

pub struct SquareWave<P> {
    pin: P,
    remaining: u16,
    high: bool,
}

impl<P: OutputPin> SquareWave<P> {
    /// Takes ownership of a pin that is already driven low.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            remaining: 0,
            high: false,
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    /// Advance one waveform tick.
    ///
    /// While the setpoint holds [`OUTPUT_DISABLED`] the countdown stays
    /// expired and the pin keeps its level.
    pub fn tick(&mut self, setpoint: &SharedCell<u16>) -> Result<(), P::Error> {
        if self.remaining == 0 {
            let half_period = setpoint.load();
            if half_period == OUTPUT_DISABLED {
                return Ok(());
            }

            self.high = !self.high;
            if self.high {
                self.pin.set_high()?;
            } else {
                self.pin.set_low()?;
            }
            self.remaining = half_period.max(1);
        }

        self.remaining -= 1;
        Ok(())
    }
}

/// Both frequency outputs, driven from the Timer0 overflow handler.
pub struct WaveformGenerator<T, S> {
    pub tach: SquareWave<T>,
    pub speedo: SquareWave<S>,
}

impl<T, S, E> WaveformGenerator<T, S>
where
    T: OutputPin<Error = E>,
    S: OutputPin<Error = E>,
{
    pub fn new(tach: T, speedo: S) -> Self {
        Self {
            tach: SquareWave::new(tach),
            speedo: SquareWave::new(speedo),
        }
    }

    pub fn tick(&mut self, setpoints: &OutputSetpoints) -> Result<(), E> {
        let tach = self.tach.tick(&setpoints.tach);
        let speedo = self.speedo.tick(&setpoints.speedo);
        tach.and(speedo)
    }
}
