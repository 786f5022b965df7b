//! Windowed pulse-rate measurement
//!
//! The measurement time base ticks at ~30.5 Hz. Each channel is drained
//! every `WINDOW_DIVIDER` ticks; the speedometer channel is offset by
//! `SPEEDO_WINDOW_PHASE` ticks so the two drains fall on different passes.

use crate::config::{SPEEDO_PULSE_SCALE, SPEEDO_WINDOW_PHASE, TACH_PULSE_SCALE, WINDOW_DIVIDER};
use crate::drivers::pulse_counter::PulseCounter;
use crate::state::MeasuredState;

/// Decimates the time base tick down to one window boundary every `period`
/// ticks.
#[derive(Debug, Clone, Copy)]
pub struct WindowDivider {
    count: u8,
    period: u8,
}

impl WindowDivider {
    /// `phase` ticks are skipped before the first boundary.
    pub const fn new(period: u8, phase: u8) -> Self {
        let period = if period == 0 { 1 } else { period };
        Self {
            count: (period - phase % period) % period,
            period,
        }
    }

    /// Advance one tick; true when a window closes on this tick.
    #[inline]
    pub fn tick(&mut self) -> bool {
        let boundary = self.count == 0;
        self.count += 1;
        if self.count >= self.period {
            self.count = 0;
        }
        boundary
    }
}

/// Converts a windowed pulse count into a physical rate.
#[derive(Debug, Clone, Copy)]
pub struct PulseScale {
    numerator: u32,
    denominator: u32,
}

impl PulseScale {
    pub const fn new((numerator, denominator): (u32, u32)) -> Self {
        Self {
            numerator,
            denominator: if denominator == 0 { 1 } else { denominator },
        }
    }

    #[inline]
    pub fn apply(&self, pulses: u16) -> u32 {
        pulses as u32 * self.numerator / self.denominator
    }
}

pub struct RateEstimator {
    tach_window: WindowDivider,
    speedo_window: WindowDivider,
    tach_scale: PulseScale,
    speedo_scale: PulseScale,
}

impl RateEstimator {
    pub const fn new() -> Self {
        Self {
            tach_window: WindowDivider::new(WINDOW_DIVIDER, 0),
            speedo_window: WindowDivider::new(WINDOW_DIVIDER, SPEEDO_WINDOW_PHASE),
            tach_scale: PulseScale::new(TACH_PULSE_SCALE),
            speedo_scale: PulseScale::new(SPEEDO_PULSE_SCALE),
        }
    }

    /// Handle one time base tick. Called from the Timer2 overflow handler.
    pub fn on_tick(&mut self, tach: &PulseCounter, speedo: &PulseCounter, measured: &MeasuredState) {
        if self.tach_window.tick() {
            let rpm = self.tach_scale.apply(tach.drain());
            measured.rpm.store(u16::try_from(rpm).unwrap_or(u16::MAX));
        }

        if self.speedo_window.tick() {
            let speed = self.speedo_scale.apply(speedo.drain());
            measured.speed.store(u8::try_from(speed).unwrap_or(u8::MAX));
        }
    }
}

impl Default for RateEstimator {
    fn default() -> Self {
        Self::new()
    }
}
