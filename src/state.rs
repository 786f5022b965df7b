//! Values shared between the interrupt handlers and the main loop

use crate::config::OUTPUT_DISABLED;
use crate::shared::SharedCell;

/// Latest completed measurements, one producer per field:
/// rate estimator (`rpm`, `speed`) and ADC handler (`temperature`, `fuel_raw`).
pub struct MeasuredState {
    pub rpm: SharedCell<u16>,
    pub speed: SharedCell<u8>,
    pub temperature: SharedCell<u8>,
    pub fuel_raw: SharedCell<u8>,
}

/// Copy of the measured values taken by the main loop for one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Measurements {
    pub rpm: u16,
    pub speed: u8,
    pub temperature: u8,
    pub fuel_raw: u8,
    pub oil_switch: bool,
}

impl MeasuredState {
    pub const fn new() -> Self {
        Self {
            rpm: SharedCell::new(0),
            speed: SharedCell::new(0),
            temperature: SharedCell::new(0),
            fuel_raw: SharedCell::new(0),
        }
    }

    /// Read every published field under one critical section.
    ///
    /// The oil switch is not interrupt-fed; the caller fills it in.
    pub fn snapshot(&self) -> Measurements {
        critical_section::with(|cs| Measurements {
            rpm: self.rpm.get(cs),
            speed: self.speed.get(cs),
            temperature: self.temperature.get(cs),
            fuel_raw: self.fuel_raw.get(cs),
            oil_switch: false,
        })
    }
}

impl Default for MeasuredState {
    fn default() -> Self {
        Self::new()
    }
}

/// Half-period setpoints for the two frequency outputs, written by the main
/// loop and consumed by the waveform tick.
pub struct OutputSetpoints {
    pub tach: SharedCell<u16>,
    pub speedo: SharedCell<u16>,
}

impl OutputSetpoints {
    pub const fn new() -> Self {
        Self {
            tach: SharedCell::new(OUTPUT_DISABLED),
            speedo: SharedCell::new(OUTPUT_DISABLED),
        }
    }
}

impl Default for OutputSetpoints {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let measured = MeasuredState::new();
        assert_eq!(measured.snapshot(), Measurements::default());

        let setpoints = OutputSetpoints::new();
        assert_eq!(setpoints.tach.load(), OUTPUT_DISABLED);
        assert_eq!(setpoints.speedo.load(), OUTPUT_DISABLED);
    }

    #[test]
    fn snapshot_reflects_latest_values() {
        let measured = MeasuredState::new();
        measured.rpm.store(3200);
        measured.speed.store(88);
        measured.temperature.store(92);
        measured.fuel_raw.store(140);

        let snap = measured.snapshot();
        assert_eq!(snap.rpm, 3200);
        assert_eq!(snap.speed, 88);
        assert_eq!(snap.temperature, 92);
        assert_eq!(snap.fuel_raw, 140);
    }
}
