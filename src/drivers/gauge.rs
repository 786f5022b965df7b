//! Measured value to gauge drive setpoint conversion
//!
//! Frequency gauges take a half-period in waveform ticks, PWM gauges take a
//! Timer1 compare value. Inputs outside a table are clamped to its ends.

use crate::calibration::{FUEL_GAUGE, FUEL_SENDER, SPEEDO, TACH, TEMP_GAUGE};
use crate::config::OUTPUT_DISABLED;

/// Tach half-period for `rpm`; zero parks the needle with no waveform.
pub fn tach_half_period(rpm: u16) -> u16 {
    if rpm == 0 {
        return OUTPUT_DISABLED;
    }
    TACH.interpolate_clamped(rpm)
}

/// Speedometer half-period for `speed`; zero disables the output.
pub fn speedo_half_period(speed: u8) -> u16 {
    if speed == 0 {
        return OUTPUT_DISABLED;
    }
    SPEEDO.interpolate_clamped(speed)
}

/// Fuel gauge compare value, `percent` clamped to 0..=100.
pub fn fuel_duty(percent: u8) -> u16 {
    FUEL_GAUGE.interpolate_clamped(percent)
}

/// Temperature gauge compare value, `degrees` clamped to 50..=130.
pub fn temp_duty(degrees: u8) -> u16 {
    TEMP_GAUGE.interpolate_clamped(degrees)
}

pub fn fuel_percent(raw: u8) -> u8 {
    FUEL_SENDER.interpolate_clamped(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rates_disable_outputs() {
        assert_eq!(tach_half_period(0), OUTPUT_DISABLED);
        assert_eq!(speedo_half_period(0), OUTPUT_DISABLED);
    }

    #[test]
    fn tach_reference_points() {
        assert_eq!(tach_half_period(1000), 240);
        assert_eq!(tach_half_period(2000), 120);
        assert_eq!(tach_half_period(1100), 220);
        // Below the first breakpoint the needle holds the 250 RPM rate
        assert_eq!(tach_half_period(1), 960);
    }

    #[test]
    fn tach_keeps_falling_past_redline() {
        assert_eq!(tach_half_period(8000), 30);
        assert_eq!(tach_half_period(9000), 26);
        assert_eq!(tach_half_period(20000), 12);
        assert_eq!(tach_half_period(u16::MAX), 3);
    }

    #[test]
    fn tach_is_non_increasing() {
        let mut previous = tach_half_period(1);
        for rpm in (1..=u16::MAX).step_by(7) {
            let half = tach_half_period(rpm);
            assert!(half <= previous, "rpm {rpm}: {half} > {previous}");
            previous = half;
        }
    }

    #[test]
    fn speedo_is_non_increasing() {
        let mut previous = speedo_half_period(1);
        for speed in 1..=u8::MAX {
            let half = speedo_half_period(speed);
            assert!(half <= previous);
            previous = half;
        }
        assert_eq!(speedo_half_period(5), 1452);
        assert_eq!(speedo_half_period(10), 726);
    }

    #[test]
    fn fuel_ends_and_midpoints() {
        assert_eq!(fuel_duty(0), 0x1A0);
        assert_eq!(fuel_duty(100), 0xB0);
        assert_eq!(fuel_duty(50), 0xFE);
        assert_eq!(fuel_duty(200), 0xB0);

        for level in 76..100u8 {
            let duty = fuel_duty(level);
            assert!(duty < 0xD6 && duty > 0xB0);
        }
    }

    #[test]
    fn temperature_is_clamped_to_gauge_range() {
        assert_eq!(temp_duty(0), 0x20);
        assert_eq!(temp_duty(50), 0x20);
        assert_eq!(temp_duty(95), (0x88 * 5 + 0x80 * 5) / 10);
        assert_eq!(temp_duty(130), 0x9E);
        assert_eq!(temp_duty(200), 0x9E);
    }

    #[test]
    fn fuel_sender_spans_full_scale() {
        assert_eq!(fuel_percent(0), 0);
        assert_eq!(fuel_percent(255), 100);
        assert_eq!(fuel_percent(50), 19);
    }
}
