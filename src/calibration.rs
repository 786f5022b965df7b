//! Fixed calibration tables and piecewise-linear interpolation
//!
//! A [`CalibrationTable`] is an ordered list of `(breakpoint, output)` pairs.
//! Breakpoints must be strictly monotonic but may run in either direction;
//! the coolant sender table, for example, is indexed by a falling ADC value.
//! Outputs may rise or fall freely.

/// Ordered breakpoint table used for linear interpolation
#[derive(Debug, Clone, Copy)]
pub struct CalibrationTable<X: 'static, Y: 'static> {
    points: &'static [(X, Y)],
}

impl<X, Y> CalibrationTable<X, Y>
where
    X: Copy + PartialOrd + Into<u32>,
    Y: Copy + Into<u32> + TryFrom<u32>,
{
    /// Wrap a static breakpoint list. Tables need at least one segment.
    pub const fn new(points: &'static [(X, Y)]) -> Self {
        assert!(points.len() >= 2, "calibration table needs two breakpoints");
        Self { points }
    }

    pub fn points(&self) -> &'static [(X, Y)] {
        self.points
    }

    pub fn first(&self) -> (X, Y) {
        self.points[0]
    }

    pub fn last(&self) -> (X, Y) {
        self.points[self.points.len() - 1]
    }

    fn ascending(&self) -> bool {
        self.first().0 < self.last().0
    }

    /// Limit `x` to the range spanned by the breakpoints.
    pub fn clamp(&self, x: X) -> X {
        let (lo, hi) = if self.ascending() {
            (self.first().0, self.last().0)
        } else {
            (self.last().0, self.first().0)
        };

        if x < lo {
            lo
        } else if x > hi {
            hi
        } else {
            x
        }
    }

    /// Interpolate between the two breakpoints bracketing `x`.
    ///
    /// Returns `None` when `x` lies outside the table. A value exactly on a
    /// breakpoint reproduces that breakpoint's output.
    pub fn interpolate(&self, x: X) -> Option<Y> {
        let x: u32 = x.into();

        for segment in self.points.windows(2) {
            let (x0, y0) = segment[0];
            let (x1, y1) = segment[1];
            let (x0, x1): (u32, u32) = (x0.into(), x1.into());

            if x < x0.min(x1) || x > x0.max(x1) {
                continue;
            }

            // Each neighbour is weighted by the distance to the other one
            let to_first = x.abs_diff(x0);
            let to_second = x1.abs_diff(x);
            let span = x1.abs_diff(x0);
            if span == 0 {
                return Some(y0);
            }

            let y0: u32 = y0.into();
            let y1: u32 = y1.into();
            let y = (y1 * to_first + y0 * to_second) / span;
            return Y::try_from(y).ok();
        }

        None
    }

    /// Clamp `x` into the table's domain, then interpolate.
    pub fn interpolate_clamped(&self, x: X) -> Y {
        self.interpolate(self.clamp(x)).unwrap_or(self.first().1)
    }

    /// True when the breakpoints run strictly in one direction.
    pub fn is_strictly_monotonic(&self) -> bool {
        let ascending = self.ascending();
        self.points.windows(2).all(|pair| {
            if ascending {
                pair[0].0 < pair[1].0
            } else {
                pair[0].0 > pair[1].0
            }
        })
    }
}

/// Breakpoints `k * step` with outputs `numerator / k`, for `k = 1..=N`.
const fn reciprocal_u16<const N: usize>(step: u16, numerator: u16) -> [(u16, u16); N] {
    let mut table = [(0u16, 0u16); N];
    let mut k = 0;
    while k < N {
        let n = (k + 1) as u16;
        table[k] = (n * step, numerator / n);
        k += 1;
    }
    table
}

const fn reciprocal_u8<const N: usize>(step: u8, numerator: u16) -> [(u8, u16); N] {
    let mut table = [(0u8, 0u16); N];
    let mut k = 0;
    while k < N {
        let n = (k + 1) as u8;
        table[k] = (n * step, numerator / n as u16);
        k += 1;
    }
    table
}

const TACH_POINTS: [(u16, u16); 262] = reciprocal_u16(250, 960);
const SPEEDO_POINTS: [(u8, u16); 51] = reciprocal_u8(5, 1452);

/// Engine RPM to tach half-period in waveform ticks (250..=65500 RPM)
pub static TACH: CalibrationTable<u16, u16> = CalibrationTable::new(&TACH_POINTS);

/// Road speed to speedometer half-period in waveform ticks (5..=255)
pub static SPEEDO: CalibrationTable<u8, u16> = CalibrationTable::new(&SPEEDO_POINTS);

/// Fuel level percent to fuel gauge PWM compare value
pub static FUEL_GAUGE: CalibrationTable<u8, u16> = CalibrationTable::new(&[
    (0, 0x1A0),
    (25, 0x136),
    (50, 0xFE),
    (75, 0xD6),
    (100, 0xB0),
]);

/// Coolant degrees C to temperature gauge PWM compare value
pub static TEMP_GAUGE: CalibrationTable<u8, u16> = CalibrationTable::new(&[
    (50, 0x20),
    (60, 0x38),
    (70, 0x40),
    (80, 0x48),
    (90, 0x80),
    (100, 0x88),
    (110, 0x8E),
    (120, 0x96),
    (130, 0x9E),
]);

/// Coolant sender ADC sample (falling with heat) to degrees C
pub static COOLANT_SENDER: CalibrationTable<u8, u8> = CalibrationTable::new(&[
    (254, 40),
    (204, 50),
    (130, 60),
    (89, 70),
    (64, 80),
    (48, 90),
    (37, 100),
    (29, 110),
    (23, 120),
    (19, 130),
    (16, 140),
]);

/// Fuel sender ADC sample to fuel level percent
///
/// Straight line from empty to full. No sender curve has been measured for
/// this cluster; replace the breakpoints once one is.
pub static FUEL_SENDER: CalibrationTable<u8, u8> =
    CalibrationTable::new(&[(0, 0), (u8::MAX, 100)]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tables_are_strictly_monotonic() {
        assert!(TACH.is_strictly_monotonic());
        assert!(SPEEDO.is_strictly_monotonic());
        assert!(FUEL_GAUGE.is_strictly_monotonic());
        assert!(TEMP_GAUGE.is_strictly_monotonic());
        assert!(COOLANT_SENDER.is_strictly_monotonic());
        assert!(FUEL_SENDER.is_strictly_monotonic());
    }

    #[test]
    fn generated_tables_cover_expected_domain() {
        assert_eq!(TACH.first(), (250, 960));
        assert_eq!(TACH.last(), (65500, 3));
        assert_eq!(SPEEDO.first(), (5, 1452));
        assert_eq!(SPEEDO.last(), (255, 28));
    }

    #[test]
    fn breakpoints_reproduce_exactly() {
        for &(x, y) in TACH.points() {
            assert_eq!(TACH.interpolate(x), Some(y));
        }
        for &(x, y) in COOLANT_SENDER.points() {
            assert_eq!(COOLANT_SENDER.interpolate(x), Some(y));
        }
        for &(x, y) in FUEL_GAUGE.points() {
            assert_eq!(FUEL_GAUGE.interpolate(x), Some(y));
        }
    }

    #[test]
    fn interpolates_between_neighbours() {
        // 1100 RPM sits 100/250 of the way from 1000 (240) to 1250 (192)
        assert_eq!(TACH.interpolate(1100), Some(220));
        // Descending breakpoints: 100 lies between 130 (60 C) and 89 (70 C)
        assert_eq!(COOLANT_SENDER.interpolate(100), Some(67));
    }

    #[test]
    fn outside_domain_is_none_until_clamped() {
        assert_eq!(TACH.interpolate(100), None);
        assert_eq!(TACH.interpolate(u16::MAX), None);
        assert_eq!(TACH.clamp(100), 250);
        assert_eq!(TACH.clamp(u16::MAX), 65500);
        assert_eq!(TACH.interpolate_clamped(u16::MAX), 3);

        assert_eq!(COOLANT_SENDER.interpolate(10), None);
        assert_eq!(COOLANT_SENDER.clamp(10), 16);
        assert_eq!(COOLANT_SENDER.clamp(255), 254);
    }

    #[test]
    fn falling_outputs_stay_between_neighbours() {
        for level in 1..25u8 {
            let duty = FUEL_GAUGE.interpolate(level).unwrap();
            assert!(duty < 0x1A0 && duty > 0x136, "level {level} -> {duty}");
        }
    }
}
