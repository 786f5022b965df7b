//! Round-robin ADC sequencing for the coolant and fuel senders

use crate::calibration::COOLANT_SENDER;
use crate::config::{TEMP_FAULT_COLD, TEMP_FAULT_HOT};
use crate::state::MeasuredState;

/// ADC multiplexer inputs used by the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AnalogChannel {
    Coolant = 0,
    Fuel = 1,
}

impl AnalogChannel {
    #[inline]
    pub fn mux(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn next(self) -> Self {
        match self {
            AnalogChannel::Coolant => AnalogChannel::Fuel,
            AnalogChannel::Fuel => AnalogChannel::Coolant,
        }
    }
}

/// Convert a coolant sender sample to whole degrees C.
///
/// Samples at or above the coldest breakpoint report [`TEMP_FAULT_COLD`];
/// samples below the hottest report [`TEMP_FAULT_HOT`].
pub fn coolant_degrees(raw: u8) -> u8 {
    if raw >= COOLANT_SENDER.first().0 {
        return TEMP_FAULT_COLD;
    }
    COOLANT_SENDER.interpolate(raw).unwrap_or(TEMP_FAULT_HOT)
}

#[inline]
pub fn is_temperature_fault(degrees: u8) -> bool {
    degrees == TEMP_FAULT_COLD || degrees == TEMP_FAULT_HOT
}

/// Tracks which channel the conversion in flight belongs to.
pub struct AnalogSampler {
    channel: AnalogChannel,
}

impl AnalogSampler {
    pub const fn new() -> Self {
        Self {
            channel: AnalogChannel::Coolant,
        }
    }

    pub fn channel(&self) -> AnalogChannel {
        self.channel
    }

    /// Publish a finished 8-bit conversion and return the channel whose
    /// conversion must be started next.
    pub fn on_conversion(&mut self, raw: u8, measured: &MeasuredState) -> AnalogChannel {
        match self.channel {
            AnalogChannel::Coolant => measured.temperature.store(coolant_degrees(raw)),
            AnalogChannel::Fuel => measured.fuel_raw.store(raw),
        }
        self.channel = self.channel.next();
        self.channel
    }
}

impl Default for AnalogSampler {
    fn default() -> Self {
        Self::new()
    }
}
