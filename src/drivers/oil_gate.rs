use crate::config::OIL_GATE_RPM;

/// Decides whether the oil pressure switch may light the lamp.
///
/// Low oil pressure is expected with the engine stopped or cranking, so the
/// switch is only passed through above [`OIL_GATE_RPM`]. There is no
/// hysteresis around the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OilPressureGate {
    /// Engine running: lamp mirrors the switch
    Armed,
    /// Engine stopped or idling low: lamp forced off
    Suppressed,
}

impl OilPressureGate {
    pub fn for_rpm(rpm: u16) -> Self {
        if rpm > OIL_GATE_RPM {
            OilPressureGate::Armed
        } else {
            OilPressureGate::Suppressed
        }
    }

    /// Lamp level for the current switch reading.
    pub fn lamp(self, switch: bool) -> bool {
        match self {
            OilPressureGate::Armed => switch,
            OilPressureGate::Suppressed => false,
        }
    }
}
