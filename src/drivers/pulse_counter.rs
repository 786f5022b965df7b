use crate::shared::SharedCell;

/// Edge counter fed by an external interrupt.
///
/// Every qualifying edge adds exactly one; there is no debouncing. The
/// rate estimator drains the count once per measurement window.
pub struct PulseCounter {
    pulses: SharedCell<u16>,
}

impl PulseCounter {
    pub const fn new() -> Self {
        Self {
            pulses: SharedCell::new(0),
        }
    }

    /// Record one edge. Called from the pin's interrupt handler.
    #[inline]
    pub fn on_edge(&self) {
        self.pulses.update(|n| n.wrapping_add(1));
    }

    /// Take the accumulated count and restart from zero atomically.
    #[inline]
    pub fn drain(&self) -> u16 {
        self.pulses.replace(0)
    }

    pub fn pending(&self) -> u16 {
        self.pulses.load()
    }
}

impl Default for PulseCounter {
    fn default() -> Self {
        Self::new()
    }
}
