use avr_device::atmega128::EXINT;

// ISC01:ISC00 and ISC11:ISC10 both 0b11
const RISING_INT0_INT1: u8 = 0b0000_1111;
const INT0_INT1: u8 = 0b0000_0011;

/// Rising-edge interrupts on INT0 (speedometer) and INT1 (tachometer).
pub fn enable_pulse_inputs() {
    unsafe {
        let p = &*EXINT::ptr();
        p.eicra.modify(|r, w| w.bits(r.bits() | RISING_INT0_INT1));
        p.eifr.write(|w| w.bits(INT0_INT1));
        p.eimsk.modify(|r, w| w.bits(r.bits() | INT0_INT1));
    }
}
