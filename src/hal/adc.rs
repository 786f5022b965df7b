use avr_device::atmega128::ADC;

const REFS_INTERNAL_2V56: u8 = 0b11 << 6;
const ADLAR: u8 = 1 << 5;
const MUX_MASK: u8 = 0x1F;

const ADEN: u8 = 1 << 7;
const ADSC: u8 = 1 << 6;
const ADIF: u8 = 1 << 4;
const ADIE: u8 = 1 << 3;
const ADPS_DIV128: u8 = 0b111;

/// Interrupt-driven, left-aligned conversions: 8 significant bits in ADCH.
pub struct Adc;

impl Adc {
    /// Enable the converter with its completion interrupt. No conversion is
    /// started.
    pub fn init() {
        unsafe {
            let p = &*ADC::ptr();
            p.admux.write(|w| w.bits(REFS_INTERNAL_2V56 | ADLAR));
            p.adcsra.write(|w| w.bits(ADEN | ADIF | ADIE | ADPS_DIV128));
        }
    }

    /// Select `mux` and start one conversion.
    #[inline]
    pub fn start(mux: u8) {
        unsafe {
            let p = &*ADC::ptr();
            p.admux.write(|w| w.bits(REFS_INTERNAL_2V56 | ADLAR | (mux & MUX_MASK)));
            p.adcsra.modify(|r, w| w.bits(r.bits() | ADSC));
        }
    }

    /// Upper 8 bits of the last conversion.
    #[inline]
    pub fn result() -> u8 {
        let raw = unsafe { (*ADC::ptr()).adc.read().bits() };
        (raw >> 8) as u8
    }
}
