use avr_device::atmega128::{TC0, TC2};
use cluster_firmware::config::{WAVE_TIMER_PRESCALER, WAVE_TIMER_RELOAD, WINDOW_TIMER_PRESCALER};

const TOIE0: u8 = 1 << 0;
const TOV0: u8 = 1 << 0;
const TOIE2: u8 = 1 << 6;
const TOV2: u8 = 1 << 6;

#[derive(Clone, Copy)]
pub enum Prescaler {
    Div8,
    Div64,
    Div1024,
}

impl Prescaler {
    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div1024 => 1024,
        }
    }

    // Timer0 is the asynchronous timer and has its own clock select table
    const fn async_bits(self) -> u8 {
        match self {
            Prescaler::Div8 => 0b010,
            Prescaler::Div64 => 0b100,
            Prescaler::Div1024 => 0b111,
        }
    }

    // Timer1 and Timer2 share the synchronous table
    pub const fn sync_bits(self) -> u8 {
        match self {
            Prescaler::Div8 => 0b010,
            Prescaler::Div64 => 0b011,
            Prescaler::Div1024 => 0b101,
        }
    }
}

const WAVE_PRESCALER: Prescaler = Prescaler::Div64;
const WINDOW_PRESCALER: Prescaler = Prescaler::Div1024;

const _: () = assert!(WAVE_PRESCALER.divisor() == WAVE_TIMER_PRESCALER);
const _: () = assert!(WINDOW_PRESCALER.divisor() == WINDOW_TIMER_PRESCALER);

/// Timer0 overflow: the waveform generator tick
pub struct WaveTimer;

impl WaveTimer {
    pub fn start() {
        unsafe {
            let p = &*TC0::ptr();
            p.tcnt0.write(|w| w.bits(WAVE_TIMER_RELOAD));
            p.tccr0.write(|w| w.bits(WAVE_PRESCALER.async_bits()));
            p.tifr.write(|w| w.bits(TOV0));
            p.timsk.modify(|r, w| w.bits(r.bits() | TOIE0));
        }
    }

    /// Shorten the next period. Must be the first thing the overflow
    /// handler does.
    #[inline(always)]
    pub fn reload() {
        unsafe {
            (*TC0::ptr()).tcnt0.write(|w| w.bits(WAVE_TIMER_RELOAD));
        }
    }
}

/// Timer2 overflow: the measurement window time base
pub struct WindowTimer;

impl WindowTimer {
    pub fn start() {
        unsafe {
            let p = &*TC2::ptr();
            p.tcnt2.write(|w| w.bits(0));
            p.tccr2.write(|w| w.bits(WINDOW_PRESCALER.sync_bits()));

            let t = &*TC0::ptr();
            t.tifr.write(|w| w.bits(TOV2));
            t.timsk.modify(|r, w| w.bits(r.bits() | TOIE2));
        }
    }
}
