//! Interrupt handlers and the statics they share with the main loop

use core::cell::RefCell;
use critical_section::Mutex;

use cluster_firmware::drivers::{AnalogSampler, PulseCounter, RateEstimator, WaveformGenerator};
use cluster_firmware::{MeasuredState, OutputSetpoints};

use crate::hal::board::{SpeedoOut, TachOut};
use crate::hal::{Adc, WaveTimer};

pub static MEASURED: MeasuredState = MeasuredState::new();
pub static SETPOINTS: OutputSetpoints = OutputSetpoints::new();

static TACH_PULSES: PulseCounter = PulseCounter::new();
static SPEEDO_PULSES: PulseCounter = PulseCounter::new();

static RATE: Mutex<RefCell<RateEstimator>> = Mutex::new(RefCell::new(RateEstimator::new()));
static SAMPLER: Mutex<RefCell<AnalogSampler>> = Mutex::new(RefCell::new(AnalogSampler::new()));
static WAVEFORM: Mutex<RefCell<Option<WaveformGenerator<TachOut, SpeedoOut>>>> =
    Mutex::new(RefCell::new(None));

/// Hand the frequency output pins to the Timer0 handler.
pub fn install_waveform(generator: WaveformGenerator<TachOut, SpeedoOut>) {
    critical_section::with(|cs| {
        WAVEFORM.borrow(cs).replace(Some(generator));
    });
}

/// Kick off the first conversion; the ADC handler keeps the cycle going.
pub fn start_sampling() {
    let channel = critical_section::with(|cs| SAMPLER.borrow(cs).borrow().channel());
    Adc::start(channel.mux());
}

#[avr_device::interrupt(atmega128)]
fn TIMER0_OVF() {
    WaveTimer::reload();
    critical_section::with(|cs| {
        if let Some(generator) = WAVEFORM.borrow(cs).borrow_mut().as_mut() {
            // Pin writes are infallible
            let _ = generator.tick(&SETPOINTS);
        }
    });
}

#[avr_device::interrupt(atmega128)]
fn TIMER2_OVF() {
    critical_section::with(|cs| {
        RATE.borrow(cs)
            .borrow_mut()
            .on_tick(&TACH_PULSES, &SPEEDO_PULSES, &MEASURED);
    });
}

#[avr_device::interrupt(atmega128)]
fn INT0() {
    SPEEDO_PULSES.on_edge();
}

#[avr_device::interrupt(atmega128)]
fn INT1() {
    TACH_PULSES.on_edge();
}

#[avr_device::interrupt(atmega128)]
fn ADC() {
    let raw = Adc::result();
    let next = critical_section::with(|cs| SAMPLER.borrow(cs).borrow_mut().on_conversion(raw, &MEASURED));
    Adc::start(next.mux());
}
