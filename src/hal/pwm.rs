//! Timer1 PWM for the fuel and temperature gauges
//!
//! 10-bit phase correct mode, /8 prescaler: ~488 Hz at 8 MHz. OC1A drives
//! the fuel gauge, OC1B the temperature gauge.

use avr_device::atmega128::TC1;
use core::marker::PhantomData;
use embedded_hal::PwmPin;

use super::gpio::board::{FuelPwmOut, TempPwmOut};
use super::timer::Prescaler;

const WGM10: u8 = 1 << 0;
const WGM11: u8 = 1 << 1;
const COM1B1: u8 = 1 << 5;
const COM1A1: u8 = 1 << 7;

const PWM_TOP: u16 = 0x3FF;
const PWM_PRESCALER: Prescaler = Prescaler::Div8;

pub struct ChannelA;
pub struct ChannelB;

pub trait OutputCompare {
    const COM_BITS: u8;
    fn write(duty: u16);
    fn read() -> u16;
}

impl OutputCompare for ChannelA {
    const COM_BITS: u8 = COM1A1;

    fn write(duty: u16) {
        unsafe { (*TC1::ptr()).ocr1a.write(|w| w.bits(duty)) }
    }

    fn read() -> u16 {
        unsafe { (*TC1::ptr()).ocr1a.read().bits() }
    }
}

impl OutputCompare for ChannelB {
    const COM_BITS: u8 = COM1B1;

    fn write(duty: u16) {
        unsafe { (*TC1::ptr()).ocr1b.write(|w| w.bits(duty)) }
    }

    fn read() -> u16 {
        unsafe { (*TC1::ptr()).ocr1b.read().bits() }
    }
}

pub struct PwmChannel<CH> {
    _channel: PhantomData<CH>,
}

/// Start Timer1 and hand out the fuel (OC1A) and temperature (OC1B)
/// channels, both disconnected until enabled.
pub fn start() -> (PwmChannel<ChannelA>, PwmChannel<ChannelB>) {
    let _ = FuelPwmOut::output_low();
    let _ = TempPwmOut::output_low();

    unsafe {
        let p = &*TC1::ptr();
        p.tccr1a.write(|w| w.bits(WGM11 | WGM10));
        p.tccr1b.write(|w| w.bits(PWM_PRESCALER.sync_bits()));
    }

    (
        PwmChannel { _channel: PhantomData },
        PwmChannel { _channel: PhantomData },
    )
}

impl<CH: OutputCompare> PwmPin for PwmChannel<CH> {
    type Duty = u16;

    fn disable(&mut self) {
        unsafe {
            (*TC1::ptr()).tccr1a.modify(|r, w| w.bits(r.bits() & !CH::COM_BITS));
        }
    }

    fn enable(&mut self) {
        unsafe {
            (*TC1::ptr()).tccr1a.modify(|r, w| w.bits(r.bits() | CH::COM_BITS));
        }
    }

    fn get_duty(&self) -> u16 {
        avr_device::interrupt::free(|_| CH::read())
    }

    fn get_max_duty(&self) -> u16 {
        PWM_TOP
    }

    // 16-bit compare registers go through the shared TEMP byte
    fn set_duty(&mut self, duty: u16) {
        avr_device::interrupt::free(|_| CH::write(duty.min(PWM_TOP)));
    }
}
