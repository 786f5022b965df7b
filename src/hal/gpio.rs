use avr_device::atmega128::{PORTB, PORTC, PORTD, PORTF};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::{InputPin, OutputPin};

pub struct Input;
pub struct Output;

pub struct Pin<PORT, const PIN: u8, MODE> {
    _port: PhantomData<PORT>,
    _mode: PhantomData<MODE>,
}

impl<PORT, const P: u8, MODE> Pin<PORT, P, MODE> {
    const fn new() -> Self {
        Pin {
            _port: PhantomData,
            _mode: PhantomData,
        }
    }
}

macro_rules! impl_port {
    ($PORT:ident, $pin:ident, $ddr:ident, $port:ident) => {
        impl<const P: u8> Pin<$PORT, P, Output> {
            /// Configure as an output driven low.
            pub fn output_low() -> Self {
                unsafe {
                    let p = &*$PORT::ptr();
                    p.$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    p.$ddr.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Self::new()
            }
        }

        impl<const P: u8> Pin<$PORT, P, Input> {
            /// Configure as an input with the internal pull-up enabled.
            pub fn input_pull_up() -> Self {
                unsafe {
                    let p = &*$PORT::ptr();
                    p.$ddr.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    p.$port.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Self::new()
            }

            /// Configure as a high-impedance input (analog sender inputs).
            pub fn input_floating() -> Self {
                unsafe {
                    let p = &*$PORT::ptr();
                    p.$ddr.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    p.$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                }
                Self::new()
            }
        }

        impl<const P: u8> OutputPin for Pin<$PORT, P, Output> {
            type Error = Infallible;

            #[inline]
            fn set_high(&mut self) -> Result<(), Infallible> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Ok(())
            }

            #[inline]
            fn set_low(&mut self) -> Result<(), Infallible> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                }
                Ok(())
            }
        }

        impl<const P: u8> InputPin for Pin<$PORT, P, Input> {
            type Error = Infallible;

            #[inline]
            fn is_high(&self) -> Result<bool, Infallible> {
                Ok(unsafe { (*$PORT::ptr()).$pin.read().bits() } & (1 << P) != 0)
            }

            #[inline]
            fn is_low(&self) -> Result<bool, Infallible> {
                self.is_high().map(|high| !high)
            }
        }
    };
}

impl_port!(PORTB, pinb, ddrb, portb);
impl_port!(PORTC, pinc, ddrc, portc);
impl_port!(PORTD, pind, ddrd, portd);
impl_port!(PORTF, pinf, ddrf, portf);

// Cluster wiring. Once running, PORTC outputs are written only from the
// Timer0 handler and PORTD outputs only from the main loop.
pub mod board {
    use super::*;

    // Gauge drive outputs
    pub type TachOut = Pin<PORTC, 4, Output>;
    pub type SpeedoOut = Pin<PORTC, 5, Output>;
    pub type OilLamp = Pin<PORTD, 6, Output>;
    pub type FuelPwmOut = Pin<PORTB, 5, Output>; // OC1A
    pub type TempPwmOut = Pin<PORTB, 6, Output>; // OC1B

    // Sensor inputs
    pub type SpeedoIn = Pin<PORTD, 0, Input>; // INT0
    pub type TachIn = Pin<PORTD, 1, Input>; // INT1
    pub type OilSwitch = Pin<PORTC, 3, Input>;
    pub type CoolantIn = Pin<PORTF, 0, Input>; // ADC0
    pub type FuelIn = Pin<PORTF, 1, Input>; // ADC1
}
