use avr_device::atmega128::USART0;
use cluster_firmware::config::UART_UBRR;
use core::convert::Infallible;
use embedded_hal::serial;

const UDRE0: u8 = 1 << 5;
const TXEN0: u8 = 1 << 3;
// async, no parity, 1 stop bit, 8 data bits
const FRAME_8N1: u8 = 0b0000_0110;

/// Transmit-only, polled USART0.
pub struct Uart {
    _private: (),
}

impl Uart {
    pub fn new() -> Self {
        unsafe {
            let p = &*USART0::ptr();
            p.ubrr0h.write(|w| w.bits((UART_UBRR >> 8) as u8));
            p.ubrr0l.write(|w| w.bits(UART_UBRR as u8));
            p.ucsr0c.write(|w| w.bits(FRAME_8N1));
            p.ucsr0b.write(|w| w.bits(TXEN0));
        }
        Self { _private: () }
    }

    #[inline]
    fn data_register_empty(&self) -> bool {
        unsafe { (*USART0::ptr()).ucsr0a.read().bits() & UDRE0 != 0 }
    }
}

impl serial::Write<u8> for Uart {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> nb::Result<(), Infallible> {
        if !self.data_register_empty() {
            return Err(nb::Error::WouldBlock);
        }
        unsafe { (*USART0::ptr()).udr0.write(|w| w.bits(byte)) }
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        if self.data_register_empty() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}
