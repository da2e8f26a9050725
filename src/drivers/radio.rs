// GloveLink — XBee Radio Link
//
// Byte-level wrapper over the UART the XBee module hangs off. The link is
// point-to-point and assumed reliable: reads either poll or block, writes
// push straight into the UART FIFO.

use std::thread;
use std::time::Duration;

use esp_idf_hal::delay::{BLOCK, NON_BLOCK};
use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};
use esp_idf_hal::uart::UartDriver;

use crate::config::RADIO_RESET_PULSE_MS;

pub struct Radio<'d> {
    uart: UartDriver<'d>,
    reset_pin: PinDriver<'d, AnyOutputPin, Output>,
}

impl<'d> Radio<'d> {
    pub fn new(uart: UartDriver<'d>, reset_pin: PinDriver<'d, AnyOutputPin, Output>) -> Self {
        Self { uart, reset_pin }
    }

    /// Hardware-reset the XBee: hold the reset line low, then release and
    /// give the module time to come back up.
    pub fn reset(&mut self) -> anyhow::Result<()> {
        self.reset_pin.set_low()?;
        thread::sleep(Duration::from_millis(RADIO_RESET_PULSE_MS));
        self.reset_pin.set_high()?;
        thread::sleep(Duration::from_millis(RADIO_RESET_PULSE_MS));
        log::info!("XBee reset complete");
        Ok(())
    }

    /// True when at least one hub byte is waiting in the RX buffer.
    pub fn readable(&self) -> bool {
        self.uart.remaining_read().map(|n| n > 0).unwrap_or(false)
    }

    /// Non-blocking read of one byte.
    pub fn try_getc(&self) -> anyhow::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        let n = self.uart.read(&mut buf, NON_BLOCK)?;
        Ok((n == 1).then_some(buf[0]))
    }

    /// Blocking read of one byte. Transport stalls are accepted here — the
    /// menu has nothing to do until the hub speaks.
    pub fn getc(&self) -> anyhow::Result<u8> {
        let mut buf = [0u8; 1];
        loop {
            if self.uart.read(&mut buf, BLOCK)? == 1 {
                return Ok(buf[0]);
            }
        }
    }

    /// Write one byte.
    pub fn putc(&self, byte: u8) -> anyhow::Result<()> {
        self.uart.write(&[byte])?;
        Ok(())
    }
}
