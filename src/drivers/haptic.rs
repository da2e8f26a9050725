// GloveLink — Vibration Motor Driver
//
// GPIO-driven vibration motor with a deadline-based one-shot pulse. The
// session loop calls `poll()` every iteration; the motor switches off when
// the deadline passes, so a 1-second collision pulse never blocks frame
// pacing.

use std::time::{Duration, Instant};

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};

pub struct HapticDriver<'d> {
    pin: PinDriver<'d, AnyOutputPin, Output>,
    off_at: Option<Instant>,
}

impl<'d> HapticDriver<'d> {
    pub fn new(pin: PinDriver<'d, AnyOutputPin, Output>) -> Self {
        Self { pin, off_at: None }
    }

    /// Start (or extend) a vibration pulse of the given duration.
    pub fn pulse(&mut self, duration: Duration) {
        let _ = self.pin.set_high();
        self.off_at = Some(Instant::now() + duration);
    }

    /// Stop the motor once the pulse deadline has passed.
    pub fn poll(&mut self) {
        if let Some(deadline) = self.off_at {
            if Instant::now() >= deadline {
                let _ = self.pin.set_low();
                self.off_at = None;
            }
        }
    }

    /// Force the motor off, e.g. on shutdown.
    pub fn stop(&mut self) {
        let _ = self.pin.set_low();
        self.off_at = None;
    }
}
