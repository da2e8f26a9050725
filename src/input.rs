// GloveLink — Sensor Edge Scanner
//
// Polls the two pressure-tap inputs and the flex input at ~200 Hz and turns
// level changes into timestamped edge events for the session loop. Taps
// report rising edges only; the flex sensor reports both edges because the
// debouncer needs press and release. Debounce itself belongs to the gesture
// state machines — this layer just stamps the raw edges.

use std::sync::mpsc::Sender;

use esp_idf_hal::gpio::{AnyInputPin, Input, PinDriver};

use crate::events::InputEvent;

pub struct InputScanner<'d> {
    tap_left: PinDriver<'d, AnyInputPin, Input>,
    tap_right: PinDriver<'d, AnyInputPin, Input>,
    flex: PinDriver<'d, AnyInputPin, Input>,
    event_tx: Sender<InputEvent>,

    // Last sampled levels for edge detection.
    tap_left_high: bool,
    tap_right_high: bool,
    flex_high: bool,
}

impl<'d> InputScanner<'d> {
    pub fn new(
        tap_left: PinDriver<'d, AnyInputPin, Input>,
        tap_right: PinDriver<'d, AnyInputPin, Input>,
        flex: PinDriver<'d, AnyInputPin, Input>,
        event_tx: Sender<InputEvent>,
    ) -> Self {
        let tap_left_high = tap_left.is_high();
        let tap_right_high = tap_right.is_high();
        let flex_high = flex.is_high();
        Self {
            tap_left,
            tap_right,
            flex,
            event_tx,
            tap_left_high,
            tap_right_high,
            flex_high,
        }
    }

    /// Sample all three pins once and emit an event per detected edge.
    /// Returns `false` when the session side has hung up the channel.
    pub fn update(&mut self, now_ms: u32) -> bool {
        let mut alive = true;

        let left = self.tap_left.is_high();
        if left && !self.tap_left_high {
            alive &= self
                .event_tx
                .send(InputEvent::TapLeft { at_ms: now_ms })
                .is_ok();
        }
        self.tap_left_high = left;

        let right = self.tap_right.is_high();
        if right && !self.tap_right_high {
            alive &= self
                .event_tx
                .send(InputEvent::TapRight { at_ms: now_ms })
                .is_ok();
        }
        self.tap_right_high = right;

        let flex = self.flex.is_high();
        if flex != self.flex_high {
            let event = if flex {
                InputEvent::FlexRise { at_ms: now_ms }
            } else {
                InputEvent::FlexFall { at_ms: now_ms }
            };
            alive &= self.event_tx.send(event).is_ok();
        }
        self.flex_high = flex;

        alive
    }
}
