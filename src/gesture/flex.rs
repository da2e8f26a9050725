// GloveLink — Flex Debouncer
//
// Turns raw flex/unflex edges from the bend sensor into a clean
// forward/backward motion bit. A single press timer is armed by the first
// flex edge and re-read (never restarted) by every edge that follows: a
// second flex edge after 50 ms confirms the press, an unflex edge after
// 80 ms confirms the release. Edges inside those guards are bounces.

use crate::config::{FLEX_CONFIRM_MS, FLEX_COOLDOWN_MS, FLEX_RELEASE_MS};

/// Motion bit derived from the flex sensor. Backward is reported the moment
/// a press starts (optimistically); Forward returns on a confirmed release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlexState {
    Released,
    PressTiming,
    Pressed,
    ReleaseTiming,
}

pub struct FlexDebouncer {
    state: FlexState,
    motion: Motion,
    press_start_ms: u32,
    cooldown_deadline_ms: u32,
}

impl FlexDebouncer {
    pub fn new() -> Self {
        Self {
            state: FlexState::Released,
            motion: Motion::Forward,
            press_start_ms: 0,
            cooldown_deadline_ms: 0,
        }
    }

    /// Current motion bit, read into the frame every encode cycle.
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Rising edge from the flex sensor.
    pub fn on_flex(&mut self, now_ms: u32) {
        match self.state {
            FlexState::Released | FlexState::ReleaseTiming => {
                self.press_start_ms = now_ms;
                self.motion = Motion::Backward;
                self.state = FlexState::PressTiming;
            }
            FlexState::PressTiming => {
                // Same timer as the first edge — bounces inside the guard
                // leave the press start untouched.
                if now_ms.wrapping_sub(self.press_start_ms) > FLEX_CONFIRM_MS {
                    self.state = FlexState::Pressed;
                }
            }
            FlexState::Pressed => {}
        }
    }

    /// Falling edge from the flex sensor.
    pub fn on_unflex(&mut self, now_ms: u32) {
        let timing = matches!(self.state, FlexState::PressTiming | FlexState::Pressed);
        if timing && now_ms.wrapping_sub(self.press_start_ms) > FLEX_RELEASE_MS {
            self.motion = Motion::Forward;
            self.cooldown_deadline_ms = now_ms.wrapping_add(FLEX_COOLDOWN_MS);
            self.state = FlexState::ReleaseTiming;
        }
        // Anything earlier is a bounce on the release side.
    }

    /// Drain the post-release cooldown. Call once per poll tick.
    pub fn poll(&mut self, now_ms: u32) {
        if self.state == FlexState::ReleaseTiming
            && (now_ms.wrapping_sub(self.cooldown_deadline_ms) as i32) >= 0
        {
            self.state = FlexState::Released;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_forward_until_first_press() {
        let flex = FlexDebouncer::new();
        assert_eq!(flex.motion(), Motion::Forward);
    }

    #[test]
    fn press_reports_backward_immediately() {
        let mut flex = FlexDebouncer::new();
        flex.on_flex(1_000);
        assert_eq!(flex.motion(), Motion::Backward);
    }

    #[test]
    fn short_press_release_is_a_bounce() {
        let mut flex = FlexDebouncer::new();
        flex.on_flex(1_000);
        flex.on_unflex(1_040); // 40 ms — inside the 80 ms release guard
        assert_eq!(flex.motion(), Motion::Backward);
    }

    #[test]
    fn confirmed_press_then_release_reports_forward() {
        let mut flex = FlexDebouncer::new();
        flex.on_flex(1_000);
        flex.on_flex(1_060); // >50 ms — confirms the press
        flex.on_unflex(1_090); // 90 ms after press start — valid release
        assert_eq!(flex.motion(), Motion::Forward);
    }

    #[test]
    fn release_without_confirm_edge_is_still_valid_past_guard() {
        let mut flex = FlexDebouncer::new();
        flex.on_flex(1_000);
        flex.on_unflex(1_100); // no second flex edge, but >80 ms elapsed
        assert_eq!(flex.motion(), Motion::Forward);
    }

    #[test]
    fn bounce_edges_do_not_restart_the_press_timer() {
        let mut flex = FlexDebouncer::new();
        flex.on_flex(1_000);
        flex.on_flex(1_020); // bounce at 20 ms — ignored, timer untouched
        flex.on_flex(1_060); // 60 ms after the *first* edge — confirms
        flex.on_unflex(1_090);
        assert_eq!(flex.motion(), Motion::Forward);
    }

    #[test]
    fn new_press_can_start_during_release_cooldown() {
        let mut flex = FlexDebouncer::new();
        flex.on_flex(1_000);
        flex.on_unflex(1_100);
        assert_eq!(flex.motion(), Motion::Forward);

        // Next grip lands before the cooldown is polled out.
        flex.on_flex(1_120);
        assert_eq!(flex.motion(), Motion::Backward);
    }

    #[test]
    fn cooldown_drains_back_to_released() {
        let mut flex = FlexDebouncer::new();
        flex.on_flex(1_000);
        flex.on_unflex(1_100);
        flex.poll(1_200); // past the 80 ms cooldown
        flex.on_flex(1_210);
        assert_eq!(flex.motion(), Motion::Backward);
    }
}
