// GloveLink — Tap Counter
//
// Counts pressure-sensor taps inside a rolling 5-second window, one instance
// per hand side. The count saturates at 5: the next tap after a full window
// restarts the window and begins a fresh count, so the hub reads the sequence
// 1,2,3,4,5,1 for six rapid taps. Window expiry resets to 0.

use crate::config::TAP_WINDOW_MS;

pub struct TapCounter {
    count: u8,
    // Deadline of the rolling window; None while idle.
    window_deadline_ms: Option<u32>,
}

impl TapCounter {
    pub fn new() -> Self {
        Self {
            count: 0,
            window_deadline_ms: None,
        }
    }

    /// Current tap count, 0–5. Read into the frame every encode cycle.
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Register one tap edge.
    ///
    /// The reset-at-five is lazy on purpose: a saturated counter holds its 5
    /// until either the window expires or this next tap arrives, at which
    /// point the window is restarted and the count re-opens at 1.
    pub fn on_tap(&mut self, now_ms: u32) {
        if self.count == 0 {
            self.window_deadline_ms = Some(now_ms.wrapping_add(TAP_WINDOW_MS));
        }
        if self.count == 5 {
            self.window_deadline_ms = Some(now_ms.wrapping_add(TAP_WINDOW_MS));
            self.count = 0;
        }
        self.count += 1;
    }

    /// Expire the window if its deadline has passed. Call once per poll tick.
    pub fn poll(&mut self, now_ms: u32) {
        if let Some(deadline) = self.window_deadline_ms {
            // Wrapping subtraction keeps the comparison valid across the
            // ~49-day millisecond-counter rollover.
            if (now_ms.wrapping_sub(deadline) as i32) >= 0 {
                self.window_deadline_ms = None;
                self.count = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tap_opens_window_at_one() {
        let mut taps = TapCounter::new();
        taps.on_tap(1_000);
        assert_eq!(taps.count(), 1);
    }

    #[test]
    fn six_taps_in_window_wrap_to_one() {
        let mut taps = TapCounter::new();
        let mut seen = Vec::new();
        for i in 0..6u32 {
            taps.on_tap(1_000 + i * 500);
            seen.push(taps.count());
        }
        assert_eq!(seen, [1, 2, 3, 4, 5, 1]);
    }

    #[test]
    fn window_timeout_resets_count() {
        let mut taps = TapCounter::new();
        for i in 0..4u32 {
            taps.on_tap(1_000 + i * 200);
        }
        assert_eq!(taps.count(), 4);

        // Gap after the 4th tap exceeds the 5 s window (opened at t=1000).
        taps.poll(6_100);
        assert_eq!(taps.count(), 0);

        // Next tap starts a fresh window.
        taps.on_tap(6_200);
        assert_eq!(taps.count(), 1);
    }

    #[test]
    fn poll_before_deadline_keeps_count() {
        let mut taps = TapCounter::new();
        taps.on_tap(1_000);
        taps.on_tap(1_500);
        taps.poll(5_900); // window runs until t=6000
        assert_eq!(taps.count(), 2);
    }

    #[test]
    fn saturated_count_survives_until_next_tap_or_timeout() {
        let mut taps = TapCounter::new();
        for i in 0..5u32 {
            taps.on_tap(1_000 + i * 100);
        }
        assert_eq!(taps.count(), 5);

        // Still 5 on poll while the window runs.
        taps.poll(2_000);
        assert_eq!(taps.count(), 5);

        // The sixth tap restarts the window before counting itself.
        taps.on_tap(2_100);
        assert_eq!(taps.count(), 1);

        // And the restarted window expires 5 s after that tap.
        taps.poll(7_200);
        assert_eq!(taps.count(), 0);
    }
}
