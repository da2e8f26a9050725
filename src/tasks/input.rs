// GloveLink — Input Scan Task
//
// Drives the edge scanner at ~200 Hz. Edge timestamps are taken here, so the
// session loop's pacing delays never distort gesture timing.

use std::thread;
use std::time::Duration;

use crate::config::INPUT_POLL_INTERVAL_MS;
use crate::input::InputScanner;

pub fn input_task(mut scanner: InputScanner<'static>) {
    log::info!("Input task started");

    let poll_interval = Duration::from_millis(INPUT_POLL_INTERVAL_MS);

    loop {
        if !scanner.update(crate::now_ms()) {
            log::warn!("Event channel closed — exiting input task");
            return;
        }
        thread::sleep(poll_interval);
    }
}
