// GloveLink — Gesture Pipeline
//
// Everything in this module is hardware-free: state machines take millisecond
// timestamps as arguments and timers are explicit deadlines checked on poll,
// so the whole pipeline runs under the host test harness exactly as it runs
// on the device.

pub mod flex;
pub mod frame;
pub mod gear;
pub mod tap;
