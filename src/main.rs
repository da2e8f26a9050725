// GloveLink — Firmware Entry Point
//
// Boot sequence:
//   1. Reset the XBee radio (10 ms low / 10 ms high on the reset line).
//   2. Probe the accelerometer and gyroscope on the I2C bus (self-test).
//   3. Spawn the input-scan and battery-monitor tasks.
//   4. Run the session loop on the main thread: wait in the menu for a hub
//      command, then stream gesture frames (play) or raw sensor values
//      (plot) until the hub quits the session.
//
// The unit powers down (deep sleep) when the hub sends the quit command.

mod config;
mod drivers;
mod events;
mod gesture;
mod input;
mod session;
mod tasks;

use std::sync::atomic::AtomicBool;
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use esp_idf_hal::gpio::{AnyIOPin, InputPin, OutputPin, PinDriver};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::prelude::*;
use esp_idf_hal::uart::{config as uart_config, UartDriver};

use crate::config::*;
use crate::drivers::analog::AnalogReader;
use crate::drivers::haptic::HapticDriver;
use crate::drivers::imu::{gyro_is_connected, Lsm303dlhc};
use crate::drivers::radio::Radio;
use crate::events::{HubCommand, InputEvent};
use crate::gesture::gear::map_speed;
use crate::input::InputScanner;
use crate::session::{Feedback, SessionMode, SessionState};

// ---------------------------------------------------------------------------
// Utility: milliseconds since boot (wraps at ~49 days — fine for timeouts)
// ---------------------------------------------------------------------------
pub fn now_ms() -> u32 {
    unsafe { (esp_idf_sys::esp_timer_get_time() / 1000) as u32 }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------
fn main() -> anyhow::Result<()> {
    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("GloveLink firmware starting…");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;

    // ---- I2C bus (accelerometer + gyroscope) ------------------------------
    let i2c_config = I2cConfig::new().baudrate(400u32.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio6, // SDA
        peripherals.pins.gpio7, // SCL
        &i2c_config,
    )?;
    // SAFETY: The I2C peripheral is a singleton obtained from `Peripherals::take()`.
    // It will live for the entire programme duration (embedded firmware never exits).
    let i2c_bus: &'static Mutex<I2cDriver<'static>> =
        Box::leak(Box::new(Mutex::new(unsafe { core::mem::transmute(i2c) })));

    // ---- Radio link -------------------------------------------------------
    let uart_cfg = uart_config::Config::new().baudrate(Hertz(RADIO_BAUD));
    let uart = UartDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio21, // TX
        peripherals.pins.gpio20, // RX
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &uart_cfg,
    )?;
    let radio_reset = PinDriver::output(peripherals.pins.gpio9.downgrade_output())?;
    let mut radio = Radio::new(uart, radio_reset);
    radio.reset()?;

    // ---- Sensor self-test -------------------------------------------------
    let accel = Lsm303dlhc::new(i2c_bus);
    let accel_ok = accel.is_connected();
    let gyro_ok = gyro_is_connected(i2c_bus);
    if !accel_ok || !gyro_ok {
        log::error!("Boot check FAILED — accel:{} gyro:{}", accel_ok, gyro_ok);
        // Continue anyway so we can still debug via serial.
    }
    accel.init()?;

    // ---- Analog inputs ----------------------------------------------------
    let adc = Arc::new(Mutex::new(AnalogReader::new()?));

    // ---- Shared state -----------------------------------------------------
    let battery_ok = Arc::new(AtomicBool::new(true));

    // ---- Channels ---------------------------------------------------------
    let (event_tx, event_rx) = mpsc::channel::<InputEvent>();

    // ---- Input pins (pressure taps + flex sensor, external pull-downs off) -
    let tap_left = PinDriver::input(peripherals.pins.gpio10.downgrade_input())?;
    let tap_right = PinDriver::input(peripherals.pins.gpio3.downgrade_input())?;
    let flex = PinDriver::input(peripherals.pins.gpio5.downgrade_input())?;
    for pin in [PIN_TAP_LEFT, PIN_TAP_RIGHT, PIN_FLEX] {
        configure_pulldown(pin);
    }

    // ---- Spawn tasks (map to FreeRTOS tasks via std::thread) ---------------

    // Input scan task — tightest timing, edge timestamps are taken there.
    let scanner = InputScanner::new(tap_left, tap_right, flex, event_tx);
    thread::Builder::new()
        .name("input".into())
        .stack_size(STACK_INPUT)
        .spawn(move || {
            tasks::input::input_task(scanner);
        })?;

    // Battery monitor task
    let battery_led = PinDriver::output(peripherals.pins.gpio8.downgrade_output())?;
    let battery_adc = Arc::clone(&adc);
    let battery_flag = Arc::clone(&battery_ok);
    thread::Builder::new()
        .name("battery".into())
        .stack_size(STACK_BATTERY)
        .spawn(move || {
            tasks::battery::battery_task(battery_adc, battery_flag, battery_led);
        })?;

    // ---- Session loop (runs on the main thread) ---------------------------
    let haptic_pin = PinDriver::output(peripherals.pins.gpio4.downgrade_output())?;
    let mut haptic = HapticDriver::new(haptic_pin);

    log::info!("Boot complete — starting transmission");
    run_session(&mut radio, &accel, &adc, &mut haptic, &event_rx)?;

    // ---- Quit -------------------------------------------------------------
    haptic.stop();
    log::info!("Session ended by hub — powering down");
    enter_deep_sleep();
}

// ---------------------------------------------------------------------------
// Session loop
// ---------------------------------------------------------------------------

/// Run the hub-driven session until it reaches `Quit`.
///
/// Idle polls the radio for a menu selection; PlayGame streams one encoded
/// frame per pacing interval; PlotData streams raw sensor bytes for the
/// hub's plotter. All three keep the gesture state machines fed so taps and
/// flexes landed in the menu are not lost.
fn run_session(
    radio: &mut Radio<'_>,
    accel: &Lsm303dlhc,
    adc: &Arc<Mutex<AnalogReader>>,
    haptic: &mut HapticDriver<'_>,
    event_rx: &Receiver<InputEvent>,
) -> anyhow::Result<()> {
    let mut session = SessionState::new();

    while session.mode() != SessionMode::Quit {
        // Keep the gesture machines fed in every mode — taps and flexes
        // landed while waiting in the menu still count.
        drain_events(&mut session, event_rx);
        session.poll(now_ms());
        haptic.poll();

        match session.mode() {
            SessionMode::Idle => {
                if radio.readable() {
                    let byte = radio.getc()?;
                    dispatch_command(&mut session, haptic, byte);
                } else {
                    thread::sleep(Duration::from_millis(MENU_POLL_INTERVAL_MS));
                }
            }

            SessionMode::PlayGame => {
                if let Some(byte) = radio.try_getc()? {
                    dispatch_command(&mut session, haptic, byte);
                    if session.mode() != SessionMode::PlayGame {
                        continue;
                    }
                }

                match sample_speed(accel) {
                    Ok(avg) => session.set_speed(map_speed(avg)),
                    Err(e) => {
                        log::warn!("Speed sample failed: {e}");
                        continue;
                    }
                }

                // Pick up edges that landed during the sampling window.
                drain_events(&mut session, event_rx);
                session.poll(now_ms());

                let frame = session.frame().encode();
                radio.putc(frame)?;
                pace(haptic, Duration::from_millis(FRAME_BYTE_GAP_MS));
                radio.putc(b'\n')?;
                pace(haptic, Duration::from_millis(FRAME_BYTE_GAP_MS));
                pace(haptic, Duration::from_millis(FRAME_PACE_MS));
            }

            SessionMode::PlotData => {
                if let Some(byte) = radio.try_getc()? {
                    dispatch_command(&mut session, haptic, byte);
                    if session.mode() != SessionMode::PlotData {
                        continue;
                    }
                }

                let avg = match sample_speed(accel) {
                    Ok(avg) => avg,
                    Err(e) => {
                        log::warn!("Speed sample failed: {e}");
                        continue;
                    }
                };

                let pressure = {
                    let adc = adc.lock().unwrap();
                    adc.read(ADC_CH_PRESSURE_LEFT)
                        .and_then(|l| adc.read(ADC_CH_PRESSURE_RIGHT).map(|r| (l, r)))
                };
                let (left, right) = match pressure {
                    Ok(pair) => pair,
                    Err(e) => {
                        log::warn!("Pressure ADC read failed: {e}");
                        continue;
                    }
                };

                // Raw byte values (×100), not formatted text — the hub's
                // plotter consumes them directly.
                radio.putc((left * 100.0) as u8)?;
                radio.putc(b' ')?;
                radio.putc((right * 100.0) as u8)?;
                radio.putc(b' ')?;
                radio.putc((avg * 100.0) as u8)?;
                radio.putc(b'\n')?;

                pace(haptic, Duration::from_millis(PLOT_INTERVAL_MS));
            }

            SessionMode::Quit => {}
        }
    }

    Ok(())
}

/// Decode and apply one hub byte; fire vibration feedback when asked.
fn dispatch_command(session: &mut SessionState, haptic: &mut HapticDriver<'_>, byte: u8) {
    match HubCommand::from_byte(byte) {
        Some(command) => {
            log::info!("Hub command: {:?}", command);
            if session.handle_command(command) == Some(Feedback::Vibrate) {
                haptic.pulse(Duration::from_millis(VIBRATE_PULSE_MS));
            }
        }
        None => log::debug!("Ignoring unknown hub byte 0x{byte:02X}"),
    }
}

/// Feed every queued sensor edge into the session's state machines.
fn drain_events(session: &mut SessionState, event_rx: &Receiver<InputEvent>) {
    while let Ok(event) = event_rx.try_recv() {
        session.apply_event(event);
    }
}

/// Average |x| over one blocking sample window (10 samples, 10 ms apart).
fn sample_speed(accel: &Lsm303dlhc) -> anyhow::Result<f32> {
    let mut sum = 0.0f32;
    for _ in 0..SPEED_SAMPLE_COUNT {
        let (x, _z) = accel.read_xz()?;
        sum += x.abs();
        thread::sleep(Duration::from_millis(SPEED_SAMPLE_INTERVAL_MS));
    }
    Ok(sum / SPEED_SAMPLE_COUNT as f32)
}

/// Pacing delay that keeps the vibration deadline serviced. The full delay
/// is always slept — this is the intentional back-pressure on the link.
fn pace(haptic: &mut HapticDriver<'_>, total: Duration) {
    let slice = Duration::from_millis(20);
    let mut remaining = total;
    while remaining > Duration::ZERO {
        let step = remaining.min(slice);
        thread::sleep(step);
        haptic.poll();
        remaining -= step;
    }
}

/// Enable the internal pull-down on an input pin. The tap and flex sensors
/// drive their lines high when active.
fn configure_pulldown(pin: i32) {
    unsafe {
        esp_idf_sys::gpio_set_pull_mode(pin, esp_idf_sys::gpio_pull_mode_t_GPIO_PULLDOWN_ONLY);
    }
}

/// Enter deep sleep. Does not return.
fn enter_deep_sleep() -> ! {
    unsafe {
        esp_idf_sys::esp_deep_sleep_start();
    }
}
