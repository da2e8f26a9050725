// GloveLink — Hardware & System Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V), left-hand unit

use crate::gesture::frame::Hand;

// ---------------------------------------------------------------------------
// Unit identity
// ---------------------------------------------------------------------------
pub const HAND_SIDE: Hand = Hand::Left;

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (Xiao ESP32-C3 pinout)
// ---------------------------------------------------------------------------
pub const PIN_TAP_RIGHT: i32 = 3;   // D1 — right pressure sensor (active HIGH)
pub const PIN_TAP_LEFT: i32 = 10;   // D10 — left pressure sensor (active HIGH)
pub const PIN_FLEX: i32 = 5;        // D3 — flex sensor comparator output
pub const PIN_VIBRATE: i32 = 4;     // D2 — vibration motor control
pub const PIN_LED_BATTERY: i32 = 8; // D8 — battery status LED (on = good)
pub const PIN_RADIO_RESET: i32 = 9; // D9 — XBee reset (active LOW)
pub const PIN_I2C_SDA: i32 = 6;     // D4 — I2C data line
pub const PIN_I2C_SCL: i32 = 7;     // D5 — I2C clock line
pub const PIN_RADIO_TX: i32 = 21;   // D6 — UART TX to XBee DIN
pub const PIN_RADIO_RX: i32 = 20;   // D7 — UART RX from XBee DOUT

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_ACCEL: u8 = 0x19; // LSM303DLHC accelerometer
pub const I2C_ADDR_GYRO: u8 = 0x6B;  // L3GD20 gyroscope (boot probe only)
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks

// ---------------------------------------------------------------------------
// ADC Channels (ADC1, oneshot)
// ---------------------------------------------------------------------------
pub const ADC_CH_BATTERY: u32 = 0;        // A0 — battery divider
pub const ADC_CH_PRESSURE_RIGHT: u32 = 1; // A1 — right pressure sensor level
pub const ADC_CH_PRESSURE_LEFT: u32 = 2;  // A2 — left pressure sensor level

// ---------------------------------------------------------------------------
// Radio Link
// ---------------------------------------------------------------------------
pub const RADIO_BAUD: u32 = 9600;
pub const RADIO_RESET_PULSE_MS: u64 = 10;

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_INPUT: usize = 4096;
pub const STACK_BATTERY: usize = 4096;

// ---------------------------------------------------------------------------
// Timing (milliseconds unless noted)
// ---------------------------------------------------------------------------
pub const INPUT_POLL_INTERVAL_MS: u64 = 5;         // 200 Hz edge scan
pub const MENU_POLL_INTERVAL_MS: u64 = 10;         // idle wait on hub byte
pub const SPEED_SAMPLE_COUNT: usize = 10;          // samples per gear window
pub const SPEED_SAMPLE_INTERVAL_MS: u64 = 10;      // blocking sample cadence
pub const FRAME_BYTE_GAP_MS: u64 = 10;             // gap between frame and '\n'
pub const FRAME_PACE_MS: u64 = 500;                // inter-frame pacing delay
pub const PLOT_INTERVAL_MS: u64 = 500;             // plot-mode cadence
pub const TAP_WINDOW_MS: u32 = 5000;               // rolling tap-count window
pub const FLEX_CONFIRM_MS: u32 = 50;               // press must outlast this
pub const FLEX_RELEASE_MS: u32 = 80;               // release guard since press
pub const FLEX_COOLDOWN_MS: u32 = 80;              // post-release settle time
pub const VIBRATE_PULSE_MS: u64 = 1000;            // collision feedback pulse
pub const BATTERY_CHECK_INTERVAL_MS: u64 = 10_000; // 10 seconds

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------
// Battery divider reads ~0.54 at 3.6 V pack voltage; at or below that the
// pack needs charging.
pub const BATTERY_LOW_THRESHOLD: f32 = 0.54;

// ---------------------------------------------------------------------------
// LSM303DLHC Sensor Scale
// ---------------------------------------------------------------------------
pub const ACCEL_SCALE_2G: f32 = 0.001; // g per LSB, 12-bit ±2 g mode
