// GloveLink — Motion Sensor Drivers
//
// Register-level LSM303DLHC accelerometer driver over the shared I2C bus,
// plus a WHO_AM_I probe of the companion L3GD20 gyroscope for the boot
// self-test. The gesture pipeline only consumes the accelerometer's x and z
// axes.

use std::sync::Mutex;

use esp_idf_hal::i2c::I2cDriver;

use crate::config::*;

/// Thread-safe handle to a shared I2C bus.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;

// LSM303DLHC accelerometer registers
const REG_CTRL_REG1_A: u8 = 0x20;
const REG_CTRL_REG4_A: u8 = 0x23;
const REG_OUT_X_L_A: u8 = 0x28;
const AUTO_INCREMENT: u8 = 0x80;

// L3GD20 gyroscope
const REG_GYRO_WHO_AM_I: u8 = 0x0F;
const GYRO_ID_L3GD20: u8 = 0xD4;
const GYRO_ID_L3GD20H: u8 = 0xD7;

pub struct Lsm303dlhc {
    bus: SharedBus,
}

impl Lsm303dlhc {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus }
    }

    /// Verify the accelerometer answers on the bus. The LSM303DLHC accel
    /// block has no WHO_AM_I register, so presence is a control-register
    /// read acknowledging.
    pub fn is_connected(&self) -> bool {
        let mut bus = self.bus.lock().unwrap();
        let mut buf = [0u8; 1];
        bus.write_read(I2C_ADDR_ACCEL, &[REG_CTRL_REG1_A], &mut buf, I2C_TIMEOUT_TICKS)
            .is_ok()
    }

    /// 100 Hz data rate, all axes on, ±2 g high-resolution mode.
    pub fn init(&self) -> anyhow::Result<()> {
        let mut bus = self.bus.lock().unwrap();

        // ODR 100 Hz, X/Y/Z enabled
        bus.write(I2C_ADDR_ACCEL, &[REG_CTRL_REG1_A, 0x57], I2C_TIMEOUT_TICKS)?;

        // ±2 g, high-resolution output
        bus.write(I2C_ADDR_ACCEL, &[REG_CTRL_REG4_A, 0x08], I2C_TIMEOUT_TICKS)?;

        log::info!("LSM303DLHC initialised (100Hz, ±2g)");
        Ok(())
    }

    /// Burst-read all axes, return (x, z) in g. The y axis runs along the
    /// forearm and carries no rotation signal, so it is discarded here.
    pub fn read_xz(&self) -> anyhow::Result<(f32, f32)> {
        let mut bus = self.bus.lock().unwrap();
        let mut raw = [0u8; 6];
        bus.write_read(
            I2C_ADDR_ACCEL,
            &[REG_OUT_X_L_A | AUTO_INCREMENT],
            &mut raw,
            I2C_TIMEOUT_TICKS,
        )?;

        // 12-bit left-justified samples
        let x = (i16::from_le_bytes([raw[0], raw[1]]) >> 4) as f32 * ACCEL_SCALE_2G;
        let z = (i16::from_le_bytes([raw[4], raw[5]]) >> 4) as f32 * ACCEL_SCALE_2G;
        Ok((x, z))
    }
}

/// Boot-time probe of the L3GD20 gyroscope sharing the bus. Only the ID is
/// checked — the gesture pipeline runs entirely off the accelerometer.
pub fn gyro_is_connected(bus: SharedBus) -> bool {
    let mut bus = bus.lock().unwrap();
    let mut buf = [0u8; 1];
    match bus.write_read(I2C_ADDR_GYRO, &[REG_GYRO_WHO_AM_I], &mut buf, I2C_TIMEOUT_TICKS) {
        Ok(()) => buf[0] == GYRO_ID_L3GD20 || buf[0] == GYRO_ID_L3GD20H,
        Err(_) => false,
    }
}
