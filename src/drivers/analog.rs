// GloveLink — Analog Inputs
//
// One ADC1 oneshot unit shared by the battery divider and the two pressure
// sensor level taps. Raw ESP-IDF calls, same as the rest of the ADC path —
// esp-idf-hal's typed ADC API pins channels to GPIO types, which doesn't fit
// a channel set chosen at runtime from config.

use anyhow::bail;

use crate::config::*;

pub struct AnalogReader {
    handle: esp_idf_sys::adc_oneshot_unit_handle_t,
}

// SAFETY: The oneshot handle is only ever used behind a Mutex; ESP-IDF's
// oneshot API itself is safe to call from any task.
unsafe impl Send for AnalogReader {}

impl AnalogReader {
    /// Initialise ADC1 and configure the battery and pressure channels with
    /// 11 dB attenuation (full 0–3.3 V range).
    pub fn new() -> anyhow::Result<Self> {
        unsafe {
            let mut handle: esp_idf_sys::adc_oneshot_unit_handle_t = core::ptr::null_mut();
            let unit_cfg = esp_idf_sys::adc_oneshot_unit_init_cfg_t {
                unit_id: esp_idf_sys::adc_unit_t_ADC_UNIT_1,
                ulp_mode: esp_idf_sys::adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
                ..core::mem::zeroed()
            };
            let ret = esp_idf_sys::adc_oneshot_new_unit(&unit_cfg, &mut handle);
            if ret != esp_idf_sys::ESP_OK {
                bail!("ADC unit init failed ({ret})");
            }

            let chan_cfg = esp_idf_sys::adc_oneshot_chan_cfg_t {
                atten: esp_idf_sys::adc_atten_t_ADC_ATTEN_DB_11,
                bitwidth: esp_idf_sys::adc_bitwidth_t_ADC_BITWIDTH_12,
            };
            for channel in [ADC_CH_BATTERY, ADC_CH_PRESSURE_RIGHT, ADC_CH_PRESSURE_LEFT] {
                let ret = esp_idf_sys::adc_oneshot_config_channel(handle, channel, &chan_cfg);
                if ret != esp_idf_sys::ESP_OK {
                    bail!("ADC channel {channel} config failed ({ret})");
                }
            }

            Ok(Self { handle })
        }
    }

    /// Read one channel, normalized to 0.0–1.0 of full scale.
    pub fn read(&self, channel: u32) -> anyhow::Result<f32> {
        let mut raw: i32 = 0;
        let ret = unsafe { esp_idf_sys::adc_oneshot_read(self.handle, channel, &mut raw) };
        if ret != esp_idf_sys::ESP_OK {
            bail!("ADC read on channel {channel} failed ({ret})");
        }
        Ok(raw as f32 / 4095.0)
    }
}
