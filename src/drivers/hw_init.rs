//! One-shot hardware peripheral initialization and raw pin wrappers.
//!
//! Configures the ADC1 oneshot unit for the multiplexer SIG line and the
//! GPIO directions for the select lines, LEDs and the DHT22 data line,
//! using raw ESP-IDF sys calls.  Called once from `main()` before the
//! acquisition loop starts.
//!
//! [`GpioOutput`], [`OpenDrainPin`] and [`MuxAdc`] expose the configured
//! pins through `embedded-hal` traits and [`AnalogInput`], so the drivers
//! above stay hardware-agnostic.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: real register access.  On host/test: levels live in a
//! static bitmask and the ADC returns an injectable value.

use core::convert::Infallible;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, AtomicU64, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::app::ports::AnalogInput;
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

impl From<HwInitError> for crate::error::Error {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::AdcInitFailed(_) => Self::Sensor(crate::error::SensorError::AdcInitFailed),
            HwInitError::GpioConfigFailed(_) => Self::Init("GPIO config failed"),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_outputs()?;
        init_gpio_open_drain()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  `init_adc()` completes before the loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    // 12 dB attenuation: full 0 – 3.3 V FSR divider swing.
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe {
        adc_oneshot_config_channel(adc1_handle(), pins::MUX_SIG_ADC1_CHANNEL, &chan_cfg)
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    info!("hw_init: ADC1 CH{} configured (mux SIG)", pins::MUX_SIG_ADC1_CHANNEL);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
static SIM_ADC: AtomicU16 = AtomicU16::new(0);

/// Host-side injection point for the simulated SIG line.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(raw: u16) {
    SIM_ADC.store(raw, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    SIM_ADC.load(Ordering::Relaxed)
}

/// The multiplexer SIG line as an [`AnalogInput`].
pub struct MuxAdc {
    channel: u32,
}

impl MuxAdc {
    pub fn new() -> Self {
        Self {
            channel: pins::MUX_SIG_ADC1_CHANNEL,
        }
    }
}

impl Default for MuxAdc {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalogInput for MuxAdc {
    fn read(&mut self) -> u16 {
        adc1_read(self.channel)
    }
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = pins::MUX_SELECT_GPIOS
        .into_iter()
        .chain([pins::LED_NORMAL_GPIO, pins::LED_ALERT_GPIO]);

    for pin in output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured (mux S0-S3, LEDs)");
    Ok(())
}

/// DHT22 data line: open-drain with the internal pull-up, idle high.
#[cfg(target_os = "espidf")]
unsafe fn init_gpio_open_drain() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::DHT22_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    unsafe { gpio_set_level(pins::DHT22_GPIO, 1) };

    info!("hw_init: GPIO{} open-drain (DHT22)", pins::DHT22_GPIO);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // configured during init_peripherals(). Main-loop only.
    unsafe { gpio_set_level(pin, if high { 1 } else { 0 }); }
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Simulated pad levels, bit n = GPIOn.  Open-drain pins idle high.
#[cfg(not(target_os = "espidf"))]
static SIM_GPIO: AtomicU64 = AtomicU64::new(1 << pins::DHT22_GPIO);

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    let mask = 1u64 << pin;
    if high {
        SIM_GPIO.fetch_or(mask, Ordering::Relaxed);
    } else {
        SIM_GPIO.fetch_and(!mask, Ordering::Relaxed);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    SIM_GPIO.load(Ordering::Relaxed) & (1u64 << pin) != 0
}

// ── embedded-hal wrappers ─────────────────────────────────────

/// A push-pull output configured by [`init_peripherals`].
pub struct GpioOutput {
    gpio: i32,
}

impl GpioOutput {
    /// The pin must be one of the outputs configured in `init_peripherals`.
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl ErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        gpio_write(self.gpio, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        gpio_write(self.gpio, true);
        Ok(())
    }
}

/// An open-drain line that can be driven low, released, and sampled.
pub struct OpenDrainPin {
    gpio: i32,
}

impl OpenDrainPin {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl ErrorType for OpenDrainPin {
    type Error = Infallible;
}

impl OutputPin for OpenDrainPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        gpio_write(self.gpio, false);
        Ok(())
    }

    /// Releases the line to the pull-up.
    fn set_high(&mut self) -> Result<(), Self::Error> {
        gpio_write(self.gpio, true);
        Ok(())
    }
}

impl InputPin for OpenDrainPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(gpio_read(self.gpio))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!gpio_read(self.gpio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_output_levels_are_visible() {
        // GPIO 40 is not wired on this board; safe to flip in parallel tests.
        let mut pin = GpioOutput::new(40);
        pin.set_high().unwrap();
        assert!(gpio_read(40));
        pin.set_low().unwrap();
        assert!(!gpio_read(40));
    }

    #[test]
    fn sim_adc_reads_injected_value() {
        sim_set_adc(1234);
        let mut adc = MuxAdc::new();
        assert_eq!(adc.read(), 1234);
    }
}
