//! SmartChair firmware entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter              LogEventSink   HttpUplink      │
//! │  (Pressure · Env · Inertial   (EventSink)    (UplinkPort)    │
//! │   · Indicator)                WifiAdapter    Clock           │
//! │                               (Connectivity)                 │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐    │
//! │  │          MonitorService (pure logic)                 │    │
//! │  │  sweep · decide · render                             │    │
//! │  └──────────────────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::{Ets, FreeRtos};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

use smartchair::adapters::hardware::HardwareAdapter;
use smartchair::adapters::http::HttpUplink;
use smartchair::adapters::log_sink::LogEventSink;
use smartchair::adapters::time::Clock;
use smartchair::adapters::wifi::{ConnectivityPort, WifiAdapter};
use smartchair::app::service::MonitorService;
use smartchair::config::{NetworkConfig, SystemConfig};
use smartchair::drivers::hw_init::{self, GpioOutput, MuxAdc, OpenDrainPin};
use smartchair::drivers::status_led::StatusIndicator;
use smartchair::error::Error;
use smartchair::pins;
use smartchair::sensors::dht22::Dht22;
use smartchair::sensors::mpu6050::{self, Mpu6050};
use smartchair::sensors::mux::ChannelSelector;
use smartchair::sensors::pressure::PressureArray;

/// Park the main task after an unrecoverable boot failure.
fn halt(reason: Error) -> ! {
    error!("{}: halting", reason);
    loop {
        FreeRtos::delay_ms(1_000);
    }
}

fn log_json(label: &str, value: &impl serde::Serialize) {
    match serde_json::to_string(value) {
        Ok(json) => info!("{}: {}", label, json),
        Err(e) => warn!("{}: not serialisable: {}", label, e),
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SmartChair v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    let network = NetworkConfig::from_build_env().map_err(Error::from)?;
    log_json("Config", &config);
    log_json("Network", &network);

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        halt(e.into());
    }

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // SDA = GPIO21, SCL = GPIO22 (see `pins`).
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ)),
    )?;
    let mut imu = Mpu6050::new(i2c, mpu6050::DEFAULT_ADDRESS);
    if let Err(e) = imu.init() {
        halt(e.into());
    }

    let selector = ChannelSelector::new(pins::MUX_SELECT_GPIOS.map(GpioOutput::new));
    let pressure = PressureArray::new(selector, MuxAdc::new(), Ets, config.settle_delay_us);
    let dht = Dht22::new(OpenDrainPin::new(pins::DHT22_GPIO), Ets);
    let indicator = StatusIndicator::new(
        GpioOutput::new(pins::LED_NORMAL_GPIO),
        GpioOutput::new(pins::LED_ALERT_GPIO),
    );
    let mut hw = HardwareAdapter::new(pressure, dht, imu, indicator);

    // ── 4. Network ────────────────────────────────────────────
    let clock = Clock::new();
    let driver = BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))?,
        sysloop,
    )?;
    let mut wifi = WifiAdapter::new(driver);
    wifi.set_credentials(&network.wifi_ssid, &network.wifi_password)
        .map_err(Error::from)?;
    if let Err(e) = wifi.connect(clock.now_ms()) {
        warn!("WiFi: initial connect failed ({}), retrying in background", e);
    }
    let mut uplink = HttpUplink::new(&network.collector_url, config.http_timeout_ms);

    // ── 5. Service ────────────────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut service = MonitorService::new(config.clone()).map_err(Error::from)?;
    service.start(&mut sink);

    info!("System ready. Entering acquisition loop.");

    // ── 6. Acquisition loop ───────────────────────────────────
    loop {
        let started_ms = clock.now_ms();

        let reading = service.acquire(&mut hw, &mut sink);
        if wifi.is_connected() {
            // Outcome already reported through the sink.
            service.upload(&reading, &mut uplink, &mut sink).ok();
        } else {
            service.skip_upload(&reading, &mut sink);
        }

        wifi.poll(clock.now_ms());

        FreeRtos::delay_ms(clock.remaining_ms(started_ms, config.cycle_interval_ms));
    }
}
