//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                         | Connects to          |
//! |------------|------------------------------------|----------------------|
//! | `hardware` | PressurePort, EnvironmentPort,     | mux + ADC, DHT22,    |
//! |            | InertialPort, IndicatorPort        | MPU-6050, LEDs       |
//! | `http`     | UplinkPort                         | Collector (HTTP GET) |
//! | `log_sink` | EventSink                          | Serial log output    |
//! | `time`     | (monotonic clock)                  | ESP32 system timer   |
//! | `wifi`     | ConnectivityPort                   | ESP-IDF WiFi STA     |

pub mod hardware;
pub mod http;
pub mod log_sink;
pub mod time;
pub mod wifi;
