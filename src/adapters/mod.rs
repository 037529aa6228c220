//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements         | Connects to               |
//! |-------------|--------------------|---------------------------|
//! | `hardware`  | SourcePort         | ESP32 ADC sensor channels |
//! |             | ActuatorPort       | Relay GPIOs               |
//! |             | IndicatorPort      | WS2812 matrix over RMT    |
//! | `http`      | ReportRequest      | ESP-IDF HTTP server       |
//! | `log_sink`  | EventSink          | Serial log output         |
//! | `time`      | ClockPort          | SNTP-synced system time   |
//! | `wifi`      | ConnectivityPort   | ESP-IDF WiFi STA          |

pub mod hardware;
pub mod http;
pub mod log_sink;
pub mod time;
pub mod wifi;
