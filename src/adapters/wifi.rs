//! WiFi station-mode adapter.
//!
//! Implements [`ConnectivityPort`]: the link the HTTP report server rides
//! on.  The control loop never depends on it: ticks run whether or not the
//! station is associated.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation stubs for host-side tests.
//!
//! ## Reconnection policy
//!
//! On disconnect the adapter waits an exponential backoff (2 s → 4 s →
//! 8 s … capped at 60 s) before retrying.  Retries are driven by
//! [`ConnectivityPort::poll`] with the caller's monotonic clock, so no
//! timer or thread is needed.

use core::fmt;
use log::{error, info, warn};

// ───────────────────────────────────────────────────────────────
// Port trait
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
    AlreadyConnected,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => write!(
                f,
                "password invalid (must be 8-64 bytes for WPA2, or empty for open)"
            ),
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
            Self::AlreadyConnected => write!(f, "already connected to AP"),
        }
    }
}

impl core::error::Error for ConnectivityError {}

pub trait ConnectivityPort {
    /// Associate now; on failure a retry is scheduled from `now_secs`.
    fn connect(&mut self, now_secs: u64) -> Result<(), ConnectivityError>;
    fn disconnect(&mut self);
    fn is_connected(&self) -> bool;
    /// Detect link loss and run due reconnect attempts.
    fn poll(&mut self, now_secs: u64);
    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError>;
    fn rssi(&self) -> Option<i8>;
}

// ───────────────────────────────────────────────────────────────
// Connection state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
}

const INITIAL_BACKOFF_SECS: u32 = 2;
const MAX_BACKOFF_SECS: u32 = 60;

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

pub fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    state: WifiState,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    backoff_secs: u32,
    /// Monotonic second at which the next reconnect attempt is due.
    retry_at: u64,
    last_rssi: Option<i8>,
    #[cfg(target_os = "espidf")]
    wifi: esp_idf_svc::wifi::BlockingWifi<esp_idf_svc::wifi::EspWifi<'static>>,
    /// Simulation: whether the access point is reachable.
    #[cfg(not(target_os = "espidf"))]
    sim_link_up: bool,
    /// Simulation: number of upcoming connect attempts that fail.
    #[cfg(not(target_os = "espidf"))]
    sim_failures: u32,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(
        wifi: esp_idf_svc::wifi::BlockingWifi<esp_idf_svc::wifi::EspWifi<'static>>,
    ) -> Self {
        Self {
            state: WifiState::Disconnected,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            backoff_secs: INITIAL_BACKOFF_SECS,
            retry_at: 0,
            last_rssi: None,
            wifi,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            state: WifiState::Disconnected,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            backoff_secs: INITIAL_BACKOFF_SECS,
            retry_at: 0,
            last_rssi: None,
            sim_link_up: true,
            sim_failures: 0,
        }
    }

    pub fn state(&self) -> WifiState {
        self.state
    }

    /// Delay applied after the next failed attempt.
    pub fn backoff_secs(&self) -> u32 {
        self.backoff_secs
    }

    /// Monotonic second of the next scheduled reconnect attempt.
    pub fn retry_at(&self) -> u64 {
        self.retry_at
    }

    fn on_connected(&mut self) {
        self.state = WifiState::Connected;
        self.backoff_secs = INITIAL_BACKOFF_SECS;
        self.last_rssi = self.platform_rssi();
    }

    fn schedule_retry(&mut self, now_secs: u64, attempt: u32) {
        self.state = WifiState::Reconnecting { attempt };
        self.retry_at = now_secs + u64::from(self.backoff_secs);
        self.last_rssi = None;
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};

        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let config = Configuration::Client(ClientConfiguration {
            ssid: self
                .ssid
                .as_str()
                .try_into()
                .map_err(|()| ConnectivityError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|()| ConnectivityError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        });

        let result = (|| {
            self.wifi.set_configuration(&config)?;
            if !self.wifi.is_started()? {
                self.wifi.start()?;
            }
            self.wifi.connect()?;
            self.wifi.wait_netif_up()
        })();
        result.map_err(|e| {
            warn!("WiFi(espidf): {e}");
            ConnectivityError::ConnectionFailed
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        if !self.sim_link_up {
            return Err(ConnectivityError::ConnectionFailed);
        }
        if self.sim_failures > 0 {
            self.sim_failures -= 1;
            warn!("WiFi(sim): simulated association failure");
            return Err(ConnectivityError::ConnectionFailed);
        }
        info!("WiFi(sim): connected to '{}'", self.ssid);
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_disconnect(&mut self) {
        if let Err(e) = self.wifi.disconnect() {
            warn!("WiFi(espidf): disconnect failed: {e}");
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_disconnect(&mut self) {
        info!("WiFi(sim): disconnected");
    }

    #[cfg(target_os = "espidf")]
    fn platform_is_connected(&self) -> bool {
        self.state == WifiState::Connected && self.wifi.is_connected().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_connected(&self) -> bool {
        self.state == WifiState::Connected && self.sim_link_up
    }

    #[cfg(target_os = "espidf")]
    fn platform_rssi(&self) -> Option<i8> {
        let mut ap_info = esp_idf_svc::sys::wifi_ap_record_t::default();
        // SAFETY: `ap_info` is a valid, exclusively borrowed out-parameter.
        let rc = unsafe { esp_idf_svc::sys::esp_wifi_sta_get_ap_info(&mut ap_info) };
        (rc == esp_idf_svc::sys::ESP_OK).then_some(ap_info.rssi)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_rssi(&self) -> Option<i8> {
        (self.state == WifiState::Connected).then_some(-60)
    }

    // ── Simulation controls ───────────────────────────────────

    /// Make the access point (un)reachable.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_link(&mut self, up: bool) {
        self.sim_link_up = up;
    }

    /// Fail the next `count` association attempts.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_fail_next(&mut self, count: u32) {
        self.sim_failures = count;
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for WifiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// ConnectivityPort
// ───────────────────────────────────────────────────────────────

impl ConnectivityPort for WifiAdapter {
    fn connect(&mut self, now_secs: u64) -> Result<(), ConnectivityError> {
        if self.ssid.is_empty() {
            return Err(ConnectivityError::NoCredentials);
        }
        if self.state == WifiState::Connected {
            return Err(ConnectivityError::AlreadyConnected);
        }

        info!("WiFi: connecting to '{}'", self.ssid);
        self.state = WifiState::Connecting;

        match self.platform_connect() {
            Ok(()) => {
                self.on_connected();
                info!("WiFi: connected (RSSI={:?})", self.last_rssi);
                Ok(())
            }
            Err(e) => {
                error!("WiFi: connection failed: {e}");
                self.schedule_retry(now_secs, 0);
                Err(e)
            }
        }
    }

    fn disconnect(&mut self) {
        self.platform_disconnect();
        self.state = WifiState::Disconnected;
        self.last_rssi = None;
        info!("WiFi: disconnected");
    }

    fn is_connected(&self) -> bool {
        self.platform_is_connected()
    }

    fn poll(&mut self, now_secs: u64) {
        match self.state {
            WifiState::Reconnecting { attempt } if now_secs >= self.retry_at => {
                info!(
                    "WiFi: reconnect attempt {} (backoff {}s)",
                    attempt + 1,
                    self.backoff_secs
                );
                match self.platform_connect() {
                    Ok(()) => {
                        self.on_connected();
                        info!("WiFi: reconnected (RSSI={:?})", self.last_rssi);
                    }
                    Err(_) => {
                        self.backoff_secs = (self.backoff_secs * 2).min(MAX_BACKOFF_SECS);
                        self.schedule_retry(now_secs, attempt + 1);
                    }
                }
            }
            WifiState::Connected => {
                if self.platform_is_connected() {
                    self.last_rssi = self.platform_rssi();
                } else {
                    warn!("WiFi: connection lost, entering reconnect");
                    self.schedule_retry(now_secs, 0);
                }
            }
            _ => {}
        }
    }

    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        self.ssid.clear();
        self.ssid
            .push_str(ssid)
            .map_err(|()| ConnectivityError::InvalidSsid)?;
        self.password.clear();
        self.password
            .push_str(password)
            .map_err(|()| ConnectivityError::InvalidPassword)?;
        info!("WiFi: credentials updated (SSID='{}')", self.ssid);
        Ok(())
    }

    fn rssi(&self) -> Option<i8> {
        self.last_rssi
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
