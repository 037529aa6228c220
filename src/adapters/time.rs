//! ESP32 time adapters.
//!
//! - [`SystemClock`] implements [`ClockPort`]: local wall-clock time from the
//!   RTC (kept in sync by SNTP), shifted by the configured UTC offset.
//! - [`Uptime`] provides monotonic seconds since boot for loop pacing.
//!
//! - **`target_os = "espidf"`**: wraps `gettimeofday()` and
//!   `esp_timer_get_time()` from ESP-IDF.
//! - **`not(target_os = "espidf")`**: uses `std::time` for host-side
//!   testing and simulation.

use chrono::{DateTime, NaiveDateTime, TimeDelta};

use crate::app::ports::ClockPort;
use crate::error::ClockError;

/// 2020-01-01T00:00:00Z.  An RTC reading before this has never been synced.
pub const EPOCH_2020: i64 = 1_577_836_800;

/// Convert a UTC epoch reading into local wall-clock time.
pub fn wall_clock_from_epoch(
    epoch_secs: i64,
    utc_offset_minutes: i16,
) -> Result<NaiveDateTime, ClockError> {
    if epoch_secs < EPOCH_2020 {
        return Err(ClockError::NotSynced);
    }
    let utc = DateTime::from_timestamp(epoch_secs, 0).ok_or(ClockError::Unavailable)?;
    utc.naive_utc()
        .checked_add_signed(TimeDelta::minutes(i64::from(utc_offset_minutes)))
        .ok_or(ClockError::Unavailable)
}

// ───────────────────────────────────────────────────────────────
// SystemClock
// ───────────────────────────────────────────────────────────────

/// Wall clock backed by the system RTC.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    utc_offset_minutes: i16,
}

impl SystemClock {
    pub fn new(utc_offset_minutes: i16) -> Self {
        Self { utc_offset_minutes }
    }

    /// Seconds since the Unix epoch (UTC).
    #[cfg(target_os = "espidf")]
    fn epoch_secs(&self) -> Result<i64, ClockError> {
        let mut tv = esp_idf_svc::sys::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        // SAFETY: `tv` is a valid out-parameter; a null timezone is allowed.
        if unsafe { esp_idf_svc::sys::gettimeofday(&mut tv, core::ptr::null_mut()) } != 0 {
            return Err(ClockError::Unavailable);
        }
        Ok(i64::from(tv.tv_sec))
    }

    /// Seconds since the Unix epoch (UTC).
    #[cfg(not(target_os = "espidf"))]
    fn epoch_secs(&self) -> Result<i64, ClockError> {
        let elapsed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|_| ClockError::NotSynced)?;
        i64::try_from(elapsed.as_secs()).map_err(|_| ClockError::Unavailable)
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> Result<NaiveDateTime, ClockError> {
        wall_clock_from_epoch(self.epoch_secs()?, self.utc_offset_minutes)
    }
}

// ───────────────────────────────────────────────────────────────
// Uptime
// ───────────────────────────────────────────────────────────────

/// Monotonic time since boot.
pub struct Uptime {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Uptime {
    fn default() -> Self {
        Self::new()
    }
}

impl Uptime {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Seconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn secs(&self) -> u64 {
        // SAFETY: read-only query of the high-resolution timer.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000_000
    }

    /// Seconds since boot (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }
}
