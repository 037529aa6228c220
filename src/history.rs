//! Rolling sample history.
//!
//! A fixed-capacity log of committed (temperature, humidity) samples,
//! newest at slot 0.  Recording shifts every slot one step toward the tail
//! and the sample in the last slot is discarded.  Slots start out empty and
//! stay empty until the rotation reaches them, so consumers only ever see
//! filled entries through [`HistoryLog::snapshot`].
//!
//! Ordering is by insertion, never by timestamp: a sample recorded with an
//! older wall-clock time (e.g. after an RTC correction) is still the newest.
//!
//! ```text
//!  record(E)          slot: 0    1    2   ...  cap-1
//!                    ┌────┬────┬────┬───┬─────┐
//!  before            │ D  │ C  │ B  │ … │  A  │
//!                    └────┴────┴────┴───┴─────┘
//!                    ┌────┬────┬────┬───┬─────┐
//!  after             │ E  │ D  │ C  │ … │  B  │   (A evicted when full)
//!                    └────┴────┴────┴───┴─────┘
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Upper bound for the configurable capacity (stack-allocated slots).
pub const MAX_HISTORY_CAPACITY: usize = 64;

/// Capacity used when no configuration overrides it.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// A committed sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Air temperature (Celsius).
    pub temperature: f32,
    /// Relative humidity (%).
    pub humidity: f32,
    /// Wall-clock time the sample was taken.
    pub timestamp: NaiveDateTime,
}

/// Point-in-time copy of the filled history slots, newest first.
pub type HistorySnapshot = heapless::Vec<HistoryEntry, MAX_HISTORY_CAPACITY>;

/// Fixed-capacity, rotation-based sample log.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    slots: heapless::Vec<Option<HistoryEntry>, MAX_HISTORY_CAPACITY>,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryLog {
    /// Create an empty log.  `capacity` is clamped to
    /// `1..=MAX_HISTORY_CAPACITY`; configuration validation rejects
    /// anything outside that range before it gets here.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_HISTORY_CAPACITY);
        let mut slots = heapless::Vec::new();
        slots.resize(capacity, None).ok();
        Self { slots }
    }

    /// Insert `entry` at the head, evicting the tail sample when full.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.slots.rotate_right(1);
        self.slots[0] = Some(entry);
    }

    /// Copy out every filled slot, newest first.
    pub fn snapshot(&self) -> HistorySnapshot {
        self.slots.iter().flatten().copied().collect()
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<HistoryEntry> {
        self.slots[0]
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Maximum number of retained samples.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
