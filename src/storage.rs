//! Durable key-value storage for the solar times
//!
//! The face keeps the last sunrise/sunset it heard about so it has
//! something to show after a reboot before the companion answers.

use heapless::FnvIndexMap;

use crate::error::StorageError;
use crate::solar::{SolarTime, SolarTimes, SENTINEL};

pub const PERSIST_SUNRISE: u32 = 0;
pub const PERSIST_SUNSET: u32 = 1;

/// Integer slots addressed by fixed numeric keys
pub trait KeyValueStore {
    fn read_i32(&self, key: u32) -> Option<i32>;
    fn write_i32(&mut self, key: u32, value: i32) -> Result<(), StorageError>;
}

/// In-RAM store; the firmware uses it as the mirror of its flash pages
#[derive(Default)]
pub struct MemoryStore {
    slots: FnvIndexMap<u32, i32, 8>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            slots: FnvIndexMap::new(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn read_i32(&self, key: u32) -> Option<i32> {
        self.slots.get(&key).copied()
    }

    fn write_i32(&mut self, key: u32, value: i32) -> Result<(), StorageError> {
        self.slots
            .insert(key, value)
            .map(|_| ())
            .map_err(|_| StorageError::Full)
    }
}

impl SolarTimes {
    /// Read both times, falling back to unknown when a slot is absent or
    /// holds garbage.
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        let read = |key| {
            let raw = store.read_i32(key).unwrap_or(SENTINEL);
            SolarTime::from_raw(raw).unwrap_or_else(|_| {
                log::warn!("Discarding stored solar time {} under key {}", raw, key);
                SolarTime::UNKNOWN
            })
        };

        Self {
            sunrise: read(PERSIST_SUNRISE),
            sunset: read(PERSIST_SUNSET),
        }
    }
}

/// Write one solar time under its key
pub fn persist<S: KeyValueStore>(store: &mut S, key: u32, time: SolarTime) {
    if let Err(err) = store.write_i32(key, time.to_raw()) {
        log::warn!("Failed to persist solar time under key {}: {}", key, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_unknown() {
        let store = MemoryStore::new();
        assert_eq!(store.read_i32(PERSIST_SUNRISE), None);

        let times = SolarTimes::load(&store);
        assert_eq!(times.sunrise.to_raw(), SENTINEL);
        assert_eq!(times.sunset.to_raw(), SENTINEL);
    }

    #[test]
    fn persisted_values_survive_reload() {
        let mut store = MemoryStore::new();
        persist(&mut store, PERSIST_SUNRISE, SolarTime::from_minutes(391).unwrap());
        persist(&mut store, PERSIST_SUNSET, SolarTime::from_minutes(1079).unwrap());

        let times = SolarTimes::load(&store);
        assert_eq!(times.sunrise.to_raw(), 391);
        assert_eq!(times.sunset.to_raw(), 1079);
    }

    #[test]
    fn overwrite_keeps_latest() {
        let mut store = MemoryStore::new();
        store.write_i32(PERSIST_SUNSET, 1000).unwrap();
        store.write_i32(PERSIST_SUNSET, 1001).unwrap();
        assert_eq!(store.read_i32(PERSIST_SUNSET), Some(1001));
    }

    #[test]
    fn garbage_in_store_reads_as_unknown() {
        let mut store = MemoryStore::new();
        store.write_i32(PERSIST_SUNRISE, 5000).unwrap();
        store.write_i32(PERSIST_SUNSET, 1080).unwrap();

        let times = SolarTimes::load(&store);
        assert_eq!(times.sunrise, SolarTime::UNKNOWN);
        assert_eq!(times.sunset.minutes(), Some(1080));
    }

    #[test]
    fn store_reports_when_full() {
        let mut store = MemoryStore::new();
        for key in 0..8 {
            store.write_i32(key, 0).unwrap();
        }
        assert_eq!(store.write_i32(100, 0), Err(StorageError::Full));
    }
}
