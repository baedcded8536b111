//! Solar time cache in internal flash
//!
//! Reads go to a RAM mirror loaded once at boot. Writes update the mirror
//! and are queued for the persist task, which appends them to a
//! `sequential-storage` map in the last two flash pages.

use core::ops::Range;

use embedded_storage_async::nor_flash::NorFlash;
use nrf_softdevice::Flash;
use sequential_storage::{
    cache::NoCache,
    map::{fetch_item, store_item},
};
use simplday::{
    storage::{KeyValueStore, MemoryStore, PERSIST_SUNRISE, PERSIST_SUNSET},
    StorageError,
};

use crate::PERSIST;

/// Two 4 KiB pages at the end of the 512 KiB flash, kept out of `memory.x`
const STORAGE_RANGE: Range<u32> = 0x0007_E000..0x0008_0000;

/// Scratch space for one map item
const BUF_LEN: usize = 32;

pub struct FlashStore {
    mirror: MemoryStore,
}

impl FlashStore {
    /// Load the solar time slots from flash on boot
    pub async fn load<F: NorFlash>(flash: &mut F) -> Self {
        let mut mirror = MemoryStore::new();
        let mut buf = [0u8; BUF_LEN];

        for key in [PERSIST_SUNRISE, PERSIST_SUNSET] {
            let item: Result<Option<i32>, _> = fetch_item(
                flash,
                STORAGE_RANGE,
                &mut NoCache::new(),
                &mut buf,
                &key,
            )
            .await;

            match item {
                Ok(Some(value)) => {
                    defmt::debug!("Flash slot {}: {}", key, value);
                    if mirror.write_i32(key, value).is_err() {
                        defmt::warn!("Mirror full, slot {} not loaded", key);
                    }
                }
                Ok(None) => defmt::debug!("Flash slot {} empty", key),
                Err(err) => defmt::warn!("Flash slot {} unreadable: {}", key, defmt::Debug2Format(&err)),
            }
        }

        Self { mirror }
    }
}

impl KeyValueStore for FlashStore {
    fn read_i32(&self, key: u32) -> Option<i32> {
        self.mirror.read_i32(key)
    }

    fn write_i32(&mut self, key: u32, value: i32) -> Result<(), StorageError> {
        self.mirror.write_i32(key, value)?;
        PERSIST
            .try_send((key, value))
            .map_err(|_| StorageError::Unavailable)
    }
}

/// Write queued slots to flash, one at a time
#[embassy_executor::task]
pub async fn persist_task(mut flash: Flash) {
    let mut buf = [0u8; BUF_LEN];

    loop {
        let (key, value) = PERSIST.receive().await;
        store_slot(&mut flash, &mut buf, key, value).await;
    }
}

async fn store_slot<F: NorFlash>(flash: &mut F, buf: &mut [u8], key: u32, value: i32) {
    let result = store_item(flash, STORAGE_RANGE, &mut NoCache::new(), buf, &key, &value).await;

    match result {
        Ok(()) => defmt::debug!("Persisted slot {}: {}", key, value),
        Err(err) => defmt::warn!("Persisting slot {} failed: {}", key, defmt::Debug2Format(&err)),
    }
}
