//! Simplday watch face library - the parts of the PineTime firmware that
//! do not touch hardware.
//!
//! Day, date and clock formatting, the sunrise/sunset selector, the
//! companion tuple codec, solar time persistence and the watch face
//! controller all live here so they can be tested on the host. The binary
//! (`main.rs`) adds the nRF52832 tasks around them.
//!
//! # Testing
//!
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu
//! ```

// Tests need std for the harness; the firmware is no_std
#![cfg_attr(not(test), no_std)]

pub mod companion;
pub mod config;
pub mod error;
pub mod format;
pub mod solar;
pub mod storage;
pub mod time;
pub mod ui;
pub mod watch;

pub use config::{ClockSettings, SunDeltaMode, WatchConfig};
pub use error::{Error, SendError, StorageError};
pub use watch::{SunWatch, TickSource, WatchParts};
