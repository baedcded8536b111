//! Error types shared by the watch face modules

use thiserror::Error;

/// Errors raised by formatting, decoding and validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Formatted text does not fit its display buffer
    #[error("text does not fit its display buffer")]
    TextOverflow,
    /// Payload ended in the middle of a record
    #[error("payload truncated")]
    Truncated,
    /// Companion sent a tuple with a key we do not know
    #[error("unknown tuple key {0}")]
    UnknownKey(u8),
    /// Solar time outside 0..=1439 that is not the sentinel
    #[error("value {0} out of range")]
    OutOfRange(i32),
    /// Date/time fields do not form a valid timestamp
    #[error("invalid date or time")]
    InvalidTime,
}

/// Durable store failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No free slot left for a new key
    #[error("store is full")]
    Full,
    /// Write could not be handed to the backing store
    #[error("backing store unavailable")]
    Unavailable,
}

/// Outbound companion message failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SendError {
    /// No send buffer available, message dropped
    #[error("no send buffer available")]
    NoBuffer,
    /// Link reported a failure
    #[error("send failed")]
    Failed,
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::TextOverflow
    }
}
