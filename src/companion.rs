//! Companion channel: tuple codec and the outbound link
//!
//! The phone app talks to the watch in small tuples of a one-byte key and a
//! little-endian `i32`. A single write may carry several tuples.

use crate::error::{Error, SendError};
use crate::solar::SolarTime;

/// Inbound: sunrise in minutes since midnight
pub const KEY_SUNRISE: u8 = 0;
/// Inbound: sunset in minutes since midnight
pub const KEY_SUNSET: u8 = 1;
/// Outbound: ask the companion for fresh solar data
pub const KEY_REQUEST: u8 = 1;
pub const REQUEST_VALUE: i32 = 1;

/// Encoded size of one tuple
pub const TUPLE_LEN: usize = 5;

/// One key/value pair on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuple {
    pub key: u8,
    pub value: i32,
}

impl Tuple {
    pub const fn new(key: u8, value: i32) -> Self {
        Self { key, value }
    }

    /// The tuple sent to ask for new sunrise/sunset times
    pub const fn request() -> Self {
        Self::new(KEY_REQUEST, REQUEST_VALUE)
    }

    pub fn encode(&self) -> [u8; TUPLE_LEN] {
        let value = self.value.to_le_bytes();
        [self.key, value[0], value[1], value[2], value[3]]
    }
}

/// Iterate the tuples in a companion write.
///
/// A trailing partial tuple yields one `Error::Truncated` and ends the
/// iteration.
pub fn decode_tuples(payload: &[u8]) -> impl Iterator<Item = Result<Tuple, Error>> + '_ {
    payload.chunks(TUPLE_LEN).map(|chunk| match *chunk {
        [key, a, b, c, d] => Ok(Tuple::new(key, i32::from_le_bytes([a, b, c, d]))),
        _ => Err(Error::Truncated),
    })
}

/// A solar time received from the companion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarUpdate {
    Sunrise(SolarTime),
    Sunset(SolarTime),
}

impl SolarUpdate {
    /// Map an inbound tuple onto the event it updates
    pub fn from_tuple(tuple: Tuple) -> Result<Self, Error> {
        let time = SolarTime::from_raw(tuple.value)?;
        match tuple.key {
            KEY_SUNRISE => Ok(Self::Sunrise(time)),
            KEY_SUNSET => Ok(Self::Sunset(time)),
            key => Err(Error::UnknownKey(key)),
        }
    }
}

/// Outbound half of the companion channel
pub trait CompanionLink {
    /// Ask for fresh solar data. Fire and forget: nothing is awaited and
    /// nothing is retried.
    fn request_solar_data(&mut self) -> Result<(), SendError>;
}

/// Requests queued for one companion connection.
///
/// Notifications only reach a companion that has subscribed to them, so a
/// request made before that waits here. Only the latest request is kept.
#[derive(Debug, Default)]
pub struct RequestOutbox {
    pending: Option<Tuple>,
    subscribed: bool,
}

impl RequestOutbox {
    pub const fn new() -> Self {
        Self {
            pending: None,
            subscribed: false,
        }
    }

    pub fn push(&mut self, request: Tuple) {
        self.pending = Some(request);
    }

    /// Companion turned notifications on or off
    pub fn set_subscribed(&mut self, subscribed: bool) {
        self.subscribed = subscribed;
    }

    /// The request to notify now, if the companion is listening
    pub fn take_ready(&mut self) -> Option<Tuple> {
        if self.subscribed {
            self.pending.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbox_holds_request_until_subscribed() {
        let mut outbox = RequestOutbox::new();
        outbox.push(Tuple::request());
        assert_eq!(outbox.take_ready(), None);

        outbox.set_subscribed(true);
        assert_eq!(outbox.take_ready(), Some(Tuple::request()));
        assert_eq!(outbox.take_ready(), None);
    }

    #[test]
    fn outbox_keeps_latest_request() {
        let mut outbox = RequestOutbox::new();
        outbox.push(Tuple::new(KEY_REQUEST, 7));
        outbox.push(Tuple::request());
        outbox.set_subscribed(true);
        assert_eq!(outbox.take_ready(), Some(Tuple::request()));
    }

    #[test]
    fn outbox_waits_again_after_unsubscribe() {
        let mut outbox = RequestOutbox::new();
        outbox.set_subscribed(true);
        outbox.set_subscribed(false);
        outbox.push(Tuple::request());
        assert_eq!(outbox.take_ready(), None);

        // failed notification goes back in
        outbox.set_subscribed(true);
        let request = outbox.take_ready().unwrap();
        outbox.push(request);
        assert_eq!(outbox.take_ready(), Some(Tuple::request()));
    }

    #[test]
    fn request_tuple_encoding() {
        assert_eq!(Tuple::request().encode(), [1, 1, 0, 0, 0]);
    }

    #[test]
    fn decodes_back_to_back_tuples() {
        let mut payload = [0u8; 10];
        payload[..5].copy_from_slice(&Tuple::new(KEY_SUNRISE, 390).encode());
        payload[5..].copy_from_slice(&Tuple::new(KEY_SUNSET, 1080).encode());

        let tuples: std::vec::Vec<_> = decode_tuples(&payload).collect();
        assert_eq!(
            tuples,
            [Ok(Tuple::new(0, 390)), Ok(Tuple::new(1, 1080))]
        );
    }

    #[test]
    fn trailing_bytes_are_truncated() {
        let mut payload = [0u8; 7];
        payload[..5].copy_from_slice(&Tuple::new(KEY_SUNSET, -1).encode());

        let tuples: std::vec::Vec<_> = decode_tuples(&payload).collect();
        assert_eq!(tuples, [Ok(Tuple::new(1, -1)), Err(Error::Truncated)]);
    }

    #[test]
    fn empty_payload_has_no_tuples() {
        assert_eq!(decode_tuples(&[]).count(), 0);
    }

    #[test]
    fn updates_from_tuples() {
        assert_eq!(
            SolarUpdate::from_tuple(Tuple::new(0, 390)),
            Ok(SolarUpdate::Sunrise(SolarTime::from_minutes(390).unwrap()))
        );
        assert_eq!(
            SolarUpdate::from_tuple(Tuple::new(1, -1)),
            Ok(SolarUpdate::Sunset(SolarTime::UNKNOWN))
        );
        assert_eq!(
            SolarUpdate::from_tuple(Tuple::new(7, 390)),
            Err(Error::UnknownKey(7))
        );
        assert_eq!(
            SolarUpdate::from_tuple(Tuple::new(0, 1500)),
            Err(Error::OutOfRange(1500))
        );
    }
}
