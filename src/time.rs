//! Tick bookkeeping and Current Time Service decoding

use core::ops::BitOr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::Error;

/// Length of a Bluetooth Current Time Service record
pub const CTS_LEN: usize = 10;

/// Calendar units that changed between two ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeUnits(u8);

impl TimeUnits {
    pub const NONE: Self = Self(0);
    pub const SECOND: Self = Self(1 << 0);
    pub const MINUTE: Self = Self(1 << 1);
    pub const HOUR: Self = Self(1 << 2);
    pub const DAY: Self = Self(1 << 3);
    pub const MONTH: Self = Self(1 << 4);
    pub const YEAR: Self = Self(1 << 5);
    /// Everything changed, used for the first tick after boot
    pub const ALL: Self = Self(0x3f);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Units that differ between `prev` and `now`
    pub fn changed(prev: &NaiveDateTime, now: &NaiveDateTime) -> Self {
        let mut units = Self::NONE;
        if prev.second() != now.second() {
            units = units | Self::SECOND;
        }
        if prev.minute() != now.minute() {
            units = units | Self::MINUTE;
        }
        if prev.hour() != now.hour() {
            units = units | Self::HOUR;
        }
        if prev.date() != now.date() {
            units = units | Self::DAY;
        }
        if prev.year() != now.year() || prev.month() != now.month() {
            units = units | Self::MONTH;
        }
        if prev.year() != now.year() {
            units = units | Self::YEAR;
        }
        units
    }
}

impl BitOr for TimeUnits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Minutes since local midnight, 0..=1439
pub fn minute_of_day(time: &NaiveDateTime) -> u16 {
    (time.hour() * 60 + time.minute()) as u16
}

/// Decode a Current Time Service record.
///
/// Layout: year (u16 LE), month, day, hours, minutes, seconds, day of week,
/// fractions of 1/256 s, adjust reason. Day of week and adjust reason are
/// ignored.
pub fn decode_cts(bytes: &[u8]) -> Result<NaiveDateTime, Error> {
    if bytes.len() < CTS_LEN {
        return Err(Error::Truncated);
    }

    let year = u16::from_le_bytes([bytes[0], bytes[1]]) as i32;
    let month = bytes[2] as u32;
    let day = bytes[3] as u32;
    let hour = bytes[4] as u32;
    let min = bytes[5] as u32;
    let sec = bytes[6] as u32;
    // Convert fractions_256 to milliseconds
    let milli = bytes[8] as u32 * 1000 / 256;

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_milli_opt(hour, min, sec, milli))
        .ok_or(Error::InvalidTime)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn minute_tick_within_hour() {
        let units = TimeUnits::changed(&at(2026, 10, 15, 9, 0, 0), &at(2026, 10, 15, 9, 1, 0));
        assert!(units.contains(TimeUnits::MINUTE));
        assert!(!units.contains(TimeUnits::HOUR));
        assert!(!units.contains(TimeUnits::DAY));
    }

    #[test]
    fn midnight_changes_day() {
        let units = TimeUnits::changed(
            &at(2026, 10, 15, 23, 59, 0),
            &at(2026, 10, 16, 0, 0, 0),
        );
        assert!(units.contains(TimeUnits::MINUTE | TimeUnits::HOUR | TimeUnits::DAY));
        assert!(!units.contains(TimeUnits::MONTH));
    }

    #[test]
    fn new_year_changes_everything_above_seconds() {
        let units = TimeUnits::changed(
            &at(2026, 12, 31, 23, 59, 0),
            &at(2027, 1, 1, 0, 0, 0),
        );
        assert_eq!(
            units,
            TimeUnits::MINUTE | TimeUnits::HOUR | TimeUnits::DAY | TimeUnits::MONTH | TimeUnits::YEAR
        );
    }

    #[test]
    fn same_time_changes_nothing() {
        let t = at(2026, 10, 15, 9, 0, 0);
        assert!(TimeUnits::changed(&t, &t).is_empty());
        assert!(TimeUnits::ALL.contains(TimeUnits::DAY));
    }

    #[test]
    fn minute_of_day_bounds() {
        assert_eq!(minute_of_day(&at(2026, 1, 1, 0, 0, 0)), 0);
        assert_eq!(minute_of_day(&at(2026, 1, 1, 7, 0, 0)), 420);
        assert_eq!(minute_of_day(&at(2026, 1, 1, 23, 59, 59)), 1439);
    }

    #[test]
    fn cts_record_decodes() {
        let year = 2026u16.to_le_bytes();
        let bytes = [year[0], year[1], 10, 15, 14, 30, 5, 4, 128, 0];
        let time = decode_cts(&bytes).unwrap();
        assert_eq!(time.date(), NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
        assert_eq!((time.hour(), time.minute(), time.second()), (14, 30, 5));
        assert_eq!(time.nanosecond(), 500_000_000);
    }

    #[test]
    fn cts_rejects_short_and_invalid_records() {
        assert_eq!(decode_cts(&[0xea, 0x07, 10]), Err(Error::Truncated));
        let year = 2026u16.to_le_bytes();
        // Missing the adjust reason byte
        assert_eq!(
            decode_cts(&[year[0], year[1], 10, 15, 9, 30, 0, 4, 0]),
            Err(Error::Truncated)
        );
        assert_eq!(
            decode_cts(&[year[0], year[1], 13, 1, 0, 0, 0, 0, 0, 0]),
            Err(Error::InvalidTime)
        );
        assert_eq!(
            decode_cts(&[year[0], year[1], 2, 30, 0, 0, 0, 0, 0, 0]),
            Err(Error::InvalidTime)
        );
    }
}
