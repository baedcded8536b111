//! Sunrise/sunset selection
//!
//! The companion supplies sunrise and sunset as minutes since local
//! midnight. Every tick the face picks one of them and shows how far away
//! it is as `{sign}{hours}:{minutes:02}`.

use core::fmt::Write;

use heapless::String;

use crate::config::SunDeltaMode;
use crate::error::Error;

pub const MINUTES_PER_DAY: i16 = 1440;

/// An event this close behind us (in minutes) keeps being shown
pub const RECENT_EVENT_WINDOW: i16 = 120;

/// Raw value meaning "no data" on the wire and in storage
pub const SENTINEL: i32 = -1;

/// Widest delta: "+23:59"
pub const SUN_TEXT_LEN: usize = 6;

pub type SunText = String<SUN_TEXT_LEN>;

/// Minutes since midnight of one solar event, if known
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolarTime(Option<u16>);

impl SolarTime {
    pub const UNKNOWN: Self = Self(None);

    /// Known event time; fails outside 0..=1439
    pub fn from_minutes(minutes: u16) -> Result<Self, Error> {
        if minutes < MINUTES_PER_DAY as u16 {
            Ok(Self(Some(minutes)))
        } else {
            Err(Error::OutOfRange(minutes as i32))
        }
    }

    /// Decode a stored or received integer, where `-1` means unknown
    pub fn from_raw(raw: i32) -> Result<Self, Error> {
        match raw {
            SENTINEL => Ok(Self::UNKNOWN),
            0..=1439 => Ok(Self(Some(raw as u16))),
            _ => Err(Error::OutOfRange(raw)),
        }
    }

    /// Integer form for storage, `-1` when unknown
    pub fn to_raw(self) -> i32 {
        self.0.map_or(SENTINEL, i32::from)
    }

    pub fn minutes(self) -> Option<u16> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunEvent {
    Sunrise,
    Sunset,
}

/// The event chosen for display and `now - event` in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunDelta {
    pub event: SunEvent,
    pub minutes: i16,
}

impl SunDelta {
    /// Render the delta for the sun region.
    ///
    /// Compatible mode prints `+` for a positive delta (event already
    /// passed) and a space otherwise. Corrected mode prints `-` for an
    /// upcoming event and `+` for a passed one.
    pub fn format(&self, mode: SunDeltaMode) -> Result<SunText, Error> {
        let sign = match (mode, self.minutes) {
            (_, m) if m > 0 => '+',
            (SunDeltaMode::Corrected, m) if m < 0 => '-',
            _ => ' ',
        };
        let magnitude = self.minutes.unsigned_abs();

        let mut text = SunText::new();
        write!(text, "{}{}:{:02}", sign, magnitude / 60, magnitude % 60)?;
        Ok(text)
    }
}

/// The two event times the companion keeps us supplied with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolarTimes {
    pub sunrise: SolarTime,
    pub sunset: SolarTime,
}

impl SolarTimes {
    pub fn new(sunrise: SolarTime, sunset: SolarTime) -> Self {
        Self { sunrise, sunset }
    }

    /// Pick the event to show at `now` (minutes since midnight).
    ///
    /// Returns `None` while either time is unknown; the caller leaves the
    /// previous text on screen in that case.
    pub fn select(&self, now: u16, mode: SunDeltaMode) -> Option<SunDelta> {
        let sunrise = self.sunrise.minutes()? as i16;
        let sunset = self.sunset.minutes()? as i16;
        let now = now as i16;

        Some(match mode {
            SunDeltaMode::Compatible => select_compatible(now, sunrise, sunset),
            SunDeltaMode::Corrected => select_corrected(now, sunrise, sunset),
        })
    }
}

/// Event selection as the watch face has always done it.
///
/// Only the last rule wraps to the next day. Since the first two rules
/// already take every delta below the window, the two negative-delta rules
/// can never match; they stay so the order reads the same as on the watch.
pub fn select_compatible(now: i16, sunrise: i16, sunset: i16) -> SunDelta {
    let since_sunrise = now - sunrise;
    let since_sunset = now - sunset;

    let (event, minutes) = if since_sunrise < RECENT_EVENT_WINDOW {
        (SunEvent::Sunrise, since_sunrise)
    } else if since_sunset < RECENT_EVENT_WINDOW {
        (SunEvent::Sunset, since_sunset)
    } else if since_sunrise < 0 {
        (SunEvent::Sunrise, since_sunrise)
    } else if since_sunset < 0 {
        (SunEvent::Sunset, since_sunset)
    } else {
        (SunEvent::Sunrise, since_sunrise - MINUTES_PER_DAY)
    };

    SunDelta { event, minutes }
}

/// Nearest event on the 24 hour circle, deltas in (-720, 720]
pub fn select_corrected(now: i16, sunrise: i16, sunset: i16) -> SunDelta {
    let since_sunrise = wrap_half_day(now - sunrise);
    let since_sunset = wrap_half_day(now - sunset);

    if since_sunset.unsigned_abs() < since_sunrise.unsigned_abs() {
        SunDelta {
            event: SunEvent::Sunset,
            minutes: since_sunset,
        }
    } else {
        SunDelta {
            event: SunEvent::Sunrise,
            minutes: since_sunrise,
        }
    }
}

fn wrap_half_day(delta: i16) -> i16 {
    let wrapped = delta.rem_euclid(MINUTES_PER_DAY);
    if wrapped > MINUTES_PER_DAY / 2 {
        wrapped - MINUTES_PER_DAY
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(sunrise: i32, sunset: i32) -> SolarTimes {
        SolarTimes::new(
            SolarTime::from_raw(sunrise).unwrap(),
            SolarTime::from_raw(sunset).unwrap(),
        )
    }

    fn shown(now: u16, sunrise: i32, sunset: i32) -> Option<(SunEvent, std::string::String)> {
        times(sunrise, sunset)
            .select(now, SunDeltaMode::Compatible)
            .map(|d| (d.event, d.format(SunDeltaMode::Compatible).unwrap().as_str().into()))
    }

    #[test]
    fn compatible_selection_table() {
        use SunEvent::*;
        // (now, sunrise, sunset, event, minutes)
        let cases: &[(i16, i16, i16, SunEvent, i16)] = &[
            // sunrise less than two hours ago
            (420, 390, 1080, Sunrise, 30),
            // sunrise still ahead
            (0, 360, 1080, Sunrise, -360),
            (359, 360, 1080, Sunrise, -1),
            (360, 360, 1080, Sunrise, 0),
            (509, 390, 1080, Sunrise, 119),
            // exactly two hours after sunrise falls through to sunset
            (510, 390, 1080, Sunset, -570),
            (1000, 390, 1080, Sunset, -80),
            (1100, 390, 1080, Sunset, 20),
            (1199, 390, 1080, Sunset, 119),
            // exactly two hours after sunset wraps to tomorrow's sunrise
            (1200, 390, 1080, Sunrise, 810 - 1440),
            (1439, 390, 1080, Sunrise, 1049 - 1440),
        ];

        for &(now, sunrise, sunset, event, minutes) in cases {
            assert_eq!(
                select_compatible(now, sunrise, sunset),
                SunDelta { event, minutes },
                "now={now} sunrise={sunrise} sunset={sunset}"
            );
        }
    }

    #[test]
    fn compatible_selection_is_pure() {
        for now in (0..1440).step_by(7) {
            let first = select_compatible(now, 390, 1080);
            let second = select_compatible(now, 390, 1080);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn negative_delta_rules_never_decide() {
        // Whatever the inputs, a delta picked by the middle rules would
        // already have been picked by the window rules.
        for now in (0..1440).step_by(13) {
            for sunrise in (0..1440).step_by(37) {
                for sunset in (0..1440).step_by(41) {
                    let delta = select_compatible(now, sunrise, sunset);
                    let expected = if now - sunrise < RECENT_EVENT_WINDOW {
                        now - sunrise
                    } else if now - sunset < RECENT_EVENT_WINDOW {
                        now - sunset
                    } else {
                        now - sunrise - MINUTES_PER_DAY
                    };
                    assert_eq!(delta.minutes, expected);
                }
            }
        }
    }

    #[test]
    fn scenario_sunrise_half_hour_ago() {
        assert_eq!(shown(420, 390, 1080), Some((SunEvent::Sunrise, "+0:30".into())));
    }

    #[test]
    fn scenario_midnight_before_sunrise() {
        assert_eq!(shown(0, 360, 1080), Some((SunEvent::Sunrise, " 6:00".into())));
    }

    #[test]
    fn unknown_time_selects_nothing() {
        assert_eq!(shown(420, -1, 1080), None);
        assert_eq!(shown(420, 390, -1), None);
        assert_eq!(shown(420, -1, -1), None);
    }

    #[test]
    fn format_sign_rule() {
        let fmt = |minutes| {
            SunDelta {
                event: SunEvent::Sunrise,
                minutes,
            }
            .format(SunDeltaMode::Compatible)
            .unwrap()
        };
        assert_eq!(fmt(0), " 0:00");
        assert_eq!(fmt(1), "+0:01");
        assert_eq!(fmt(-1), " 0:01");
        assert_eq!(fmt(125), "+2:05");
        assert_eq!(fmt(-1439), " 23:59");
        assert_eq!(fmt(1439), "+23:59");
    }

    #[test]
    fn widest_delta_fits() {
        for minutes in -1439..=1439 {
            let delta = SunDelta {
                event: SunEvent::Sunset,
                minutes,
            };
            assert!(delta.format(SunDeltaMode::Compatible).is_ok());
            assert!(delta.format(SunDeltaMode::Corrected).is_ok());
        }
    }

    #[test]
    fn corrected_mode_picks_nearest_on_circle() {
        // 23:00, sunrise 06:30 tomorrow is 7:30 away, sunset 18:00 was 5:00 ago
        let delta = select_corrected(1380, 390, 1080);
        assert_eq!(delta, SunDelta { event: SunEvent::Sunset, minutes: 300 });

        // 02:00, sunrise 4:30 ahead beats sunset 8:00 behind
        let delta = select_corrected(120, 390, 1080);
        assert_eq!(delta, SunDelta { event: SunEvent::Sunrise, minutes: -270 });
        assert_eq!(delta.format(SunDeltaMode::Corrected).unwrap(), "-4:30");
    }

    #[test]
    fn raw_round_trip_and_range() {
        assert_eq!(SolarTime::from_raw(-1).unwrap(), SolarTime::UNKNOWN);
        assert_eq!(SolarTime::from_raw(1439).unwrap().to_raw(), 1439);
        assert_eq!(SolarTime::UNKNOWN.to_raw(), SENTINEL);
        assert_eq!(SolarTime::from_raw(1440), Err(Error::OutOfRange(1440)));
        assert_eq!(SolarTime::from_raw(-2), Err(Error::OutOfRange(-2)));
        assert_eq!(SolarTime::from_minutes(1440), Err(Error::OutOfRange(1440)));
    }
}
