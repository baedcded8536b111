//! Day, date and clock text for the watch face
//!
//! All text lands in fixed-capacity buffers sized for the widest value the
//! field can take, so a valid timestamp can never overflow them.

use core::fmt::Write;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use heapless::String;

use crate::error::Error;

/// Widest weekday name: "Wednesday"
pub const DAY_TEXT_LEN: usize = 9;
/// Widest date: "September 30"
pub const DATE_TEXT_LEN: usize = 12;
/// Clock: "00:00"
pub const TIME_TEXT_LEN: usize = 5;

pub type DayText = String<DAY_TEXT_LEN>;
pub type DateText = String<DATE_TEXT_LEN>;
pub type TimeText = String<TIME_TEXT_LEN>;

/// Full English weekday name
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full English month name for a zero-based month
pub fn month_name(month0: u32) -> Result<&'static str, Error> {
    Ok(match month0 {
        0 => "January",
        1 => "February",
        2 => "March",
        3 => "April",
        4 => "May",
        5 => "June",
        6 => "July",
        7 => "August",
        8 => "September",
        9 => "October",
        10 => "November",
        11 => "December",
        _ => return Err(Error::InvalidTime),
    })
}

/// Weekday line, e.g. "Thursday"
pub fn format_day(time: &NaiveDateTime) -> Result<DayText, Error> {
    let mut text = DayText::new();
    text.push_str(weekday_name(time.weekday()))
        .map_err(|_| Error::TextOverflow)?;
    Ok(text)
}

/// Month and day line, e.g. "October 15" or "October  5".
///
/// The day is space-padded to two columns so the line keeps its width
/// through the month.
pub fn format_date(time: &NaiveDateTime) -> Result<DateText, Error> {
    let mut text = DateText::new();
    write!(text, "{} {:>2}", month_name(time.month0())?, time.day())?;
    Ok(text)
}

/// Clock line.
///
/// 24-hour style is always zero padded ("07:05"). 12-hour style is
/// rendered padded and then loses a single leading zero, so hours 1–9
/// show one digit ("7:05") and 10–12 show two.
pub fn format_clock(time: &NaiveDateTime, is_24h: bool) -> Result<TimeText, Error> {
    let hour = if is_24h {
        time.hour()
    } else {
        time.hour12().1
    };

    let mut padded = TimeText::new();
    write!(padded, "{:02}:{:02}", hour, time.minute())?;

    if is_24h {
        return Ok(padded);
    }

    let mut text = TimeText::new();
    text.push_str(padded.strip_prefix('0').unwrap_or(padded.as_str()))
        .map_err(|_| Error::TextOverflow)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn weekday_names() {
        // 2026-10-15 is a Thursday
        assert_eq!(format_day(&at(2026, 10, 15, 9, 0)).unwrap(), "Thursday");
        assert_eq!(format_day(&at(2026, 10, 14, 9, 0)).unwrap(), "Wednesday");
        assert_eq!(format_day(&at(2026, 10, 18, 9, 0)).unwrap(), "Sunday");
    }

    #[test]
    fn date_pads_single_digit_days() {
        assert_eq!(format_date(&at(2026, 10, 5, 0, 0)).unwrap(), "October  5");
        assert_eq!(format_date(&at(2026, 10, 15, 0, 0)).unwrap(), "October 15");
        assert_eq!(format_date(&at(2026, 5, 1, 0, 0)).unwrap(), "May  1");
    }

    #[test]
    fn widest_date_fits() {
        let text = format_date(&at(2026, 9, 30, 0, 0)).unwrap();
        assert_eq!(text, "September 30");
        assert_eq!(text.len(), DATE_TEXT_LEN);
    }

    #[test]
    fn month_name_rejects_thirteenth_month() {
        assert_eq!(month_name(12), Err(Error::InvalidTime));
    }

    #[test]
    fn clock_24h_never_strips() {
        for hour in 0..24 {
            for minute in 0..60 {
                let text = format_clock(&at(2026, 1, 1, hour, minute), true).unwrap();
                assert_eq!(text.len(), 5);
                assert_eq!(text.as_str(), std::format!("{:02}:{:02}", hour, minute));
            }
        }
    }

    #[test]
    fn clock_12h_strips_one_leading_zero() {
        for hour in 0..24 {
            for minute in 0..60 {
                let text = format_clock(&at(2026, 1, 1, hour, minute), false).unwrap();
                let hour12 = match hour % 12 {
                    0 => 12,
                    h => h,
                };
                assert_eq!(text.as_str(), std::format!("{}:{:02}", hour12, minute));
                if hour12 < 10 {
                    assert_eq!(text.len(), 4);
                } else {
                    assert_eq!(text.len(), 5);
                }
            }
        }
    }

    #[test]
    fn clock_examples() {
        assert_eq!(format_clock(&at(2026, 1, 1, 0, 5), false).unwrap(), "12:05");
        assert_eq!(format_clock(&at(2026, 1, 1, 0, 5), true).unwrap(), "00:05");
        assert_eq!(format_clock(&at(2026, 1, 1, 13, 7), false).unwrap(), "1:07");
        assert_eq!(format_clock(&at(2026, 1, 1, 23, 59), true).unwrap(), "23:59");
    }
}
