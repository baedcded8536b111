//! Forward `log` records from the watch face library to defmt

use core::fmt::Write;

use heapless::String;
use log::{Level, LevelFilter, Metadata, Record};

/// Longest forwarded message; the rest is cut off
const LINE_LEN: usize = 96;

struct DefmtLogger;

static LOGGER: DefmtLogger = DefmtLogger;

impl log::Log for DefmtLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let mut line: String<LINE_LEN> = String::new();
        // A message longer than the line is sent truncated
        let _ = write!(line, "{}", record.args());

        match record.level() {
            Level::Error => defmt::error!("{=str}", line.as_str()),
            Level::Warn => defmt::warn!("{=str}", line.as_str()),
            Level::Info => defmt::info!("{=str}", line.as_str()),
            Level::Debug => defmt::debug!("{=str}", line.as_str()),
            Level::Trace => defmt::trace!("{=str}", line.as_str()),
        }
    }

    fn flush(&self) {}
}

pub fn init() {
    match log::set_logger(&LOGGER) {
        Ok(()) => log::set_max_level(LevelFilter::Debug),
        Err(_) => defmt::warn!("Logger already installed"),
    }
}
