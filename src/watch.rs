//! The sun watch face
//!
//! [`SunWatch`] owns every piece of mutable face state together with the
//! collaborators it talks to. The firmware keeps it inside a single task and
//! feeds it ticks and companion payloads one at a time, so nothing here is
//! shared.

use chrono::NaiveDateTime;

use crate::companion::{decode_tuples, CompanionLink, SolarUpdate};
use crate::config::{ClockSettings, WatchConfig};
use crate::error::SendError;
use crate::format::{format_clock, format_date, format_day, DateText, DayText, TimeText};
use crate::solar::{SolarTimes, SunText};
use crate::storage::{persist, KeyValueStore, PERSIST_SUNRISE, PERSIST_SUNSET};
use crate::time::{minute_of_day, TimeUnits};
use crate::ui::{DisplaySurface, Region};

/// Subscription to the minute tick
pub trait TickSource {
    /// Stop delivering ticks
    fn unsubscribe(&mut self);
}

/// Collaborators the face drives
pub struct WatchParts<D, L, S, T> {
    pub display: D,
    pub link: L,
    pub store: S,
    pub ticks: T,
}

/// Text currently on screen
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FaceTexts {
    pub day: DayText,
    pub date: DateText,
    pub time: TimeText,
    /// Stays `None` until solar data has been shown once
    pub sun: Option<SunText>,
}

pub struct SunWatch<D, L, S, T>
where
    D: DisplaySurface,
    L: CompanionLink,
    S: KeyValueStore,
    T: TickSource,
{
    parts: WatchParts<D, L, S, T>,
    config: WatchConfig,
    solar: SolarTimes,
    /// Minute of day of the last tick
    now: u16,
    texts: FaceTexts,
}

impl<D, L, S, T> SunWatch<D, L, S, T>
where
    D: DisplaySurface,
    L: CompanionLink,
    S: KeyValueStore,
    T: TickSource,
{
    /// Bring the face up.
    ///
    /// Loads cached solar times, draws the divider and runs a first tick with
    /// every unit marked as changed. That tick also sends the startup request
    /// for fresh solar data.
    pub fn init<C: ClockSettings>(
        parts: WatchParts<D, L, S, T>,
        config: WatchConfig,
        now: &NaiveDateTime,
        settings: &C,
    ) -> Self {
        let solar = SolarTimes::load(&parts.store);
        log::info!(
            "Cached solar times: sunrise {} sunset {}",
            solar.sunrise.to_raw(),
            solar.sunset.to_raw()
        );

        let mut watch = Self {
            parts,
            config,
            solar,
            now: minute_of_day(now),
            texts: FaceTexts::default(),
        };

        watch.parts.display.draw_divider();
        watch.handle_tick(now, TimeUnits::ALL, settings);
        watch
    }

    /// Minute tick from the clock
    pub fn handle_tick<C: ClockSettings>(
        &mut self,
        now: &NaiveDateTime,
        units_changed: TimeUnits,
        settings: &C,
    ) {
        if units_changed.contains(TimeUnits::DAY) {
            self.update_day(now);
            self.request_solar_data();
        }

        match format_clock(now, settings.clock_is_24h_style()) {
            Ok(text) => {
                self.parts.display.set_text(Region::Time, &text);
                self.texts.time = text;
            }
            Err(err) => log::error!("Clock text: {}", err),
        }

        self.now = minute_of_day(now);
        self.refresh_sun();
    }

    /// New solar time from the companion; persisted straight away
    pub fn handle_update(&mut self, update: SolarUpdate) {
        match update {
            SolarUpdate::Sunrise(time) => {
                log::info!("Sunrise updated to {}", time.to_raw());
                self.solar.sunrise = time;
                persist(&mut self.parts.store, PERSIST_SUNRISE, time);
            }
            SolarUpdate::Sunset(time) => {
                log::info!("Sunset updated to {}", time.to_raw());
                self.solar.sunset = time;
                persist(&mut self.parts.store, PERSIST_SUNSET, time);
            }
        }

        self.refresh_sun();
    }

    /// Raw companion write: apply every tuple that decodes
    pub fn handle_payload(&mut self, payload: &[u8]) {
        for tuple in decode_tuples(payload) {
            match tuple.and_then(SolarUpdate::from_tuple) {
                Ok(update) => self.handle_update(update),
                Err(err) => log::warn!("Ignoring companion tuple: {}", err),
            }
        }
    }

    /// Tear the face down and hand the collaborators back.
    ///
    /// Nothing is persisted here; every update was written when it arrived.
    pub fn deinit(mut self) -> WatchParts<D, L, S, T> {
        self.parts.ticks.unsubscribe();
        for region in [Region::Time, Region::Date, Region::Day, Region::Sun] {
            self.parts.display.destroy_region(region);
        }
        self.parts.display.destroy_divider();
        self.parts
    }

    pub fn texts(&self) -> &FaceTexts {
        &self.texts
    }

    pub fn solar(&self) -> SolarTimes {
        self.solar
    }

    pub fn parts(&self) -> &WatchParts<D, L, S, T> {
        &self.parts
    }

    fn update_day(&mut self, now: &NaiveDateTime) {
        match format_day(now) {
            Ok(text) => {
                self.parts.display.set_text(Region::Day, &text);
                self.texts.day = text;
            }
            Err(err) => log::error!("Day text: {}", err),
        }

        match format_date(now) {
            Ok(text) => {
                self.parts.display.set_text(Region::Date, &text);
                self.texts.date = text;
            }
            Err(err) => log::error!("Date text: {}", err),
        }
    }

    fn request_solar_data(&mut self) {
        match self.parts.link.request_solar_data() {
            Ok(()) => log::debug!("Requested solar data"),
            Err(SendError::NoBuffer) => {}
            Err(err) => log::warn!("Solar data request failed: {}", err),
        }
    }

    fn refresh_sun(&mut self) {
        let mode = self.config.sun_mode;
        // Unknown times leave whatever is on screen alone
        let Some(delta) = self.solar.select(self.now, mode) else {
            return;
        };

        match delta.format(mode) {
            Ok(text) => {
                self.parts.display.set_text(Region::Sun, &text);
                self.texts.sun = Some(text);
            }
            Err(err) => log::error!("Sun text: {}", err),
        }
    }
}
