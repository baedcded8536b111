//! Watch face configuration

/// How the sun region chooses and signs its delta
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SunDeltaMode {
    /// Original watch face behaviour: `+` means the event has passed, and
    /// only the final rule wraps to tomorrow's sunrise.
    #[default]
    Compatible,
    /// Nearest event on the 24 hour circle, `-` for upcoming events.
    Corrected,
}

/// Source of the user's 12h/24h preference, consulted on every tick
pub trait ClockSettings {
    fn clock_is_24h_style(&self) -> bool;
}

impl ClockSettings for bool {
    fn clock_is_24h_style(&self) -> bool {
        *self
    }
}

/// Settings the firmware hands to the watch face at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchConfig {
    pub sun_mode: SunDeltaMode,
    /// Clock style used until the companion writes a preference
    pub default_clock_24h: bool,
    /// Backlight level between 0 (off) and 7
    pub backlight_level: u8,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            sun_mode: SunDeltaMode::Compatible,
            default_clock_24h: true,
            backlight_level: 2,
        }
    }
}
