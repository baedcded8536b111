//! Chip, bus and watch face configuration

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::Priority,
    spim,
};
use simplday::{SunDeltaMode, WatchConfig};

/// nRF52832 setup that leaves room for the SoftDevice
pub fn chip() -> Config {
    // Config is `non_exhaustive`, so start from the default
    let mut config = Config::default();

    // External crystals for both clocks
    config.hfclk_source = HfclkSource::ExternalXtal;
    config.lfclk_source = LfclkSource::ExternalXtal;

    // DC/DC regulator cuts runtime current consumption
    config.dcdc.reg1 = true;

    // Priorities 0, 1 and 4 belong to the SoftDevice
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;

    config.debug = Debug::Allowed;

    config
}

/// SPI bus to the ST7789
pub fn display_spi() -> spim::Config {
    let mut config = spim::Config::default();
    // 8MHz is the fastest the nRF52832 offers; anything slower makes
    // redraws visible
    config.frequency = spim::Frequency::M8;
    // The panel only answers in mode 3
    config.mode = spim::MODE_3;
    config
}

/// Watch face settings baked into this firmware
pub fn watch() -> WatchConfig {
    WatchConfig {
        sun_mode: SunDeltaMode::Compatible,
        default_clock_24h: true,
        backlight_level: 2,
    }
}
