//! Simplday firmware for the PineTime
//!
//! Shows day, date, time and how far away sunrise or sunset is. Solar times
//! come from a companion app over BLE and are cached in internal flash.
//!
//! The firmware only builds for the nRF52832 (`thumbv7em-none-eabihf`);
//! on any other target this binary is an empty stub and the watch face
//! logic is exercised through the library tests.

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]

#[cfg(target_arch = "arm")]
mod peripherals;
#[cfg(target_arch = "arm")]
mod system;

#[cfg(target_arch = "arm")]
pub use firmware::{INBOUND, OUTBOUND, PERSIST, TIME_SYNC};

#[cfg(not(target_arch = "arm"))]
fn main() {}

#[cfg(target_arch = "arm")]
mod firmware {
    // Panic handler and debugging
    use defmt::unwrap;
    use defmt_rtt as _;
    use panic_probe as _;

    // Device
    use embassy_executor::Spawner;
    use embassy_futures::select::{select, Either};
    use embassy_nrf::{
        bind_interrupts,
        gpio::{Level, Output, OutputDrive, Pin},
        peripherals::SPI2,
        spim,
    };
    use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel, signal::Signal};
    use embassy_time::{Duration, Ticker};
    use nrf_softdevice::{Flash, Softdevice};
    use static_cell::StaticCell;

    // Crate
    use crate::peripherals::{backlight::Backlight, display};
    use crate::system::{
        bluetooth::{self, BleLink, ClockStyle, Payload, Server},
        config,
        flash::{self, FlashStore},
        logger,
        time::{self, MinuteTicks, TimeManager, TimeReference},
    };
    use simplday::{companion::Tuple, time::TimeUnits, SunWatch, WatchParts};

    // Others
    use chrono::{NaiveDateTime, Timelike};

    // Local wall clock of the build host, used until the companion sets the time
    include!(concat!(env!("OUT_DIR"), "/utc.rs"));

    bind_interrupts!(struct Irqs {
        SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
    });

    type Face = SunWatch<display::Surface, BleLink, FlashStore, MinuteTicks>;

    // Communication channels
    pub static INBOUND: Channel<ThreadModeRawMutex, Payload, 4> = Channel::new();
    pub static OUTBOUND: Channel<ThreadModeRawMutex, Tuple, 2> = Channel::new();
    pub static PERSIST: Channel<ThreadModeRawMutex, (u32, i32), 4> = Channel::new();
    pub static TIME_SYNC: Signal<ThreadModeRawMutex, TimeReference> = Signal::new();
    static TICK: Signal<ThreadModeRawMutex, (NaiveDateTime, TimeUnits)> = Signal::new();

    static SERVER: StaticCell<Server> = StaticCell::new();

    /// Signal the watch face whenever the minute changes
    #[embassy_executor::task(pool_size = 1)]
    async fn minute_tick(mut clock: TimeManager, start: NaiveDateTime) {
        let mut tick = Ticker::every(Duration::from_secs(1));
        let mut last = start;

        loop {
            if TIME_SYNC.signaled() {
                clock.set_time(TIME_SYNC.wait().await);
                defmt::info!("Clock synced from companion");
            }

            let now = clock.get_time();
            let units = TimeUnits::changed(&last, &now);
            if units.contains(TimeUnits::MINUTE) || units.contains(TimeUnits::DAY) {
                if time::ticks_enabled() {
                    defmt::debug!("Minute tick {}:{}", now.hour(), now.minute());
                    TICK.signal((now, units));
                }
                last = now;
            }

            // Re-schedule the timer interrupt in 1s
            tick.next().await;
        }
    }

    /// Owns the watch face; ticks and companion writes are applied in order
    #[embassy_executor::task(pool_size = 1)]
    async fn watchface(mut face: Face, settings: ClockStyle) {
        defmt::info!("Watch face running");

        loop {
            match select(TICK.wait(), INBOUND.receive()).await {
                Either::First((now, units)) => face.handle_tick(&now, units, &settings),
                Either::Second(payload) => face.handle_payload(&payload),
            }
        }
    }

    #[embassy_executor::main]
    async fn main(spawner: Spawner) {
        let p = embassy_nrf::init(config::chip());
        logger::init();
        defmt::info!("Initializing");
        let watch_config = config::watch();

        // Bluetooth and flash both live in the SoftDevice
        let sd = Softdevice::enable(&bluetooth::softdevice_config());
        let server = SERVER.init(unwrap!(Server::new(sd)));
        unwrap!(spawner.spawn(bluetooth::softdevice_task(sd)));

        let mut flash = Flash::take(sd);
        let store = FlashStore::load(&mut flash).await;

        // Backlight
        let mut backlight = Backlight::new(
            Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
            Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
            Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
        );
        if let Err(err) = backlight.set(watch_config.backlight_level) {
            defmt::warn!("Backlight level rejected: {}", err);
        }

        // LCD on SPIM2
        let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, config::display_spi());
        let surface = display::init(
            spim,
            Output::new(p.P0_25.degrade(), Level::High, OutputDrive::Standard),
            Output::new(p.P0_18.degrade(), Level::Low, OutputDrive::Standard),
            Output::new(p.P0_26.degrade(), Level::Low, OutputDrive::Standard),
        );

        let clock = TimeManager::init(TimeReference::from_timestamp(UTC_TIME));
        let now = clock.get_time();
        let settings = ClockStyle::init(watch_config.default_clock_24h);

        let parts = WatchParts {
            display: surface,
            link: BleLink,
            store,
            ticks: MinuteTicks,
        };
        let face = SunWatch::init(parts, watch_config, &now, &settings);

        defmt::info!("Initialization finished");

        // Schedule tasks
        unwrap!(spawner.spawn(flash::persist_task(flash)));
        unwrap!(spawner.spawn(bluetooth::ble_task(sd, server)));
        unwrap!(spawner.spawn(minute_tick(clock, now)));
        unwrap!(spawner.spawn(watchface(face, settings)));
    }
}
