//! Bluetooth module
//!
//! The companion app connects to the `Simplday` GATT service. It writes
//! sunrise/sunset tuples and the current time, and subscribes to the
//! request characteristic to hear when the watch wants fresh solar data.

// Core
use core::{
    mem,
    sync::atomic::{AtomicBool, Ordering},
};

// BLE
use embassy_futures::select::{select, Either};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use heapless::Vec;
use nrf_softdevice::{
    self,
    ble::{
        advertisement_builder::{
            Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
        },
        gatt_server, peripheral, Connection,
    },
    raw, Config, Softdevice,
};

use simplday::{
    companion::{CompanionLink, RequestOutbox, Tuple},
    ClockSettings, SendError,
};

use super::time::TimeReference;
use crate::{INBOUND, OUTBOUND, TIME_SYNC};

/// Largest companion write: the default ATT MTU of 23 minus the header
pub const PAYLOAD_LEN: usize = 20;

pub type Payload = Vec<u8, PAYLOAD_LEN>;

/// Service UUID 5e1a0001-5d4c-4f2b-9b1e-7a7d3c0e5f10, little endian
const SERVICE_UUID: [u8; 16] = [
    0x10, 0x5f, 0x0e, 0x3c, 0x7d, 0x7a, 0x1e, 0x9b, 0x2b, 0x4f, 0x4c, 0x5d, 0x01, 0x00, 0x1a, 0x5e,
];

pub static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .full_name("Simplday")
    .build();

pub static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_128(ServiceList::Complete, &[SERVICE_UUID])
    .build();

/// User's 12h/24h preference, written by the companion
static CLOCK_24H: AtomicBool = AtomicBool::new(true);

/// Companion turned request notifications on (true) or off
static REQUEST_SUBSCRIBED: Signal<ThreadModeRawMutex, bool> = Signal::new();

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub simplday: SimpldayService,
}

#[nrf_softdevice::gatt_service(uuid = "5e1a0001-5d4c-4f2b-9b1e-7a7d3c0e5f10")]
pub struct SimpldayService {
    /// Inbound sunrise/sunset tuples
    #[characteristic(uuid = "5e1a0002-5d4c-4f2b-9b1e-7a7d3c0e5f10", write)]
    pub solar: Vec<u8, PAYLOAD_LEN>,
    /// Outbound request for solar data
    #[characteristic(uuid = "5e1a0003-5d4c-4f2b-9b1e-7a7d3c0e5f10", read, notify)]
    pub request: [u8; 5],
    /// Current Time Service record
    #[characteristic(uuid = "2a2b", write)]
    pub current_time: [u8; 10],
    /// 1 for 24-hour clock, 0 for 12-hour
    #[characteristic(uuid = "5e1a0004-5d4c-4f2b-9b1e-7a7d3c0e5f10", read, write)]
    pub clock_style: u8,
}

pub fn softdevice_config() -> Config {
    Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_XTAL as u8,
            rc_ctiv: 0,
            rc_temp_ctiv: 0,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_20_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 23 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: b"Simplday" as *const u8 as _,
            current_len: 8,
            max_len: 8,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Clock preference as last written by the companion
pub struct ClockStyle;

impl ClockStyle {
    pub fn init(is_24h: bool) -> Self {
        CLOCK_24H.store(is_24h, Ordering::Relaxed);
        Self
    }
}

impl ClockSettings for ClockStyle {
    fn clock_is_24h_style(&self) -> bool {
        CLOCK_24H.load(Ordering::Relaxed)
    }
}

/// Outbound half of the companion channel
pub struct BleLink;

impl CompanionLink for BleLink {
    fn request_solar_data(&mut self) -> Result<(), SendError> {
        // A full queue means the phone is not listening; drop the request
        OUTBOUND
            .try_send(Tuple::request())
            .map_err(|_| SendError::NoBuffer)
    }
}

#[embassy_executor::task]
pub async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Advertise, serve one connection at a time, repeat
#[embassy_executor::task]
pub async fn ble_task(sd: &'static Softdevice, server: &'static Server) {
    let config = peripheral::Config::default();
    // Survives disconnects so an undelivered request goes to the next companion
    let mut outbox = RequestOutbox::new();

    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };
        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(err) => {
                defmt::warn!("Advertising failed: {:?}", err);
                continue;
            }
        };
        defmt::info!("Companion connected");
        REQUEST_SUBSCRIBED.reset();
        outbox.set_subscribed(false);

        let serve = gatt_server::run(&conn, server, |event| match event {
            ServerEvent::Simplday(event) => handle_event(event),
        });
        select(serve, forward_requests(&conn, server, &mut outbox)).await;

        defmt::info!("Companion disconnected");
    }
}

fn handle_event(event: SimpldayServiceEvent) {
    match event {
        SimpldayServiceEvent::SolarWrite(payload) => {
            if INBOUND.try_send(payload).is_err() {
                defmt::warn!("Inbound queue full, dropping companion write");
            }
        }
        SimpldayServiceEvent::CurrentTimeWrite(bytes) => match TimeReference::from_cts_bytes(&bytes) {
            Ok(reference) => TIME_SYNC.signal(reference),
            Err(err) => defmt::warn!("Bad time record: {}", defmt::Display2Format(&err)),
        },
        SimpldayServiceEvent::ClockStyleWrite(style) => {
            defmt::info!("Clock style set to {}", if style != 0 { "24h" } else { "12h" });
            CLOCK_24H.store(style != 0, Ordering::Relaxed);
        }
        SimpldayServiceEvent::RequestCccdWrite { notifications } => {
            defmt::debug!("Request notifications: {}", notifications);
            REQUEST_SUBSCRIBED.signal(notifications);
        }
    }
}

/// Push solar data requests to the connected companion once it subscribes.
///
/// Every request is also stored as the characteristic value so the
/// companion can read it after connecting.
async fn forward_requests(conn: &Connection, server: &Server, outbox: &mut RequestOutbox) {
    loop {
        match select(OUTBOUND.receive(), REQUEST_SUBSCRIBED.wait()).await {
            Either::First(request) => {
                if let Err(err) = server.simplday.request_set(&request.encode()) {
                    defmt::warn!("Request value not stored: {:?}", err);
                }
                outbox.push(request);
            }
            Either::Second(subscribed) => outbox.set_subscribed(subscribed),
        }

        if let Some(request) = outbox.take_ready() {
            match server.simplday.request_notify(conn, &request.encode()) {
                Ok(()) => defmt::debug!("Solar data requested"),
                Err(err) => {
                    // Kept for the next subscription change or request
                    defmt::warn!("Solar data request not sent: {:?}", err);
                    outbox.push(request);
                }
            }
        }
    }
}
