//! Backlight control
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/backlight.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::gpio::{AnyPin, Output};

/// Control the backlight.
///
/// There are three active-low backlight pins, each connected to a FET that
/// toggles backlight power through a resistor.
///
/// - Low: 2.2 kΩ
/// - Mid: 100 Ω
/// - High: 30 Ω
///
/// Combining them gives 7 brightness levels plus off.
pub struct Backlight {
    low: Output<'static, AnyPin>,
    mid: Output<'static, AnyPin>,
    high: Output<'static, AnyPin>,
}

impl Backlight {
    pub fn new(
        low: Output<'static, AnyPin>,
        mid: Output<'static, AnyPin>,
        high: Output<'static, AnyPin>,
    ) -> Self {
        Self { low, mid, high }
    }

    /// Set the brightness level between 0 (off) and 7 (max brightness).
    pub fn set(&mut self, brightness: u8) -> Result<(), Error> {
        if brightness > 7 {
            return Err(Error::OutOfBounds);
        }
        defmt::debug!("Setting backlight brightness to {}", brightness);

        for (mask, pin) in [(0x01, &mut self.low), (0x02, &mut self.mid), (0x04, &mut self.high)] {
            if brightness & mask > 0 {
                pin.set_low();
            } else {
                pin.set_high();
            }
        }

        Ok(())
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    OutOfBounds,
}
