//! Display control module for PineTime

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::{AnyPin, Output},
    peripherals::SPI2,
    spim::Spim,
};
use embassy_time::Delay;
use mipidsi::{models::ST7789, Builder, Orientation};
use simplday::ui::{
    layout::{LCD_H, LCD_W},
    GraphicsSurface,
};

/// The ST7789 panel on SPIM2
pub type Lcd = mipidsi::Display<
    SPIInterface<Spim<'static, SPI2>, Output<'static, AnyPin>, Output<'static, AnyPin>>,
    ST7789,
    Output<'static, AnyPin>,
>;

/// Watch face regions drawn on the panel
pub type Surface = GraphicsSurface<Lcd>;

/// Reset and configure the panel, then hand it out as a blank surface
pub fn init(
    spim: Spim<'static, SPI2>,
    cs_pin: Output<'static, AnyPin>,
    dc_pin: Output<'static, AnyPin>,
    rst_pin: Output<'static, AnyPin>,
) -> Surface {
    let lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
        .with_display_size(LCD_W as u16, LCD_H as u16)
        .with_orientation(Orientation::Portrait(false))
        .init(&mut Delay, Some(rst_pin))
        .unwrap_or_else(|_| defmt::panic!("Display init failed"));

    let mut surface = GraphicsSurface::new(lcd);
    if surface.clear().is_err() {
        defmt::warn!("Display clear failed");
    }
    surface
}
