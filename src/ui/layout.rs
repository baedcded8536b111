//! Screen layout for the 240x240 PineTime panel

use embedded_graphics::{
    geometry::{Point, Size},
    mono_font::{ascii::FONT_10X20, MonoFont},
    pixelcolor::Rgb565,
    prelude::RgbColor,
    primitives::Rectangle,
};
use profont::PROFONT_24_POINT;

use super::Region;

pub const LCD_W: u32 = 240;
pub const LCD_H: u32 = 240;

/// Left edge shared by the day, date, time and divider
const MARGIN: i32 = 20;

pub const BACKGROUND_COLOR: Rgb565 = Rgb565::BLACK;
pub const TEXT_COLOR: Rgb565 = Rgb565::WHITE;

pub const DAY_AREA: Rectangle = Rectangle::new(Point::new(MARGIN, 40), Size::new(200, 24));
pub const DATE_AREA: Rectangle = Rectangle::new(Point::new(MARGIN, 70), Size::new(200, 24));
pub const TIME_AREA: Rectangle = Rectangle::new(Point::new(MARGIN, 116), Size::new(200, 34));
pub const SUN_AREA: Rectangle = Rectangle::new(Point::new(130, 196), Size::new(100, 24));

/// Two pixel rule between the date and the time
pub const DIVIDER_Y: i32 = 104;
pub const DIVIDER_START: Point = Point::new(MARGIN, DIVIDER_Y);
pub const DIVIDER_END: Point = Point::new(LCD_W as i32 - MARGIN - 1, DIVIDER_Y);
pub const DIVIDER_AREA: Rectangle = Rectangle::new(
    DIVIDER_START,
    Size::new((LCD_W as i32 - 2 * MARGIN) as u32, 2),
);

/// Bounding box of a text region
pub const fn area(region: Region) -> Rectangle {
    match region {
        Region::Day => DAY_AREA,
        Region::Date => DATE_AREA,
        Region::Time => TIME_AREA,
        Region::Sun => SUN_AREA,
    }
}

/// Font a region is drawn in
pub fn font(region: Region) -> &'static MonoFont<'static> {
    match region {
        Region::Time => &PROFONT_24_POINT,
        Region::Day | Region::Date | Region::Sun => &FONT_10X20,
    }
}
