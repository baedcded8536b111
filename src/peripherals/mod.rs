pub mod backlight;
pub mod display;
