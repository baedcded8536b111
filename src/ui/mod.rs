//! Watch face regions and the surface they are drawn on

pub mod layout;
mod surface;

pub use surface::GraphicsSurface;

/// Text regions of the watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Day,
    Date,
    Time,
    Sun,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Day, Region::Date, Region::Time, Region::Sun];

    const fn index(self) -> usize {
        match self {
            Region::Day => 0,
            Region::Date => 1,
            Region::Time => 2,
            Region::Sun => 3,
        }
    }
}

/// Where the watch face puts its text.
///
/// The face only ever writes finished strings; it never reads back.
pub trait DisplaySurface {
    /// Replace the text shown in a region
    fn set_text(&mut self, region: Region, text: &str);

    /// Draw the rule between date and time
    fn draw_divider(&mut self);

    /// Release a text region; later writes to it are ignored
    fn destroy_region(&mut self, region: Region);

    /// Release the divider region
    fn destroy_divider(&mut self);
}
