//! embedded-graphics backed display surface

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::{Baseline, Text},
};

use super::{layout, DisplaySurface, Region};

/// Watch face regions drawn straight onto a draw target
pub struct GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    target: D,
    /// Regions still alive, indexed by `Region::index`
    live: [bool; 4],
    divider_live: bool,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            live: [true; 4],
            divider_live: true,
        }
    }

    /// Fill the whole screen with the background color
    pub fn clear(&mut self) -> Result<(), D::Error> {
        self.target.clear(layout::BACKGROUND_COLOR)
    }

    /// Give the draw target back
    pub fn release(self) -> D {
        self.target
    }

    fn blank(&mut self, area: embedded_graphics::primitives::Rectangle) {
        area.into_styled(PrimitiveStyle::with_fill(layout::BACKGROUND_COLOR))
            .draw(&mut self.target)
            .ok();
    }
}

impl<D> DisplaySurface for GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn set_text(&mut self, region: Region, text: &str) {
        if !self.live[region.index()] {
            return;
        }

        let area = layout::area(region);
        self.blank(area);

        let style = MonoTextStyle::new(layout::font(region), layout::TEXT_COLOR);
        Text::with_baseline(text, area.top_left, style, Baseline::Top)
            .draw(&mut self.target)
            .ok();
    }

    fn draw_divider(&mut self) {
        if !self.divider_live {
            return;
        }

        let style = PrimitiveStyle::with_stroke(layout::TEXT_COLOR, 1);
        for offset in 0..2 {
            let shift = Point::new(0, offset);
            Line::new(layout::DIVIDER_START + shift, layout::DIVIDER_END + shift)
                .into_styled(style)
                .draw(&mut self.target)
                .ok();
        }
    }

    fn destroy_region(&mut self, region: Region) {
        if self.live[region.index()] {
            self.blank(layout::area(region));
            self.live[region.index()] = false;
        }
    }

    fn destroy_divider(&mut self) {
        if self.divider_live {
            self.blank(layout::DIVIDER_AREA);
            self.divider_live = false;
        }
    }
}
