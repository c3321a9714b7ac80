//! Status rings around the face
//!
//! The outer ring shows the battery, the inner ring the companion link.
//! Round screens get true annuli, rectangular screens fake a ring by filling
//! a colored rectangle and cutting out its middle with a black one.

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    pixelcolor::{Rgb565, RgbColor},
    primitives::{Circle, Primitive, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
    Drawable,
};

use crate::config::{DisplayCapabilities, FaceVariant, Shape};

use super::{Ambient, LinkState, PowerState};

/// Color constants, taken from the 64 color palette the face was designed for
pub mod colors {
    use embedded_graphics::pixelcolor::Rgb565;

    /// #0055FF
    pub const BLUE_MOON: Rgb565 = Rgb565::new(0, 21, 31);
    /// #FFFF55
    pub const ICTERINE: Rgb565 = Rgb565::new(31, 63, 10);
    /// #AA0000
    pub const DARK_CANDY_APPLE_RED: Rgb565 = Rgb565::new(21, 0, 0);
    /// #FF5500
    pub const ORANGE: Rgb565 = Rgb565::new(31, 21, 0);
    /// #FFFF00
    pub const YELLOW: Rgb565 = Rgb565::new(31, 63, 0);
    /// #00FF00
    pub const GREEN: Rgb565 = Rgb565::new(0, 63, 0);
    /// #005500
    pub const DARK_GREEN: Rgb565 = Rgb565::new(0, 21, 0);
    /// #0000AA
    pub const DUKE_BLUE: Rgb565 = Rgb565::new(0, 0, 21);
    /// #FF0000
    pub const RED: Rgb565 = Rgb565::new(31, 0, 0);
    /// #AAAAAA
    pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);
    pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);
    pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);
}

/// Number of rungs on the battery ladder
pub const LADDER_LEN: usize = 5;

/// Outer ring colors by battery state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryPalette {
    pub charging: Rgb565,
    /// Exactly 100 %
    pub full: Rgb565,
    /// `(threshold, color)` pairs in ascending threshold order, a percentage
    /// takes the first rung it is less or equal to
    pub ladder: [(u8, Rgb565); LADDER_LEN],
    /// Anything above the last rung and below 100 %
    pub fallback: Rgb565,
}

impl Default for BatteryPalette {
    fn default() -> Self {
        Self {
            charging: colors::ICTERINE,
            full: colors::BLUE_MOON,
            ladder: [
                (10, colors::DARK_CANDY_APPLE_RED),
                (30, colors::ORANGE),
                (50, colors::YELLOW),
                (70, colors::GREEN),
                (90, colors::DARK_GREEN),
            ],
            fallback: colors::BLUE_MOON,
        }
    }
}

impl BatteryPalette {
    /// Pick the outer ring color. First match wins: charging, full, ladder.
    pub fn color(&self, power: PowerState) -> Rgb565 {
        if power.charging {
            return self.charging;
        }
        if power.percent == 100 {
            return self.full;
        }
        self.ladder
            .iter()
            .find(|(threshold, _)| power.percent <= *threshold)
            .map(|(_, color)| *color)
            .unwrap_or(self.fallback)
    }
}

/// Inner ring colors by link state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkPalette {
    pub connected: Rgb565,
    pub disconnected: Rgb565,
}

impl Default for LinkPalette {
    fn default() -> Self {
        Self {
            connected: colors::DUKE_BLUE,
            disconnected: colors::RED,
        }
    }
}

impl LinkPalette {
    pub fn color(&self, link: LinkState) -> Rgb565 {
        if link.connected {
            self.connected
        } else {
            self.disconnected
        }
    }
}

/// Colors of both rings for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingColors {
    pub outer: Rgb565,
    pub inner: Rgb565,
}

impl RingColors {
    /// Fixed pair used on monochrome screens
    pub const MONOCHROME: Self = Self {
        outer: colors::WHITE,
        inner: colors::LIGHT_GRAY,
    };

    /// Resolve the ring colors for the current frame.
    ///
    /// Battery and link are only read from `ambient` on color screens.
    pub fn select<A>(
        capabilities: &DisplayCapabilities,
        battery: &BatteryPalette,
        link: &LinkPalette,
        ambient: &A,
    ) -> Self
    where
        A: Ambient + ?Sized,
    {
        if !capabilities.color {
            return Self::MONOCHROME;
        }
        Self {
            outer: battery.color(ambient.power()),
            inner: link.color(ambient.link()),
        }
    }
}

/// Rectangle placed `offset` pixels from the top left corner of the bounds
/// and `shrink` pixels smaller than the bounds in both dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inset {
    pub offset: u32,
    pub shrink: u32,
}

impl Inset {
    pub const fn new(offset: u32, shrink: u32) -> Self {
        Self { offset, shrink }
    }

    pub fn apply(&self, bounds: &Rectangle) -> Rectangle {
        Rectangle::new(
            bounds.top_left + Point::new(self.offset as i32, self.offset as i32),
            Size::new(
                bounds.size.width.saturating_sub(self.shrink),
                bounds.size.height.saturating_sub(self.shrink),
            ),
        )
    }
}

/// One rectangular ring: a colored fill with a black cutout on top
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectRing {
    pub fill: Inset,
    pub cutout: Inset,
}

/// One round ring: an annulus inside a circle fitted to the cropped bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRing {
    /// Distance between the bounds and the outside of the ring
    pub crop: u32,
    /// Ring width
    pub thickness: u32,
}

/// Margins of both rings for both screen shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingGeometry {
    pub outer: RectRing,
    pub inner: RectRing,
    pub round_outer: RoundRing,
    pub round_inner: RoundRing,
}

impl RingGeometry {
    /// The emblem variant cuts the inner ring one pixel shorter on the
    /// bottom and right edge. Kept as is so both variants render unchanged.
    pub fn for_variant(variant: FaceVariant) -> Self {
        let cutout_shrink = match variant {
            FaceVariant::Rings => 24,
            FaceVariant::Emblem => 25,
        };
        Self {
            outer: RectRing {
                fill: Inset::new(0, 0),
                cutout: Inset::new(4, 8),
            },
            inner: RectRing {
                fill: Inset::new(8, 16),
                cutout: Inset::new(12, cutout_shrink),
            },
            round_outer: RoundRing {
                crop: 4,
                thickness: 4,
            },
            round_inner: RoundRing {
                crop: 12,
                thickness: 4,
            },
        }
    }
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self::for_variant(FaceVariant::Rings)
    }
}

/// Draw both rings, outer first
pub fn draw_rings<D>(
    target: &mut D,
    bounds: &Rectangle,
    shape: Shape,
    geometry: &RingGeometry,
    colors: RingColors,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    match shape {
        Shape::Round => {
            draw_round_ring(target, bounds, &geometry.round_outer, colors.outer)?;
            draw_round_ring(target, bounds, &geometry.round_inner, colors.inner)
        }
        Shape::Rectangular => {
            draw_rect_ring(target, bounds, &geometry.outer, colors.outer)?;
            draw_rect_ring(target, bounds, &geometry.inner, colors.inner)
        }
    }
}

fn draw_rect_ring<D>(
    target: &mut D,
    bounds: &Rectangle,
    ring: &RectRing,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    // No stroke only fill, so draw 2 rectangles inside one another
    ring.fill
        .apply(bounds)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(target)?;
    ring.cutout
        .apply(bounds)
        .into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK))
        .draw(target)
}

fn draw_round_ring<D>(
    target: &mut D,
    bounds: &Rectangle,
    ring: &RoundRing,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let diameter = bounds
        .size
        .width
        .min(bounds.size.height)
        .saturating_sub(2 * ring.crop);
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(color)
        .stroke_width(ring.thickness)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();

    Circle::with_center(bounds.center(), diameter)
        .into_styled(style)
        .draw(target)
}
