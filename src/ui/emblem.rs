//! Decorative emblem drawn in the middle of the face

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    pixelcolor::Rgb565,
    primitives::Rectangle,
    Pixel,
};

/// Emblem width and height in pixels
pub const EMBLEM_SIZE: u32 = 16;

/// The emblem sits this many pixels above the center of the face
const NUDGE_UP: i32 = 15;

/// 1 bit per pixel, rows top to bottom, most significant bit first
static EMBLEM_DATA: [u8; 32] = [
    0b00000000, 0b11111100, //
    0b00000001, 0b11111000, //
    0b00000011, 0b11110000, //
    0b00000111, 0b11100000, //
    0b00001111, 0b11000000, //
    0b00011111, 0b11111000, //
    0b00111111, 0b11110000, //
    0b00000001, 0b11110000, //
    0b00000011, 0b11100000, //
    0b00000111, 0b11000000, //
    0b00001111, 0b10000000, //
    0b00011110, 0b00000000, //
    0b00111000, 0b00000000, //
    0b01100000, 0b00000000, //
    0b10000000, 0b00000000, //
    0b00000000, 0b00000000, //
];

/// Emblem placed on a face. Only set pixels are drawn, everything else
/// stays as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emblem {
    top_left: Point,
    color: Rgb565,
}

impl Emblem {
    /// Center the emblem in `bounds`, then move it up a bit
    pub fn place(bounds: &Rectangle, color: Rgb565) -> Self {
        let slack = bounds.size.saturating_sub(Size::new_equal(EMBLEM_SIZE)) / 2;
        let top_left = bounds.top_left + slack - Point::new(0, NUDGE_UP);
        Self { top_left, color }
    }

    /// Area covered by the emblem
    pub fn bounding_box(&self) -> Rectangle {
        Rectangle::new(self.top_left, Size::new_equal(EMBLEM_SIZE))
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let top_left = self.top_left;
        let color = self.color;
        target.draw_iter(set_pixels().map(move |p| Pixel(top_left + p, color)))
    }
}

/// Offsets of all set pixels of the emblem
fn set_pixels() -> impl Iterator<Item = Point> {
    let size = EMBLEM_SIZE as i32;
    (0..size)
        .flat_map(move |y| (0..size).map(move |x| Point::new(x, y)))
        .filter(|p| {
            let bit = (p.y * EMBLEM_SIZE as i32 + p.x) as usize;
            EMBLEM_DATA[bit / 8] & (0x80 >> (bit % 8)) != 0
        })
}
