//! Test doubles shared by the UI tests

use core::{cell::Cell, convert::Infallible};

use chrono::NaiveDate;
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::Rgb565,
    primitives::{PointsIter, Rectangle},
    Pixel,
};

use super::{Ambient, ClockReading, LinkState, PowerState};

/// Solid fill issued to the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Op {
    pub area: Rectangle,
    pub color: Rgb565,
}

impl Op {
    pub fn fill(x: i32, y: i32, width: u32, height: u32, color: Rgb565) -> Self {
        Self {
            area: Rectangle::new(Point::new(x, y), Size::new(width, height)),
            color,
        }
    }
}

/// Frame buffer recording every solid fill it receives
pub struct Frame {
    size: Size,
    pixels: Vec<Option<Rgb565>>,
    pub ops: Vec<Op>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![None; (width * height) as usize],
            ops: Vec::new(),
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        self.index(Point::new(x, y)).and_then(|i| self.pixels[i])
    }

    /// Number of consecutive pixels of `color` walking down from `(x, y)`
    pub fn run_length(&self, x: i32, y: i32, step: i32, color: Rgb565) -> usize {
        (0..)
            .map(|i| self.pixel(x, y + i * step))
            .take_while(|p| *p == Some(color))
            .count()
    }

    /// Pixels of `color` inside `area`
    pub fn count_in(&self, area: &Rectangle, color: Rgb565) -> usize {
        area.points()
            .filter(|p| self.pixel(p.x, p.y) == Some(color))
            .count()
    }

    fn index(&self, point: Point) -> Option<usize> {
        let (w, h) = (self.size.width as i32, self.size.height as i32);
        if point.x < 0 || point.y < 0 || point.x >= w || point.y >= h {
            return None;
        }
        Some((point.y * w + point.x) as usize)
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Frame {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = Some(color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.ops.push(Op { area: *area, color });
        for point in area.points() {
            if let Some(i) = self.index(point) {
                self.pixels[i] = Some(color);
            }
        }
        Ok(())
    }
}

/// Ambient source with fixed values, counting battery and link reads
pub struct FixedAmbient {
    pub clock: ClockReading,
    pub power: PowerState,
    pub link: LinkState,
    pub power_reads: Cell<usize>,
    pub link_reads: Cell<usize>,
}

impl FixedAmbient {
    pub fn new(power: PowerState, link: LinkState) -> Self {
        Self {
            clock: reading(0, 5, true),
            power,
            link,
            power_reads: Cell::new(0),
            link_reads: Cell::new(0),
        }
    }

    pub fn at(mut self, clock: ClockReading) -> Self {
        self.clock = clock;
        self
    }
}

impl Ambient for FixedAmbient {
    fn clock(&self) -> ClockReading {
        self.clock
    }

    fn power(&self) -> PowerState {
        self.power_reads.set(self.power_reads.get() + 1);
        self.power
    }

    fn link(&self) -> LinkState {
        self.link_reads.set(self.link_reads.get() + 1);
        self.link
    }
}

/// Reading on Sunday, March 3rd 2024
pub fn reading(hour: u32, minute: u32, twenty_four_hour: bool) -> ClockReading {
    let time = NaiveDate::from_ymd_opt(2024, 3, 3)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap();
    ClockReading::new(time, twenty_four_hour)
}
