//! Display control module for PineTime

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::{AnyPin, Output},
    peripherals::SPI2,
    spim::Spim,
};
use embassy_time::Delay;
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::{Rgb565, RgbColor},
    primitives::Rectangle,
    Pixel,
};
use mipidsi::{models::ST7789, Builder, Orientation};

use super::backlight::{self, Backlight};

const LCD_W: u16 = 240;
const LCD_H: u16 = 240;

type Lcd = mipidsi::Display<
    SPIInterface<Spim<'static, SPI2>, Output<'static, AnyPin>, Output<'static, AnyPin>>,
    ST7789,
    Output<'static, AnyPin>,
>;

/// ST7789 panel together with its backlight
pub struct Display {
    /// Display instance
    lcd: Lcd,
    /// Backlight pins
    backlight: Backlight,
}

impl Display {
    /// Configure the panel on boot and clear it to black
    pub fn init(
        spim: Spim<'static, SPI2>,
        cs_pin: Output<'static, AnyPin>,
        dc_pin: Output<'static, AnyPin>,
        rst_pin: Output<'static, AnyPin>,
        backlight: Backlight,
    ) -> Result<Self, Error> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
            .map_err(|_| Error::Init)?;

        let mut display = Self { lcd, backlight };
        display.lcd.clear(Rgb565::BLACK).map_err(|_| Error::Bus)?;
        Ok(display)
    }

    /// Set the backlight brightness
    pub fn set_brightness(&mut self, level: u8) -> Result<(), backlight::Error> {
        self.backlight.set(level)
    }
}

impl OriginDimensions for Display {
    fn size(&self) -> Size {
        Size::new(LCD_W as u32, LCD_H as u32)
    }
}

impl DrawTarget for Display {
    type Color = Rgb565;
    type Error = Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.lcd.draw_iter(pixels).map_err(|_| Error::Bus)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.lcd.fill_contiguous(area, colors).map_err(|_| Error::Bus)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.lcd.fill_solid(area, color).map_err(|_| Error::Bus)
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    /// Panel did not come up
    Init,
    /// Transfer to the panel failed
    Bus,
}
