//! Ring watchface

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    mono_font::{ascii::FONT_10X20, MonoTextStyle},
    pixelcolor::{Rgb565, RgbColor},
    primitives::Rectangle,
    Drawable,
};
use embedded_text::{alignment::HorizontalAlignment, style::TextBoxStyleBuilder, TextBox};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use super::{
    emblem::Emblem,
    label::{format_date, format_time, Label, DATE_BUF_LEN, TIME_BUF_LEN},
    rings::{draw_rings, RingColors},
    Ambient, WatchFace,
};
use crate::{
    config::{DisplayCapabilities, FaceConfig},
    error::Error,
};

type TextStyle = MonoTextStyle<'static, Rgb565>;

/// Clock and date inside two status rings
pub struct RingWatchface {
    config: FaceConfig,
    capabilities: DisplayCapabilities,
    /// Time label
    time_label: Label<TIME_BUF_LEN>,
    /// Date label
    date_label: Label<DATE_BUF_LEN>,
    /// Emblem, if the face has been laid out with one
    emblem: Option<Emblem>,
}

impl RingWatchface {
    /// Attach or remove the emblem overlay
    pub fn set_emblem(&mut self, emblem: Option<Emblem>) {
        self.emblem = emblem;
    }

    pub fn emblem(&self) -> Option<&Emblem> {
        self.emblem.as_ref()
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }
}

impl WatchFace for RingWatchface {
    fn new(config: FaceConfig, capabilities: DisplayCapabilities) -> Self {
        Self {
            config,
            capabilities,
            time_label: Label::new(),
            date_label: Label::new(),
            emblem: None,
        }
    }

    fn render<D, A>(
        &mut self,
        target: &mut D,
        bounds: Rectangle,
        ambient: &A,
    ) -> Result<(), Error<D::Error>>
    where
        D: DrawTarget<Color = Rgb565>,
        A: Ambient + ?Sized,
    {
        let reading = ambient.clock();
        let shape = self.capabilities.shape;

        // Rings
        let colors = RingColors::select(
            &self.capabilities,
            &self.config.battery,
            &self.config.link,
            ambient,
        );
        draw_rings(target, &bounds, shape, &self.config.geometry, colors).map_err(Error::Draw)?;

        if let Some(emblem) = &self.emblem {
            emblem.draw(target).map_err(Error::Draw)?;
        }

        // Time
        let time = format_time(&mut self.time_label, &reading)?;
        let time_area = time_area(&bounds, self.config.layout.time_offset(shape));
        text_box(time, time_area, time_style(reading.twenty_four_hour))
            .draw(target)
            .map_err(Error::Draw)?;

        // Date
        let date = format_date(&mut self.date_label, &reading)?;
        let date_area = date_area(&bounds, self.config.layout.date_offset(shape));
        text_box(date, date_area, date_style())
            .draw(target)
            .map_err(Error::Draw)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Rendered {=str} / {=str}", time, date);

        Ok(())
    }
}

/// Larger digits in 24 hour style, smaller ones to leave room for AM/PM
fn time_style(twenty_four_hour: bool) -> TextStyle {
    let font = if twenty_four_hour {
        &PROFONT_24_POINT
    } else {
        &PROFONT_18_POINT
    };
    MonoTextStyle::new(font, Rgb565::WHITE)
}

fn date_style() -> TextStyle {
    MonoTextStyle::new(&FONT_10X20, Rgb565::WHITE)
}

/// Centered, word wrapped text
fn text_box(text: &str, bounds: Rectangle, style: TextStyle) -> TextBox<'_, TextStyle> {
    let textbox_style = TextBoxStyleBuilder::new()
        .alignment(HorizontalAlignment::Center)
        .build();
    TextBox::with_textbox_style(text, bounds, style, textbox_style)
}

/// Area below `offset` pixels from the top
fn time_area(bounds: &Rectangle, offset: u32) -> Rectangle {
    Rectangle::new(
        bounds.top_left + Point::new(0, offset as i32),
        Size::new(
            bounds.size.width,
            bounds.size.height.saturating_sub(offset),
        ),
    )
}

/// Last `offset` pixels at the bottom
fn date_area(bounds: &Rectangle, offset: u32) -> Rectangle {
    let offset = offset.min(bounds.size.height);
    Rectangle::new(
        bounds.top_left + Point::new(0, (bounds.size.height - offset) as i32),
        Size::new(bounds.size.width, offset),
    )
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{
        geometry::Dimensions, primitives::PointsIter, text::renderer::TextRenderer,
    };

    use super::*;
    use crate::{
        config::{FaceVariant, Shape},
        ui::{
            rings::colors,
            test_support::{reading, FixedAmbient, Frame, Op},
            LinkState, PowerState,
        },
    };

    const W: u32 = 240;
    const H: u32 = 240;

    fn face(variant: FaceVariant, shape: Shape, color: bool) -> RingWatchface {
        RingWatchface::new(
            FaceConfig::for_variant(variant),
            DisplayCapabilities::new(shape, color),
        )
    }

    /// White pixels in the rows `from..to`
    fn white_rows(frame: &Frame, from: i32, to: i32) -> usize {
        let area = Rectangle::new(Point::new(0, from), Size::new(W, (to - from) as u32));
        frame.count_in(&area, Rgb565::WHITE)
    }

    /// First text line of `area` has the same pixels as the reference text
    /// drawn on its own
    fn assert_text(frame: &Frame, text: &str, area: Rectangle, style: TextStyle) {
        let mut reference = Frame::new(W, H);
        text_box(text, area, style).draw(&mut reference).unwrap();
        let line = Rectangle::new(area.top_left, Size::new(area.size.width, style.line_height()));
        let expected = reference.count_in(&line, Rgb565::WHITE);
        assert!(expected > 0);
        for point in line.points() {
            if reference.pixel(point.x, point.y) == Some(Rgb565::WHITE) {
                assert_eq!(frame.pixel(point.x, point.y), Some(Rgb565::WHITE), "{:?}", point);
            }
        }
        assert_eq!(frame.count_in(&line, Rgb565::WHITE), expected);
    }

    #[test]
    fn scenario_24h_rectangular_color() {
        let mut frame = Frame::new(W, H);
        let bounds = frame.bounding_box();
        let ambient = FixedAmbient::new(PowerState::new(false, 45), LinkState::new(true))
            .at(reading(0, 5, true));
        let mut face = face(FaceVariant::Rings, Shape::Rectangular, true);

        face.render(&mut frame, bounds, &ambient).unwrap();

        // Two nested rectangles per ring
        assert_eq!(
            frame.ops[..4],
            [
                Op::fill(0, 0, W, H, colors::YELLOW),
                Op::fill(4, 4, W - 8, H - 8, colors::BLACK),
                Op::fill(8, 8, W - 16, H - 16, colors::DUKE_BLUE),
                Op::fill(12, 12, W - 24, H - 24, colors::BLACK),
            ]
        );
        assert_text(&frame, "00:05", time_area(&bounds, 30), time_style(true));
        assert_text(&frame, "Sunday, Mar 3", date_area(&bounds, 40), date_style());
        assert_eq!(white_rows(&frame, 0, 30), 0);
    }

    #[test]
    fn scenario_12h_full_battery() {
        let mut frame = Frame::new(W, H);
        let bounds = frame.bounding_box();
        let ambient = FixedAmbient::new(PowerState::new(false, 100), LinkState::new(false))
            .at(reading(8, 0, false));
        let mut face = face(FaceVariant::Rings, Shape::Rectangular, true);

        face.render(&mut frame, bounds, &ambient).unwrap();

        assert_eq!(frame.ops[0].color, colors::BLUE_MOON);
        assert_eq!(frame.ops[2].color, colors::RED);
        assert_text(&frame, "8:00 AM", time_area(&bounds, 30), time_style(false));
    }

    #[test]
    fn scenario_monochrome() {
        let mut frame = Frame::new(W, H);
        let bounds = frame.bounding_box();
        let ambient = FixedAmbient::new(PowerState::new(true, 5), LinkState::new(true));
        let mut face = face(FaceVariant::Rings, Shape::Rectangular, false);

        face.render(&mut frame, bounds, &ambient).unwrap();

        assert_eq!(frame.ops[0].color, colors::WHITE);
        assert_eq!(frame.ops[2].color, colors::LIGHT_GRAY);
        assert_eq!(ambient.power_reads.get(), 0);
        assert_eq!(ambient.link_reads.get(), 0);
    }

    #[test]
    fn round_face_pushes_text_down() {
        let mut frame = Frame::new(W, H);
        let bounds = frame.bounding_box();
        let ambient = FixedAmbient::new(PowerState::new(false, 60), LinkState::new(true))
            .at(reading(13, 45, true));
        let mut face = face(FaceVariant::Rings, Shape::Round, true);

        face.render(&mut frame, bounds, &ambient).unwrap();

        assert_eq!(white_rows(&frame, 0, 50), 0);
        assert_text(&frame, "13:45", time_area(&bounds, 50), time_style(true));
        assert_text(&frame, "Sunday, Mar 3", date_area(&bounds, 70), date_style());
        assert_eq!(frame.pixel(120, 5), Some(colors::GREEN));
    }

    #[test]
    fn emblem_is_composited_when_placed() {
        let mut frame = Frame::new(W, H);
        let bounds = frame.bounding_box();
        let ambient = FixedAmbient::new(PowerState::new(false, 80), LinkState::new(true));
        let mut face = face(FaceVariant::Emblem, Shape::Rectangular, true);
        let emblem = Emblem::place(&bounds, Rgb565::WHITE);
        face.set_emblem(Some(emblem));

        face.render(&mut frame, bounds, &ambient).unwrap();

        assert_eq!(frame.ops[3], Op::fill(12, 12, W - 25, H - 25, colors::BLACK));
        assert!(frame.count_in(&emblem.bounding_box(), Rgb565::WHITE) > 0);
    }

    #[test]
    fn text_is_centered() {
        let mut frame = Frame::new(W, H);
        let bounds = frame.bounding_box();
        let ambient = FixedAmbient::new(PowerState::new(false, 80), LinkState::new(true))
            .at(reading(10, 10, true));
        let mut face = face(FaceVariant::Rings, Shape::Rectangular, true);

        face.render(&mut frame, bounds, &ambient).unwrap();

        let left = Rectangle::new(Point::new(0, 30), Size::new(W / 2, 60));
        let right = Rectangle::new(Point::new(W as i32 / 2, 30), Size::new(W / 2, 60));
        let l = frame.count_in(&left, Rgb565::WHITE);
        let r = frame.count_in(&right, Rgb565::WHITE);
        assert!(l > 0 && r > 0);
        assert!(l.abs_diff(r) * 4 < l + r, "{} vs {}", l, r);
    }

    #[test]
    fn text_areas() {
        let bounds = Rectangle::new(Point::new(0, 0), Size::new(144, 168));
        assert_eq!(
            time_area(&bounds, 30),
            Rectangle::new(Point::new(0, 30), Size::new(144, 138))
        );
        assert_eq!(
            date_area(&bounds, 40),
            Rectangle::new(Point::new(0, 128), Size::new(144, 40))
        );
    }
}
