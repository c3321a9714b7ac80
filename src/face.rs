//! Face lifecycle
//!
//! [`Face`] owns everything the watchface needs between two paint passes.
//! The host creates it with [`Face::load`] and tears it down with
//! [`Face::unload`].

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_graphics::{
    draw_target::DrawTarget,
    pixelcolor::{Rgb565, RgbColor},
    primitives::Rectangle,
};

use crate::{
    config::{DisplayCapabilities, FaceConfig},
    error::Error,
    events::{Invalidator, Subscriptions},
    ui::{emblem::Emblem, ring_watchface::RingWatchface, rings::colors, Ambient, WatchFace},
};

/// Window background behind all layers
const BACKGROUND: Rgb565 = Rgb565::BLACK;

/// Loaded watchface
pub struct Face {
    bounds: Rectangle,
    renderer: RingWatchface,
}

impl Face {
    /// Lay the face out on `bounds`, subscribe to what it displays and ask
    /// for the first frame
    pub fn load<M: RawMutex>(
        config: FaceConfig,
        capabilities: DisplayCapabilities,
        bounds: Rectangle,
        invalidator: &Invalidator<M>,
    ) -> Self {
        let mut renderer = RingWatchface::new(config, capabilities);
        if config.has_emblem() {
            let color = if capabilities.color {
                colors::WHITE
            } else {
                colors::LIGHT_GRAY
            };
            renderer.set_emblem(Some(Emblem::place(&bounds, color)));
        }

        invalidator.subscribe(Subscriptions::for_display(&capabilities));
        invalidator.mark_dirty();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Face loaded: {} on {}",
            config.variant,
            capabilities
        );

        Self { bounds, renderer }
    }

    /// Paint a complete frame
    pub fn paint<D, A>(&mut self, target: &mut D, ambient: &A) -> Result<(), Error<D::Error>>
    where
        D: DrawTarget<Color = Rgb565>,
        A: Ambient + ?Sized,
    {
        target
            .fill_solid(&self.bounds, BACKGROUND)
            .map_err(Error::Draw)?;
        self.renderer.render(target, self.bounds, ambient)
    }

    /// Stop listening to invalidations and release the emblem
    pub fn unload<M: RawMutex>(mut self, invalidator: &Invalidator<M>) {
        invalidator.unsubscribe_all();
        self.renderer.set_emblem(None);

        #[cfg(feature = "defmt")]
        defmt::info!("Face unloaded");
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn renderer(&self) -> &RingWatchface {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embedded_graphics::geometry::Dimensions;

    use super::*;
    use crate::{
        config::{FaceVariant, Shape},
        events::Source,
        ui::{
            test_support::{reading, FixedAmbient, Frame, Op},
            LinkState, PowerState,
        },
    };

    fn ambient() -> FixedAmbient {
        FixedAmbient::new(PowerState::new(false, 25), LinkState::new(false)).at(reading(9, 41, true))
    }

    #[test]
    fn load_subscribes_and_requests_first_frame() {
        let invalidator = Invalidator::<NoopRawMutex>::new();
        let caps = DisplayCapabilities::new(Shape::Rectangular, true);
        let frame = Frame::new(144, 168);

        let face = Face::load(FaceConfig::default(), caps, frame.bounding_box(), &invalidator);

        assert_eq!(invalidator.subscriptions(), Subscriptions::for_display(&caps));
        assert!(invalidator.take());
        assert!(face.renderer().emblem().is_none());
    }

    #[test]
    fn monochrome_load_skips_battery_and_link() {
        let invalidator = Invalidator::<NoopRawMutex>::new();
        let caps = DisplayCapabilities::new(Shape::Round, false);
        let frame = Frame::new(180, 180);
        let mut face = Face::load(FaceConfig::default(), caps, frame.bounding_box(), &invalidator);
        invalidator.take();

        assert!(!invalidator.invalidate(Source::Battery));
        assert!(!invalidator.invalidate(Source::Link));
        assert!(!invalidator.take());
        assert!(invalidator.invalidate(Source::MinuteTick));

        let mut frame = frame;
        let ambient = ambient();
        face.paint(&mut frame, &ambient).unwrap();
        assert_eq!(ambient.power_reads.get(), 0);
        assert_eq!(ambient.link_reads.get(), 0);
    }

    #[test]
    fn paint_clears_background_first() {
        let invalidator = Invalidator::<NoopRawMutex>::new();
        let mut frame = Frame::new(144, 168);
        let caps = DisplayCapabilities::new(Shape::Rectangular, true);
        let mut face = Face::load(FaceConfig::default(), caps, frame.bounding_box(), &invalidator);

        face.paint(&mut frame, &ambient()).unwrap();

        assert_eq!(frame.ops[0], Op::fill(0, 0, 144, 168, colors::BLACK));
        assert_eq!(frame.ops[1], Op::fill(0, 0, 144, 168, colors::ORANGE));
        assert_eq!(frame.ops[3].color, colors::RED);
    }

    #[test]
    fn emblem_variant_places_emblem_once() {
        let invalidator = Invalidator::<NoopRawMutex>::new();
        let mut frame = Frame::new(240, 240);
        let bounds = frame.bounding_box();
        let caps = DisplayCapabilities::new(Shape::Round, true);
        let config = FaceConfig::for_variant(FaceVariant::Emblem);
        let mut face = Face::load(config, caps, bounds, &invalidator);

        let emblem = *face.renderer().emblem().unwrap();
        assert_eq!(emblem, Emblem::place(&bounds, colors::WHITE));

        face.paint(&mut frame, &ambient()).unwrap();
        face.paint(&mut frame, &ambient()).unwrap();
        assert_eq!(face.renderer().emblem(), Some(&emblem));
        assert!(frame.count_in(&emblem.bounding_box(), colors::WHITE) > 0);
    }

    #[test]
    fn unload_unsubscribes() {
        let invalidator = Invalidator::<NoopRawMutex>::new();
        let caps = DisplayCapabilities::new(Shape::Round, true);
        let frame = Frame::new(240, 240);
        let face = Face::load(
            FaceConfig::for_variant(FaceVariant::Emblem),
            caps,
            frame.bounding_box(),
            &invalidator,
        );
        invalidator.take();

        face.unload(&invalidator);

        assert!(invalidator.subscriptions().is_empty());
        assert!(!invalidator.invalidate(Source::MinuteTick));
        assert!(!invalidator.take());
    }
}
