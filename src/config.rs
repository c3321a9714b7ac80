//! Watchface configuration
//!
//! Everything here is resolved once when the face loads. Nothing is
//! re-evaluated per frame.

use crate::ui::rings::{BatteryPalette, LinkPalette, RingGeometry};

/// Outline of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shape {
    Round,
    Rectangular,
}

/// What the display can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayCapabilities {
    pub shape: Shape,
    /// Color output; monochrome displays collapse the rings to gray levels
    pub color: bool,
}

impl DisplayCapabilities {
    pub const fn new(shape: Shape, color: bool) -> Self {
        Self { shape, color }
    }

    pub fn is_round(&self) -> bool {
        self.shape == Shape::Round
    }
}

/// The two flavours of the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceVariant {
    /// Rings, time and date
    Rings,
    /// Rings, time and date plus the emblem overlay
    Emblem,
}

/// A distance that depends on the screen shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeOffset {
    pub round: u32,
    pub rectangular: u32,
}

impl ShapeOffset {
    pub const fn new(round: u32, rectangular: u32) -> Self {
        Self { round, rectangular }
    }

    pub const fn for_shape(&self, shape: Shape) -> u32 {
        match shape {
            Shape::Round => self.round,
            Shape::Rectangular => self.rectangular,
        }
    }
}

/// Vertical text offsets, picked by screen shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Time offset from the top
    pub time: ShapeOffset,
    /// Date offset from the bottom
    pub date: ShapeOffset,
}

impl Default for Layout {
    fn default() -> Self {
        // Round screens push the text further in to clear the bezel
        Self {
            time: ShapeOffset::new(50, 30),
            date: ShapeOffset::new(70, 40),
        }
    }
}

impl Layout {
    pub fn time_offset(&self, shape: Shape) -> u32 {
        self.time.for_shape(shape)
    }

    pub fn date_offset(&self, shape: Shape) -> u32 {
        self.date.for_shape(shape)
    }
}

/// Full watchface configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceConfig {
    pub variant: FaceVariant,
    pub layout: Layout,
    /// Show the time in 24 hour style
    pub twenty_four_hour: bool,
    pub battery: BatteryPalette,
    pub link: LinkPalette,
    pub geometry: RingGeometry,
}

impl FaceConfig {
    /// Default configuration of a variant
    pub fn for_variant(variant: FaceVariant) -> Self {
        Self {
            variant,
            layout: Layout::default(),
            twenty_four_hour: true,
            battery: BatteryPalette::default(),
            link: LinkPalette::default(),
            geometry: RingGeometry::for_variant(variant),
        }
    }

    pub fn with_twenty_four_hour(mut self, twenty_four_hour: bool) -> Self {
        self.twenty_four_hour = twenty_four_hour;
        self
    }

    /// Whether the emblem overlay is part of the face
    pub fn has_emblem(&self) -> bool {
        self.variant == FaceVariant::Emblem
    }
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self::for_variant(FaceVariant::Rings)
    }
}
