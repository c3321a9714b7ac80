//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565, primitives::Rectangle};

use crate::{
    config::{DisplayCapabilities, FaceConfig},
    error::Error,
};

pub mod emblem;
pub mod label;
pub mod ring_watchface;
pub mod rings;

#[cfg(test)]
pub(crate) mod test_support;

pub trait WatchFace {
    /// Create new watchface
    fn new(config: FaceConfig, capabilities: DisplayCapabilities) -> Self;

    /// Paint the watchface into `target`, reading the current state from `ambient`
    fn render<D, A>(
        &mut self,
        target: &mut D,
        bounds: Rectangle,
        ambient: &A,
    ) -> Result<(), Error<D::Error>>
    where
        D: DrawTarget<Color = Rgb565>,
        A: Ambient + ?Sized;
}

/// Pull-based access to the state the face displays.
///
/// Every call returns a fresh snapshot. A face is free to not call a method
/// at all when the value has no visual effect.
pub trait Ambient {
    /// Current wall clock reading
    fn clock(&self) -> ClockReading;
    /// Current battery state
    fn power(&self) -> PowerState;
    /// Current companion link state
    fn link(&self) -> LinkState;
}

/// Wall clock reading for one paint pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    /// Hour of the day (0–23)
    pub hour: u8,
    pub minute: u8,
    pub weekday: Weekday,
    /// Month of the year (1–12)
    pub month: u8,
    /// Day of the month (1–31)
    pub day: u8,
    /// Display the time in 24 hour style
    pub twenty_four_hour: bool,
}

impl ClockReading {
    /// Take a reading from a local date and time
    pub fn new(time: NaiveDateTime, twenty_four_hour: bool) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            weekday: time.weekday(),
            month: time.month() as u8,
            day: time.day() as u8,
            twenty_four_hour,
        }
    }

    /// Whether the reading is past noon
    pub fn is_pm(&self) -> bool {
        self.hour >= 12
    }

    /// Hour on a 12 hour dial (1–12)
    pub fn hour12(&self) -> u8 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }
}

/// Battery state snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerState {
    /// Charger connected
    pub charging: bool,
    /// Remaining capacity in percent (0–100)
    pub percent: u8,
}

impl PowerState {
    /// Create a new snapshot, clamping the percentage to 100
    pub fn new(charging: bool, percent: u8) -> Self {
        Self {
            charging,
            percent: percent.min(100),
        }
    }
}

/// Companion link snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkState {
    pub connected: bool,
}

impl LinkState {
    pub fn new(connected: bool) -> Self {
        Self { connected }
    }
}
