//! General system configuration

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::Priority,
};
use ringface::{DisplayCapabilities, FaceConfig, FaceVariant, Shape};

/// Offset of local time to UTC in seconds
pub const TIMEZONE: i32 = 1 * 3_600;

/// Show the time in 24 hour style
pub const TWENTY_FOUR_HOUR: bool = true;

/// Face variant flashed onto the watch
pub const VARIANT: FaceVariant = FaceVariant::Emblem;

/// The PineTime has a square color LCD
pub const CAPABILITIES: DisplayCapabilities = DisplayCapabilities::new(Shape::Rectangular, true);

/// Watchface configuration for this board
pub fn face_config() -> FaceConfig {
    FaceConfig::for_variant(VARIANT).with_twenty_four_hour(TWENTY_FOUR_HOUR)
}

pub struct SystemConfig {}

impl SystemConfig {
    /// Create new system configuration
    pub fn new() -> Config {
        // Generate default config, required because Config is set as
        // `non_exhaustive`
        let mut config = Config::default();

        // Set high-frequency and low-frequency clock sources to external
        config.hfclk_source = HfclkSource::ExternalXtal;
        config.lfclk_source = LfclkSource::ExternalXtal;

        // Enable DC/DC regulator to massively reduce runtime current consumption
        config.dcdc.reg1 = true;

        // Configure interrupt priorities to exclude 0 (default), 1, and 4,
        // which are reserved for the nrf SoftDevice
        config.gpiote_interrupt_priority = Priority::P2;
        config.time_interrupt_priority = Priority::P2;

        // Allow debugging
        config.debug = Debug::Allowed;

        config
    }
}
