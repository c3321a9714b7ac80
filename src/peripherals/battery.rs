//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{
    gpio::{AnyPin, Input},
    saadc::Saadc,
};
use ringface::{
    power::{self, InvalidMeasurement},
    PowerState,
};

/// Battery API
pub struct Battery {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'static, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'static, AnyPin>,
    /// Last sampled state
    state: PowerState,
}

impl Battery {
    /// Configure battery settings on boot and take a first sample
    pub async fn init(adc: Saadc<'static, 1>, charge_pin: Input<'static, AnyPin>) -> Self {
        let mut battery = Self {
            adc,
            pin_charge_indication: charge_pin,
            state: PowerState::default(),
        };
        battery.update().await;
        battery
    }

    /// Last sampled state. Call `update()` first to fetch current data.
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Sample the hardware. Returns whether the state changed.
    pub async fn update(&mut self) -> bool {
        let charging = self.pin_charge_indication.is_low();
        let percent = match self.voltage().await {
            Ok(millivolts) => power::percent_from_millivolts(millivolts),
            Err(InvalidMeasurement) => {
                defmt::warn!("Ignoring invalid battery measurement");
                self.state.percent
            }
        };

        let state = PowerState::new(charging, percent);
        let changed = state != self.state;
        self.state = state;
        changed
    }

    /// Battery voltage in millivolts
    async fn voltage(&mut self) -> Result<u16, InvalidMeasurement> {
        let mut buf = [0; 1];
        self.adc.sample(&mut buf).await;
        power::millivolts_from_adc(buf[0])
    }
}
