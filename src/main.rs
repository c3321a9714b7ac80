#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Core
use core::cell::Cell;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pin, Pull},
    interrupt::{self, InterruptExt, Priority},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::blocking_mutex::{raw::ThreadModeRawMutex, Mutex};
use embassy_time::{Duration, Timer};
use embedded_graphics::geometry::Dimensions;
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{backlight::Backlight, battery::Battery, display::Display};
use ringface::{Ambient, ClockReading, Face, Invalidator, LinkState, PowerState, Source};
use system::{
    bluetooth::{self, Server},
    config::{self, SystemConfig},
    time::{TimeManager, TimeReference},
};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

/// Brightness the backlight is switched to after boot
const BRIGHTNESS: u8 = 2;

// Shared state
static INVALIDATOR: Invalidator<ThreadModeRawMutex> = Invalidator::new();
static POWER: Mutex<ThreadModeRawMutex, Cell<PowerState>> = Mutex::new(Cell::new(PowerState {
    charging: false,
    percent: 0,
}));
static LINK: Mutex<ThreadModeRawMutex, Cell<LinkState>> =
    Mutex::new(Cell::new(LinkState { connected: false }));

static SERVER: StaticCell<Server> = StaticCell::new();

/// Current state as seen by the paint task
struct Snapshot {
    time: TimeManager,
}

impl Ambient for Snapshot {
    fn clock(&self) -> ClockReading {
        ClockReading::new(self.time.local_time(), config::TWENTY_FOUR_HOUR)
    }

    fn power(&self) -> PowerState {
        POWER.lock(|power| power.get())
    }

    fn link(&self) -> LinkState {
        LINK.lock(|link| link.get())
    }
}

/// Run the SoftDevice event loop
#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Track the companion link.
#[embassy_executor::task(pool_size = 1)]
async fn track_link(sd: &'static Softdevice, server: &'static Server) {
    loop {
        let connection = match bluetooth::advertise(sd).await {
            Ok(connection) => connection,
            Err(e) => {
                defmt::warn!("Advertising failed: {:?}", e);
                Timer::after(Duration::from_secs(1)).await;
                continue;
            }
        };

        set_link(true);
        bluetooth::serve(&connection, server).await;
        set_link(false);
    }
}

fn set_link(connected: bool) {
    defmt::info!("Companion {}", if connected { "connected" } else { "disconnected" });
    LINK.lock(|link| link.set(LinkState::new(connected)));
    INVALIDATOR.invalidate(Source::Link);
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery, server: &'static Server) {
    loop {
        if battery.update().await {
            let state = battery.state();
            defmt::info!(
                "Battery status: {} ({})",
                state.percent,
                if state.charging {
                    "charging"
                } else {
                    "discharging"
                }
            );
            POWER.lock(|power| power.set(state));
            server.publish_battery_level(state.percent);
            INVALIDATOR.invalidate(Source::Battery);
        }

        // Re-schedule the timer interrupt in 1s
        Timer::after(Duration::from_secs(1)).await;
    }
}

/// Request a repaint at every minute boundary.
#[embassy_executor::task(pool_size = 1)]
async fn minute_tick(time: TimeManager) {
    loop {
        Timer::after(time.until_next_minute()).await;
        INVALIDATOR.invalidate(Source::MinuteTick);
    }
}

/// Repaint the face whenever it was invalidated.
#[embassy_executor::task(pool_size = 1)]
async fn paint(mut display: Display, mut face: Face, snapshot: Snapshot) {
    loop {
        INVALIDATOR.wait().await;
        if let Err(e) = face.paint(&mut display, &snapshot) {
            defmt::warn!("Painting the face failed: {}", defmt::Debug2Format(&e));
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Initialize Bluetooth
    let sd = Softdevice::enable(&bluetooth::generate_config());
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    let sd: &'static Softdevice = sd;
    unwrap!(spawner.spawn(softdevice_task(sd)));

    // Peripheral interrupts must stay clear of priorities 0, 1 and 4,
    // which belong to the SoftDevice
    interrupt::SAADC.set_priority(Priority::P3);
    interrupt::SPIM2_SPIS2_SPI2.set_priority(Priority::P3);

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initalize Battery, pin P0.12: charge indication
    let battery = Battery::init(saadc, Input::new(p.P0_12.degrade(), Pull::None)).await;
    POWER.lock(|power| power.set(battery.state()));

    // Initialize Backlight
    let backlight = Backlight::init(
        Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
    );

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let mut display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_18.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26.degrade(), Level::Low, OutputDrive::Standard),
        backlight,
    ));
    unwrap!(display.set_brightness(BRIGHTNESS));

    // Wall clock
    let time = TimeManager::init(TimeReference::from_epoch(UTC_EPOCH), config::TIMEZONE);

    // Load the face, this requests the first frame
    let face = Face::load(
        config::face_config(),
        config::CAPABILITIES,
        display.bounding_box(),
        &INVALIDATOR,
    );

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(track_link(sd, server)));
    unwrap!(spawner.spawn(update_battery_status(battery, server)));
    unwrap!(spawner.spawn(minute_tick(time)));
    unwrap!(spawner.spawn(paint(display, face, Snapshot { time })));
}
