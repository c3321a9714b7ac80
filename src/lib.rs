//! Ring watchface
//!
//! A clock face with two concentric rings: the outer one colored by battery
//! state, the inner one by the companion link. The face is repainted once per
//! minute and whenever the battery or link state changes.
//!
//! Everything in this library is board independent and draws into any
//! [`DrawTarget`](embedded_graphics::draw_target::DrawTarget) with `Rgb565`
//! pixels. The PineTime firmware lives in `src/main.rs` behind the `firmware`
//! feature.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod face;
pub mod power;
pub mod ui;

pub use config::{DisplayCapabilities, FaceConfig, FaceVariant, Shape};
pub use error::Error;
pub use events::{Invalidator, Source, Subscriptions};
pub use face::Face;
pub use ui::{Ambient, ClockReading, LinkState, PowerState, WatchFace};
