//! Minimal HAL crate for the DM37xx (OMAP3) application processor, running under Linux.
//!
//! Peripherals are reached through `/dev/mem`, without a kernel driver. It is minimal in
//! the sense that it does not track peripheral ownership, e.g. it is possible to start a
//! timer whose functional clock was never enabled.

pub mod clock;
pub mod mmio;
pub mod padconf;
pub mod target;
pub mod timer;

mod error;

pub use error::Error;
pub use target::{Target, DM3730_GPT10};
