//! FTS touch controller drivers
//!
//! Hardware bindings for the tracking engine in `stmfts-core`:
//!
//! - I2C event transport over `embedded-hal` 1.0
//! - FTS5CU56A power sequencing and interrupt handling
//! - Async mutex wrapper for sharing the driver between tasks

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
pub(crate) mod fmt;

pub mod fts5cu56a;
pub mod i2c;
pub mod shared;

pub use fts5cu56a::{touch_type_command, DeviceError, DeviceInfo, Fts5cu56a};
pub use i2c::I2cTransport;
pub use shared::SharedTouchscreen;
