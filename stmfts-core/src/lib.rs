//! FTS Finger Tracking Core
//!
//! Board-agnostic tracking engine for STMicroelectronics FTS touch
//! controllers. The engine drains the controller event FIFO through an
//! [`EventTransport`], runs each coordinate record through a per-slot state
//! machine and reports accepted transitions to an [`InputSink`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   records   ┌──────────────┐  updates  ┌────────────┐
//! │ EventTransport│ ─────────▶ │ TouchEngine  │ ────────▶ │ InputSink  │
//! │ (I2C, mock)  │             │ slots/session│           │ (+ sync)   │
//! └──────────────┘             └──────────────┘           └────────────┘
//! ```
//!
//! All state is owned by one [`TouchEngine`] per controller; there are no
//! globals.

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
pub(crate) mod fmt;

pub mod config;
pub mod diagnostics;
pub mod drain;
pub mod engine;
pub mod error;
pub mod machine;
pub mod report;
pub mod session;
pub mod slot;
pub mod traits;

pub use config::TouchConfig;
pub use engine::{DrainSummary, RecordOutcome, TouchEngine};
pub use error::{Anomaly, DrainError};
pub use report::{Contact, ContactEvent, ContactUpdate};
pub use slot::{FingerSlot, SlotState, SlotTable, MAX_FINGERS};
pub use traits::{EventTransport, InputSink};
