//! FTS Event Record Protocol
//!
//! This crate defines the fixed-width event records an STMicroelectronics
//! FTS touch controller (FTS5CU56A) queues in its event FIFO, together with
//! the register map used to drain and configure it.
//!
//! # Record Overview
//!
//! Every record is exactly 16 bytes. The low two bits of byte 0 select the
//! record class:
//! ```text
//! ┌────────┬──────────────────────────────────────────────┬──────────┐
//! │ BYTE 0 │ BYTES 1..6                                   │ BYTE 7   │
//! │ class  │ class-specific payload                       │ pending  │
//! │ 2 bits │                                              │ 5 bits   │
//! └────────┴──────────────────────────────────────────────┴──────────┘
//!   0 = coordinate, 1 = status, 2 = gesture, 3 = vendor
//! ```
//!
//! The low five bits of byte 7 carry the number of records still waiting
//! in the controller FIFO, whatever the class.

#![no_std]
#![deny(unsafe_code)]

pub mod coordinate;
pub mod record;
pub mod status;

pub use coordinate::{CoordinateEvent, TouchAction, TouchType};
pub use record::{
    pending_count, Event, EventClass, RawRecord, RecordError, EVENT_SIZE, FIFO_MAX,
};
pub use status::{GestureEvent, StatusEvent, StatusKind, StatusType, VendorEvent};

/// Controller register and command map
pub mod reg {
    /// Device id block (8 bytes)
    pub const READ_DEVICE_ID: u8 = 0x22;
    /// Firmware/config version block (8 bytes)
    pub const READ_FW_VERSION: u8 = 0x24;
    /// Force mutual/self calibration
    pub const FORCE_CALIBRATION: u8 = 0x13;
    /// Latest event record (16 bytes)
    pub const READ_ONE_EVENT: u8 = 0x60;
    /// Remaining queued records (N x 16 bytes)
    pub const READ_ALL_EVENT: u8 = 0x61;
    /// Drop everything queued in the FIFO
    pub const CLEAR_ALL_EVENT: u8 = 0x62;
    /// Touch type enable, followed by a little-endian type mask
    pub const TOUCH_TYPE_ENABLE: u8 = 0x39;
    /// Scan mode control
    pub const SCAN_MODE: u8 = 0xA0;

    /// System reset command
    pub const SYSTEM_RESET: [u8; 6] = [0xFA, 0x20, 0x00, 0x00, 0x24, 0x81];
    /// Start active scanning
    pub const SCAN_ENABLE: [u8; 3] = [SCAN_MODE, 0x00, 0x01];
    /// Stop scanning
    pub const SCAN_DISABLE: [u8; 3] = [SCAN_MODE, 0x00, 0x00];
}
