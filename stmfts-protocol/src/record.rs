//! Record classification and decoding.
//!
//! Record format:
//! - BYTE 0 bits[0:1]: record class
//! - BYTE 0 bits[2:7]: class-specific (slot/action or status type)
//! - BYTES 1..6: class-specific payload
//! - BYTE 7 bits[0:4]: records still pending in the controller FIFO
//! - BYTES 8..15: class-specific or reserved

use crate::coordinate::CoordinateEvent;
use crate::status::{GestureEvent, StatusEvent, VendorEvent};

/// Size of one event record in bytes
pub const EVENT_SIZE: usize = 16;

/// Capacity of the controller event FIFO in records
pub const FIFO_MAX: usize = 31;

/// One undecoded event record
pub type RawRecord = [u8; EVENT_SIZE];

/// Mask of the record class bits in byte 0
const CLASS_MASK: u8 = 0x03;

/// Mask of the pending-count field in byte 7
const PENDING_MASK: u8 = 0x1F;

/// Errors that can occur when handling raw records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Slice is not exactly one record long
    InvalidLength,
}

/// Record class carried in the low two bits of byte 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventClass {
    Coordinate,
    Status,
    Gesture,
    Vendor,
}

// Wire format values
const CLASS_COORDINATE: u8 = 0;
const CLASS_STATUS: u8 = 1;
const CLASS_GESTURE: u8 = 2;
const CLASS_VENDOR: u8 = 3;

impl EventClass {
    /// Classify a record by its first byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte & CLASS_MASK {
            CLASS_COORDINATE => Some(EventClass::Coordinate),
            CLASS_STATUS => Some(EventClass::Status),
            CLASS_GESTURE => Some(EventClass::Gesture),
            CLASS_VENDOR => Some(EventClass::Vendor),
            _ => None,
        }
    }

    /// Wire value of this class
    pub fn to_bits(self) -> u8 {
        match self {
            EventClass::Coordinate => CLASS_COORDINATE,
            EventClass::Status => CLASS_STATUS,
            EventClass::Gesture => CLASS_GESTURE,
            EventClass::Vendor => CLASS_VENDOR,
        }
    }
}

/// Number of records the controller reports as still queued behind this one
///
/// This is the raw 5-bit field; callers are responsible for clamping it to
/// what their staging buffer can hold.
pub fn pending_count(record: &RawRecord) -> u8 {
    record[7] & PENDING_MASK
}

/// A decoded event record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Finger contact update
    Coordinate(CoordinateEvent),
    /// Controller status report
    Status(StatusEvent),
    /// Gesture report
    Gesture(GestureEvent),
    /// Vendor-specific record, kept opaque
    Vendor(VendorEvent),
    /// Record that matched no known class
    Unknown(RawRecord),
}

impl Event {
    /// Decode a complete record
    ///
    /// Decoding never fails: a record that cannot be classified is
    /// returned as [`Event::Unknown`] for the caller to drop.
    pub fn decode(record: &RawRecord) -> Self {
        match EventClass::from_byte(record[0]) {
            Some(EventClass::Coordinate) => Event::Coordinate(CoordinateEvent::decode(record)),
            Some(EventClass::Status) => Event::Status(StatusEvent::decode(record)),
            Some(EventClass::Gesture) => Event::Gesture(GestureEvent::decode(record)),
            Some(EventClass::Vendor) => Event::Vendor(VendorEvent::decode(record)),
            None => Event::Unknown(*record),
        }
    }

    /// Decode a record from a byte slice
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        let record: &RawRecord = bytes.try_into().map_err(|_| RecordError::InvalidLength)?;
        Ok(Self::decode(record))
    }

    /// Class of this event, `None` for unknown records
    pub fn class(&self) -> Option<EventClass> {
        match self {
            Event::Coordinate(_) => Some(EventClass::Coordinate),
            Event::Status(_) => Some(EventClass::Status),
            Event::Gesture(_) => Some(EventClass::Gesture),
            Event::Vendor(_) => Some(EventClass::Vendor),
            Event::Unknown(_) => None,
        }
    }
}
