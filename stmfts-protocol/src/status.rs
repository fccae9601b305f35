//! Status, gesture and vendor records
//!
//! Status and gesture records share their header:
//! ```text
//! byte 0   class[0:1] stype[2:5] sf[6:7]
//! byte 1   status id / gesture id
//! byte 2.. status data 1-5 / gesture data 1-4
//! byte 7   left_event[0:4]
//! ```

use crate::record::{EventClass, RawRecord, EVENT_SIZE};

/// Status record type field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusType {
    CommandDriven,
    Error,
    Information,
    UserInput,
    VendorInfo,
    Other(u8),
}

impl StatusType {
    /// Parse from the 4-bit stype field
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x0F {
            0 => StatusType::CommandDriven,
            1 => StatusType::Error,
            2 => StatusType::Information,
            3 => StatusType::UserInput,
            7 => StatusType::VendorInfo,
            other => StatusType::Other(other),
        }
    }

    /// Convert to the 4-bit stype field
    pub fn to_bits(self) -> u8 {
        match self {
            StatusType::CommandDriven => 0,
            StatusType::Error => 1,
            StatusType::Information => 2,
            StatusType::UserInput => 3,
            StatusType::VendorInfo => 7,
            StatusType::Other(bits) => bits & 0x0F,
        }
    }
}

// Error status ids
const ERR_CORE: u8 = 0x00;
const ERR_QUEUE_FULL: u8 = 0x01;
const ERR_ESD: u8 = 0x02;

// Information status ids
const INFO_READY: u8 = 0x00;
const INFO_WET_MODE: u8 = 0x01;
const INFO_NOISE_MODE: u8 = 0x02;
const INFO_XENOSENSOR_DETECT: u8 = 0x04;

/// Ready-status payload reported after an IC reset
const READY_AFTER_RESET: u8 = 0x10;

/// What a status record means to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusKind {
    /// Controller core error
    CoreError,
    /// Controller event queue overflowed, records were lost
    QueueFull,
    /// Electrostatic discharge detected, controller wants a reset
    EsdDetected,
    /// Controller came out of reset
    IcReset,
    /// Wet mode entered/left
    WetMode,
    /// Noise mode entered/left
    NoiseMode,
    /// Xenosensor detected
    XenosensorDetect,
    /// Anything not interpreted by the host
    Other,
}

/// A decoded status record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusEvent {
    pub stype: StatusType,
    pub sf: u8,
    pub status_id: u8,
    /// Status data 1-5
    pub data: [u8; 5],
    pub left_event: u8,
}

impl StatusEvent {
    /// Decode from a record whose class is status
    pub fn decode(record: &RawRecord) -> Self {
        let mut data = [0u8; 5];
        data.copy_from_slice(&record[2..7]);

        Self {
            stype: StatusType::from_bits(record[0] >> 2),
            sf: (record[0] >> 6) & 0x03,
            status_id: record[1],
            data,
            left_event: record[7] & 0x1F,
        }
    }

    /// Encode into a complete record
    pub fn encode(&self) -> RawRecord {
        let mut b = [0u8; EVENT_SIZE];
        b[0] = EventClass::Status.to_bits() | (self.stype.to_bits() << 2) | ((self.sf & 0x03) << 6);
        b[1] = self.status_id;
        b[2..7].copy_from_slice(&self.data);
        b[7] = self.left_event & 0x1F;
        b
    }

    /// Interpret the status type and id
    pub fn kind(&self) -> StatusKind {
        match (self.stype, self.status_id) {
            (StatusType::Error, ERR_CORE) => StatusKind::CoreError,
            (StatusType::Error, ERR_QUEUE_FULL) => StatusKind::QueueFull,
            (StatusType::Error, ERR_ESD) => StatusKind::EsdDetected,
            (StatusType::Information, INFO_READY) if self.data[0] == READY_AFTER_RESET => {
                StatusKind::IcReset
            }
            (StatusType::Information, INFO_WET_MODE) => StatusKind::WetMode,
            (StatusType::Information, INFO_NOISE_MODE) => StatusKind::NoiseMode,
            (StatusType::Information, INFO_XENOSENSOR_DETECT) => StatusKind::XenosensorDetect,
            _ => StatusKind::Other,
        }
    }
}

/// A decoded gesture record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureEvent {
    pub stype: u8,
    pub sf: u8,
    pub gesture_id: u8,
    /// Gesture data 1-4
    pub data: [u8; 4],
    pub left_event: u8,
}

impl GestureEvent {
    /// Decode from a record whose class is gesture
    pub fn decode(record: &RawRecord) -> Self {
        let mut data = [0u8; 4];
        data.copy_from_slice(&record[2..6]);

        Self {
            stype: (record[0] >> 2) & 0x0F,
            sf: (record[0] >> 6) & 0x03,
            gesture_id: record[1],
            data,
            left_event: record[7] & 0x1F,
        }
    }

    /// Encode into a complete record
    pub fn encode(&self) -> RawRecord {
        let mut b = [0u8; EVENT_SIZE];
        b[0] = EventClass::Gesture.to_bits() | ((self.stype & 0x0F) << 2) | ((self.sf & 0x03) << 6);
        b[1] = self.gesture_id;
        b[2..6].copy_from_slice(&self.data);
        b[7] = self.left_event & 0x1F;
        b
    }
}

/// Marker in byte 1 of an echo record
const VENDOR_ECHO: u8 = 0x01;

/// A vendor record, kept opaque
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VendorEvent {
    pub raw: RawRecord,
}

impl VendorEvent {
    pub fn decode(record: &RawRecord) -> Self {
        Self { raw: *record }
    }

    /// Returns true if this record echoes a host command
    pub fn is_echo(&self) -> bool {
        self.raw[1] == VENDOR_ECHO
    }
}
