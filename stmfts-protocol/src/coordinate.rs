//! Coordinate records
//!
//! Layout (bit positions LSB-first within each byte):
//! ```text
//! byte 0   class[0:1] slot[2:5] action[6:7]
//! byte 1   x[11:4]
//! byte 2   y[11:4]
//! byte 3   y[3:0] in [0:3], x[3:0] in [4:7]
//! byte 4   major
//! byte 5   minor
//! byte 6   z[0:5] type[3:2] in [6:7]
//! byte 7   left_event[0:4] max_energy[5] type[1:0] in [6:7]
//! byte 8   noise level
//! byte 9   max strength
//! byte 10  hover id num[0:3]
//! ```

use crate::record::{EventClass, RawRecord, EVENT_SIZE};

/// Contact action reported for a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchAction {
    #[default]
    None,
    Press,
    Move,
    Release,
}

// Wire format values
const ACTION_NONE: u8 = 0;
const ACTION_PRESS: u8 = 1;
const ACTION_MOVE: u8 = 2;
const ACTION_RELEASE: u8 = 3;

impl TouchAction {
    /// Parse from the 2-bit action field
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            ACTION_PRESS => TouchAction::Press,
            ACTION_MOVE => TouchAction::Move,
            ACTION_RELEASE => TouchAction::Release,
            _ => TouchAction::None,
        }
    }

    /// Convert to the 2-bit action field
    pub fn to_bits(self) -> u8 {
        match self {
            TouchAction::None => ACTION_NONE,
            TouchAction::Press => ACTION_PRESS,
            TouchAction::Move => ACTION_MOVE,
            TouchAction::Release => ACTION_RELEASE,
        }
    }
}

/// Contact classification reported by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchType {
    #[default]
    Normal,
    Hover,
    FlipCover,
    Glove,
    Stylus,
    Palm,
    Wet,
    Proximity,
    Jig,
    /// Value the controller does not define (9..=15)
    Reserved(u8),
}

impl TouchType {
    /// Parse from the 4-bit type field
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x0F {
            0 => TouchType::Normal,
            1 => TouchType::Hover,
            2 => TouchType::FlipCover,
            3 => TouchType::Glove,
            4 => TouchType::Stylus,
            5 => TouchType::Palm,
            6 => TouchType::Wet,
            7 => TouchType::Proximity,
            8 => TouchType::Jig,
            other => TouchType::Reserved(other),
        }
    }

    /// Convert to the 4-bit type field
    pub fn to_bits(self) -> u8 {
        match self {
            TouchType::Normal => 0,
            TouchType::Hover => 1,
            TouchType::FlipCover => 2,
            TouchType::Glove => 3,
            TouchType::Stylus => 4,
            TouchType::Palm => 5,
            TouchType::Wet => 6,
            TouchType::Proximity => 7,
            TouchType::Jig => 8,
            TouchType::Reserved(bits) => bits & 0x0F,
        }
    }

    /// Bit of this type in the controller's touch type enable mask
    pub fn mask_bit(self) -> u16 {
        1 << self.to_bits()
    }

    /// Returns true if contacts of this type are forwarded as finger contacts
    ///
    /// Hover, flip cover, stylus, proximity and jig contacts are tracked
    /// but never reported.
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            TouchType::Normal | TouchType::Palm | TouchType::Wet | TouchType::Glove
        )
    }
}

/// A decoded coordinate record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoordinateEvent {
    /// Slot (touch id), 0-15 on the wire
    pub slot: u8,
    /// Contact action
    pub action: TouchAction,
    /// X position (12 bits)
    pub x: u16,
    /// Y position (12 bits)
    pub y: u16,
    /// Touch ellipse major axis
    pub major: u8,
    /// Touch ellipse minor axis
    pub minor: u8,
    /// Pressure (6 bits), may be 0 on the wire
    pub z: u8,
    /// Contact classification
    pub touch_type: TouchType,
    /// Left event field (5 bits)
    pub left_event: u8,
    /// Set when this sample carries the peak signal energy
    pub max_energy: bool,
    /// Noise level
    pub noise_level: u8,
    /// Signal strength
    pub max_strength: u8,
    /// Hover id number (4 bits)
    pub hover_id_num: u8,
}

impl CoordinateEvent {
    /// Decode from a record whose class is coordinate
    pub fn decode(record: &RawRecord) -> Self {
        let b = record;
        let type_high = (b[6] >> 6) & 0x03;
        let type_low = (b[7] >> 6) & 0x03;

        Self {
            slot: (b[0] >> 2) & 0x0F,
            action: TouchAction::from_bits(b[0] >> 6),
            x: ((b[1] as u16) << 4) | ((b[3] >> 4) & 0x0F) as u16,
            y: ((b[2] as u16) << 4) | (b[3] & 0x0F) as u16,
            major: b[4],
            minor: b[5],
            z: b[6] & 0x3F,
            touch_type: TouchType::from_bits((type_high << 2) | type_low),
            left_event: b[7] & 0x1F,
            max_energy: (b[7] & 0x20) != 0,
            noise_level: b[8],
            max_strength: b[9],
            hover_id_num: b[10] & 0x0F,
        }
    }

    /// Encode into a complete record
    ///
    /// Fields wider than their wire slot are truncated to the wire width.
    pub fn encode(&self) -> RawRecord {
        let mut b = [0u8; EVENT_SIZE];
        let ttype = self.touch_type.to_bits();

        b[0] = EventClass::Coordinate.to_bits()
            | ((self.slot & 0x0F) << 2)
            | (self.action.to_bits() << 6);
        b[1] = (self.x >> 4) as u8;
        b[2] = (self.y >> 4) as u8;
        b[3] = (((self.x & 0x0F) as u8) << 4) | (self.y & 0x0F) as u8;
        b[4] = self.major;
        b[5] = self.minor;
        b[6] = (self.z & 0x3F) | ((ttype >> 2) << 6);
        b[7] = (self.left_event & 0x1F)
            | if self.max_energy { 0x20 } else { 0 }
            | ((ttype & 0x03) << 6);
        b[8] = self.noise_level;
        b[9] = self.max_strength;
        b[10] = self.hover_id_num & 0x0F;
        b
    }
}
