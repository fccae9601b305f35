//! Log helpers
//!
//! Pure functions producing short codes for log lines. Nothing here affects
//! tracking state.

use core::fmt;

use stmfts_protocol::{TouchAction, TouchType};

/// Left edge band width
const EDGE_WEST: u16 = 60;
/// Right edge band start
const EDGE_EAST: u16 = 4035;
/// Bottom edge band height
const EDGE_SOUTH: u16 = 48;
/// Top edge band start
const EDGE_NORTH: u16 = 3999;

/// Two-character screen zone code, x band then y band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneCode([u8; 2]);

impl ZoneCode {
    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored
        core::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl PartialEq<&str> for ZoneCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for ZoneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ZoneCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}

/// Classify a position on the 4096x4096 panel grid
///
/// x band: `E` west edge, `e` east edge, `C` centre.
/// y band: `S` south edge, `N` north edge, `C` centre.
pub fn classify_zone(x: u16, y: u16) -> ZoneCode {
    let x_band = if x < EDGE_WEST {
        b'E'
    } else if x > EDGE_EAST {
        b'e'
    } else {
        b'C'
    };

    let y_band = if y < EDGE_SOUTH {
        b'S'
    } else if y > EDGE_NORTH {
        b'N'
    } else {
        b'C'
    };

    ZoneCode([x_band, y_band])
}

/// Single-character code for a touch type
pub fn mode_code(touch_type: TouchType) -> char {
    match touch_type {
        TouchType::Normal => 'N',
        TouchType::Hover => '1',
        TouchType::FlipCover => '2',
        TouchType::Glove => 'G',
        TouchType::Stylus => '4',
        TouchType::Palm => 'P',
        TouchType::Wet => 'W',
        TouchType::Proximity => 'X',
        TouchType::Jig => 'J',
        TouchType::Reserved(_) => '?',
    }
}

/// Single-character code for an action
pub fn action_code(action: TouchAction) -> char {
    match action {
        TouchAction::None => '-',
        TouchAction::Press => 'P',
        TouchAction::Move => 'M',
        TouchAction::Release => 'R',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_corners_and_centre() {
        assert_eq!(classify_zone(30, 20), "ES");
        assert_eq!(classify_zone(2048, 2048), "CC");
        assert_eq!(classify_zone(4050, 4050), "eN");
        assert_eq!(classify_zone(0, 4095), "EN");
        assert_eq!(classify_zone(4095, 0), "eS");
    }

    #[test]
    fn test_zone_band_boundaries() {
        assert_eq!(classify_zone(59, 2000), "EC");
        assert_eq!(classify_zone(60, 2000), "CC");
        assert_eq!(classify_zone(4035, 2000), "CC");
        assert_eq!(classify_zone(4036, 2000), "eC");

        assert_eq!(classify_zone(2000, 47), "CS");
        assert_eq!(classify_zone(2000, 48), "CC");
        assert_eq!(classify_zone(2000, 3999), "CC");
        assert_eq!(classify_zone(2000, 4000), "CN");
    }

    #[test]
    fn test_zone_display() {
        let mut buf: heapless::String<4> = heapless::String::new();
        core::fmt::write(&mut buf, format_args!("{}", classify_zone(10, 4000))).unwrap();
        assert_eq!(buf.as_str(), "EN");
    }

    #[test]
    fn test_mode_codes() {
        assert_eq!(mode_code(TouchType::Normal), 'N');
        assert_eq!(mode_code(TouchType::Glove), 'G');
        assert_eq!(mode_code(TouchType::Palm), 'P');
        assert_eq!(mode_code(TouchType::Reserved(11)), '?');
    }

    #[test]
    fn test_action_codes() {
        assert_eq!(action_code(TouchAction::Press), 'P');
        assert_eq!(action_code(TouchAction::Move), 'M');
        assert_eq!(action_code(TouchAction::Release), 'R');
    }
}
