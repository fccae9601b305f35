//! Finger slot table
//!
//! One [`FingerSlot`] per trackable contact. The table is the authoritative
//! record of what is touching the surface; only the finger state machine
//! mutates it.

use stmfts_protocol::{TouchAction, TouchType};

use crate::report::Contact;

/// Number of simultaneously trackable contacts
pub const MAX_FINGERS: usize = 10;

/// Tracking state of a slot, derived from its last accepted action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotState {
    /// Nothing touching
    Idle,
    /// Contact pressed, not moved yet
    Pressed,
    /// Contact moved at least once since press
    Moved,
}

/// Persistent state of one contact slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FingerSlot {
    /// Slot index
    pub id: u8,
    pub touch_type: TouchType,
    pub prev_touch_type: TouchType,
    /// Last accepted action; never `Release` between records
    pub action: TouchAction,
    /// Action before the last accepted transition
    pub prev_action: TouchAction,
    pub x: u16,
    pub y: u16,
    /// Press anchor
    pub prev_x: u16,
    pub prev_y: u16,
    /// Pressure, 1-63
    pub z: u8,
    pub major: u8,
    pub minor: u8,
    pub is_palm: bool,
    /// Number of times this contact turned into a palm
    pub palm_count: u32,
    /// Moves since press
    pub move_count: u16,
    pub left_event: u8,
    pub max_energy: bool,
    pub max_energy_x: u16,
    pub max_energy_y: u16,
    pub noise_level: u8,
    /// Running max since press
    pub max_strength: u8,
    /// Running max since press
    pub hover_id_num: u8,
}

impl FingerSlot {
    /// Create an idle slot
    pub fn new(id: u8) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Current tracking state
    pub fn state(&self) -> SlotState {
        match self.action {
            TouchAction::Press => SlotState::Pressed,
            TouchAction::Move => SlotState::Moved,
            TouchAction::None | TouchAction::Release => SlotState::Idle,
        }
    }

    /// Returns true if a contact is down in this slot
    pub fn is_active(&self) -> bool {
        self.state() != SlotState::Idle
    }

    /// Distance travelled from the press anchor
    pub fn travel(&self) -> (i32, i32) {
        (
            self.x as i32 - self.prev_x as i32,
            self.y as i32 - self.prev_y as i32,
        )
    }

    /// Contact as reported to the input sink
    pub fn contact(&self) -> Contact {
        Contact {
            slot: self.id,
            x: self.x,
            y: self.y,
            major: self.major,
            minor: self.minor,
            pressure: self.z,
        }
    }
}

/// Fixed table of finger slots
#[derive(Debug, Clone)]
pub struct SlotTable {
    slots: [FingerSlot; MAX_FINGERS],
}

impl Default for SlotTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotTable {
    /// Create a table with every slot idle
    pub fn new() -> Self {
        let mut slots = [FingerSlot::default(); MAX_FINGERS];
        for (id, slot) in slots.iter_mut().enumerate() {
            slot.id = id as u8;
        }
        Self { slots }
    }

    /// Return every slot to idle and clear its history
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Get a slot by index, `None` if out of range
    pub fn get(&self, id: u8) -> Option<&FingerSlot> {
        self.slots.get(id as usize)
    }

    pub(crate) fn get_mut(&mut self, id: u8) -> Option<&mut FingerSlot> {
        self.slots.get_mut(id as usize)
    }

    /// Number of slots with a contact down
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_active()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FingerSlot> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_idle() {
        let table = SlotTable::new();
        assert_eq!(table.active_count(), 0);
        for (i, slot) in table.iter().enumerate() {
            assert_eq!(slot.id as usize, i);
            assert_eq!(slot.state(), SlotState::Idle);
        }
    }

    #[test]
    fn test_bounds_checked_access() {
        let mut table = SlotTable::new();
        assert!(table.get(9).is_some());
        assert!(table.get(10).is_none());
        assert!(table.get_mut(15).is_none());
    }

    #[test]
    fn test_state_from_action() {
        let mut slot = FingerSlot::new(2);
        assert_eq!(slot.state(), SlotState::Idle);

        slot.action = TouchAction::Press;
        assert_eq!(slot.state(), SlotState::Pressed);
        assert!(slot.is_active());

        slot.action = TouchAction::Move;
        assert_eq!(slot.state(), SlotState::Moved);

        slot.action = TouchAction::Release;
        assert_eq!(slot.state(), SlotState::Idle);
    }

    #[test]
    fn test_travel() {
        let mut slot = FingerSlot::new(0);
        slot.prev_x = 100;
        slot.prev_y = 200;
        slot.x = 90;
        slot.y = 260;
        assert_eq!(slot.travel(), (-10, 60));
    }

    #[test]
    fn test_reset_keeps_ids() {
        let mut table = SlotTable::new();
        if let Some(slot) = table.get_mut(4) {
            slot.action = TouchAction::Move;
            slot.move_count = 7;
        }
        assert_eq!(table.active_count(), 1);

        table.reset();
        assert_eq!(table.active_count(), 0);
        assert_eq!(table.get(4).map(|s| s.id), Some(4));
        assert_eq!(table.get(4).map(|s| s.move_count), Some(0));
    }
}
