//! Contact session counters
//!
//! Counters scoped to one device instance. They live in an explicitly
//! constructed object so several controllers can be tracked side by side.

/// Session-wide contact bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ContactSession {
    /// Slots currently pressed or moving
    touch_count: u16,
    /// Accepted presses since power-on, never decremented
    all_finger_count: u64,
    /// Set while a multi-touch burst is in progress
    multi_touch_latch: bool,
    /// Multi-touch bursts since power-on
    multi_touch_burst_count: u32,
}

impl ContactSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all counters
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Record an accepted press
    ///
    /// `new_contact` is false when an already active slot is pressed again;
    /// such a press is counted but does not add an active contact.
    ///
    /// Returns true if this press started a multi-touch burst.
    pub fn press(&mut self, new_contact: bool, threshold: u16) -> bool {
        self.all_finger_count = self.all_finger_count.saturating_add(1);

        if !new_contact {
            return false;
        }

        self.touch_count = self.touch_count.saturating_add(1);

        if self.touch_count > threshold && !self.multi_touch_latch {
            self.multi_touch_latch = true;
            self.multi_touch_burst_count = self.multi_touch_burst_count.saturating_add(1);
            return true;
        }

        false
    }

    /// Record an accepted release
    ///
    /// Returns true if this was the last active contact.
    pub fn release(&mut self) -> bool {
        self.touch_count = self.touch_count.saturating_sub(1);

        if self.touch_count == 0 {
            self.multi_touch_latch = false;
            return true;
        }

        false
    }

    /// Number of active contacts
    pub fn touch_count(&self) -> u16 {
        self.touch_count
    }

    /// Total accepted presses
    pub fn all_finger_count(&self) -> u64 {
        self.all_finger_count
    }

    /// Returns true while a multi-touch burst is in progress
    pub fn multi_touch_latch(&self) -> bool {
        self.multi_touch_latch
    }

    /// Number of multi-touch bursts seen
    pub fn multi_touch_burst_count(&self) -> u32 {
        self.multi_touch_burst_count
    }
}
