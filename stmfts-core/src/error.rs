//! Error and anomaly types
//!
//! Only transport failures abort a drain cycle. Everything else the engine
//! meets in the record stream is an [`Anomaly`]: logged, counted, and
//! recovered from locally.

/// Errors that abort a drain cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrainError<E> {
    /// Reading records from the controller failed
    Transport(E),
}

/// Irregularities in the record stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Anomaly {
    // Malformed records (dropped)
    /// Record class could not be determined
    UnknownClass,
    /// Slot id outside the slot table
    SlotOutOfRange(u8),

    // Protocol anomalies (clamped or ignored)
    /// Controller claimed more pending records than the FIFO holds
    PendingCountClamped(u8),
    /// Move reported while no contact is active
    MoveWithoutTouch,
    /// Move reported for a slot that was never pressed or already released
    MoveAfterRelease,
    /// Release reported for a slot that is not active
    ReleaseWithoutPress,
    /// Coordinate record without an action
    UnsupportedAction,
}

impl Anomaly {
    /// Returns true if the offending record was malformed rather than
    /// merely out of sequence
    pub fn is_malformed(&self) -> bool {
        matches!(self, Anomaly::UnknownClass | Anomaly::SlotOutOfRange(_))
    }
}
