//! Contact reporter
//!
//! Translates accepted slot transitions into updates for the input sink.
//! The reporter keeps no state of its own.

use heapless::Vec;

use crate::traits::InputSink;

/// Contact data delivered with began/moved updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Contact {
    pub slot: u8,
    pub x: u16,
    pub y: u16,
    pub major: u8,
    pub minor: u8,
    pub pressure: u8,
}

/// One accepted slot transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContactUpdate {
    Began(Contact),
    Moved(Contact),
    Ended(u8),
}

impl ContactUpdate {
    /// Slot this update refers to
    pub fn slot(&self) -> u8 {
        match self {
            ContactUpdate::Began(contact) | ContactUpdate::Moved(contact) => contact.slot,
            ContactUpdate::Ended(slot) => *slot,
        }
    }

    /// Deliver this update to `sink`
    pub fn deliver<S: InputSink + ?Sized>(&self, sink: &mut S) {
        match self {
            ContactUpdate::Began(contact) => sink.began(contact),
            ContactUpdate::Moved(contact) => sink.moved(contact),
            ContactUpdate::Ended(slot) => sink.ended(*slot),
        }
    }
}

/// Everything an input sink can observe, in delivery order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContactEvent {
    Began(Contact),
    Moved(Contact),
    Ended(u8),
    FrameSync,
}

impl From<ContactUpdate> for ContactEvent {
    fn from(update: ContactUpdate) -> Self {
        match update {
            ContactUpdate::Began(contact) => ContactEvent::Began(contact),
            ContactUpdate::Moved(contact) => ContactEvent::Moved(contact),
            ContactUpdate::Ended(slot) => ContactEvent::Ended(slot),
        }
    }
}

/// Buffering sink
///
/// Collects updates for a consumer that runs outside the interrupt
/// context. The last free entry is kept for the frame sync, so every
/// buffered update is followed by one; updates beyond that are dropped.
impl<const N: usize> InputSink for Vec<ContactEvent, N> {
    fn began(&mut self, contact: &Contact) {
        push_update(self, ContactEvent::Began(*contact));
    }

    fn moved(&mut self, contact: &Contact) {
        push_update(self, ContactEvent::Moved(*contact));
    }

    fn ended(&mut self, slot: u8) {
        push_update(self, ContactEvent::Ended(slot));
    }

    fn sync(&mut self) {
        if self.push(ContactEvent::FrameSync).is_err() {
            warn!("Contact buffer full, dropping frame sync");
        }
    }
}

fn push_update<const N: usize>(events: &mut Vec<ContactEvent, N>, event: ContactEvent) {
    if events.len() + 1 >= events.capacity() || events.push(event).is_err() {
        warn!("Contact buffer full, dropping event");
    }
}
