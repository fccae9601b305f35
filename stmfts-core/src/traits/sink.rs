//! Input sink trait

use crate::report::Contact;

/// Receiver of multi-touch contact updates
///
/// Updates for one drain cycle arrive in record order and are always
/// followed by exactly one [`InputSink::sync`].
pub trait InputSink {
    /// A contact went down in `contact.slot`
    fn began(&mut self, contact: &Contact);

    /// The contact in `contact.slot` moved
    fn moved(&mut self, contact: &Contact);

    /// The contact in `slot` lifted
    fn ended(&mut self, slot: u8);

    /// All updates of the current frame have been delivered
    fn sync(&mut self);
}

impl<S: InputSink + ?Sized> InputSink for &mut S {
    fn began(&mut self, contact: &Contact) {
        (**self).began(contact)
    }

    fn moved(&mut self, contact: &Contact) {
        (**self).moved(contact)
    }

    fn ended(&mut self, slot: u8) {
        (**self).ended(slot)
    }

    fn sync(&mut self) {
        (**self).sync()
    }
}
