//! Event transport trait

use stmfts_protocol::RawRecord;

/// Register-level access to the controller event FIFO
///
/// Implementations perform the raw block reads (I2C or equivalent). Both
/// calls are synchronous and may fail; a failure aborts the current drain
/// cycle only.
pub trait EventTransport {
    /// Error type for bus operations
    type Error;

    /// Read one record from `reg` (the latest-event register)
    fn read_one(&mut self, reg: u8, record: &mut RawRecord) -> Result<(), Self::Error>;

    /// Read `buf.len()` bytes of consecutive records from `reg`
    ///
    /// `buf.len()` is always a multiple of the record size.
    fn read_bulk(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: EventTransport + ?Sized> EventTransport for &mut T {
    type Error = T::Error;

    fn read_one(&mut self, reg: u8, record: &mut RawRecord) -> Result<(), Self::Error> {
        (**self).read_one(reg, record)
    }

    fn read_bulk(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read_bulk(reg, buf)
    }
}
