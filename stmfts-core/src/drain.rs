//! Event FIFO staging
//!
//! One drain reads the latest record, then the records the controller says
//! are still queued behind it, into a fixed buffer sized for a full FIFO.

use stmfts_protocol::{pending_count, reg, RawRecord, EVENT_SIZE, FIFO_MAX};

use crate::traits::EventTransport;

/// Records the staging buffer can hold
pub const STAGING_RECORDS: usize = FIFO_MAX;

/// Clamp a reported pending count to what fits behind the first record
///
/// Returns the count to read and whether it was clamped.
pub fn clamp_pending(reported: u8) -> (usize, bool) {
    let reported = reported as usize;
    if reported >= FIFO_MAX {
        (FIFO_MAX - 1, true)
    } else {
        (reported, false)
    }
}

/// Buffer for one drain cycle
#[derive(Debug, Clone)]
pub struct StagingBuffer {
    data: [u8; STAGING_RECORDS * EVENT_SIZE],
    count: usize,
    clamped_from: Option<u8>,
}

impl Default for StagingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl StagingBuffer {
    pub const fn new() -> Self {
        Self {
            data: [0; STAGING_RECORDS * EVENT_SIZE],
            count: 0,
            clamped_from: None,
        }
    }

    /// Fill the buffer from `transport`
    ///
    /// On error the buffer is left empty.
    pub fn fill<T: EventTransport>(&mut self, transport: &mut T) -> Result<usize, T::Error> {
        self.count = 0;
        self.clamped_from = None;

        let mut first: RawRecord = [0; EVENT_SIZE];
        transport.read_one(reg::READ_ONE_EVENT, &mut first)?;

        let reported = pending_count(&first);
        let (pending, clamped) = clamp_pending(reported);

        if pending > 0 {
            let end = (pending + 1) * EVENT_SIZE;
            transport.read_bulk(reg::READ_ALL_EVENT, &mut self.data[EVENT_SIZE..end])?;
        }

        self.data[..EVENT_SIZE].copy_from_slice(&first);
        self.count = pending + 1;
        if clamped {
            self.clamped_from = Some(reported);
        }

        Ok(self.count)
    }

    /// Number of staged records
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Pending count the controller reported, if it had to be clamped
    pub fn clamped_from(&self) -> Option<u8> {
        self.clamped_from
    }

    /// Copy of the staged record at `index`
    pub fn record(&self, index: usize) -> Option<RawRecord> {
        if index >= self.count {
            return None;
        }
        let start = index * EVENT_SIZE;
        let mut record = [0; EVENT_SIZE];
        record.copy_from_slice(&self.data[start..start + EVENT_SIZE]);
        Some(record)
    }

    /// Discard staged records
    pub fn clear(&mut self) {
        self.count = 0;
        self.clamped_from = None;
    }
}
