//! I2C event transport
//!
//! Register reads are a one-byte register write followed by a repeated
//! start read; commands are plain writes.

use embedded_hal::i2c::I2c;
use stmfts_core::EventTransport;
use stmfts_protocol::RawRecord;

/// FTS register access over I2C
pub struct I2cTransport<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cTransport<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Read `buf.len()` bytes from `reg`
    pub fn read_register(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), I2C::Error> {
        self.i2c.write_read(self.address, &[reg], buf)
    }

    /// Send a raw command
    pub fn write_command(&mut self, command: &[u8]) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, command)
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> EventTransport for I2cTransport<I2C> {
    type Error = I2C::Error;

    fn read_one(&mut self, reg: u8, record: &mut RawRecord) -> Result<(), Self::Error> {
        self.read_register(reg, record)
    }

    fn read_bulk(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.read_register(reg, buf)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
    use heapless::Vec;

    /// Recorded bus transfer
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Transfer {
        Write(Vec<u8, 8>),
        Read { reg: u8, len: usize },
    }

    /// I2C bus serving register contents from a table
    ///
    /// Reads of the event register pop the next queued record; other
    /// registers return fixed blocks.
    pub struct MockI2c {
        pub address: Option<u8>,
        pub log: Vec<Transfer, 32>,
        pub events: Vec<u8, 512>,
        pub fw_block: [u8; 8],
        pub id_block: [u8; 8],
        pub fail: bool,
        /// Fail every transaction after this many
        pub fail_after: Option<usize>,
        transactions: usize,
    }

    impl MockI2c {
        pub fn new() -> Self {
            Self {
                address: None,
                log: Vec::new(),
                events: Vec::new(),
                fw_block: [0; 8],
                id_block: [0; 8],
                fail: false,
                fail_after: None,
                transactions: 0,
            }
        }

        /// Queue records to be returned by the event registers
        pub fn queue(&mut self, records: &[[u8; 16]]) {
            for record in records {
                self.events.extend_from_slice(record).unwrap();
            }
        }

        pub fn writes(&self) -> impl Iterator<Item = &[u8]> {
            self.log.iter().filter_map(|t| match t {
                Transfer::Write(bytes) => Some(bytes.as_slice()),
                Transfer::Read { .. } => None,
            })
        }

        fn take_events(&mut self, buf: &mut [u8]) {
            let n = buf.len().min(self.events.len());
            buf[..n].copy_from_slice(&self.events[..n]);
            buf[n..].fill(0);
            let rest: Vec<u8, 512> = Vec::from_slice(&self.events[n..]).unwrap();
            self.events = rest;
        }
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.address = Some(address);
            self.transactions += 1;
            if self.fail || self.fail_after.is_some_and(|n| self.transactions > n) {
                return Err(ErrorKind::Bus);
            }

            let has_read = operations.iter().any(|op| matches!(op, Operation::Read(_)));
            let mut reg = 0;
            for op in operations {
                match op {
                    Operation::Write(bytes) if has_read => reg = bytes[0],
                    Operation::Write(bytes) => {
                        self.log
                            .push(Transfer::Write(Vec::from_slice(bytes).unwrap()))
                            .unwrap();
                    }
                    Operation::Read(buf) => {
                        self.log
                            .push(Transfer::Read { reg, len: buf.len() })
                            .unwrap();
                        match reg {
                            stmfts_protocol::reg::READ_FW_VERSION => {
                                let n = buf.len().min(8);
                                buf[..n].copy_from_slice(&self.fw_block[..n]);
                            }
                            stmfts_protocol::reg::READ_DEVICE_ID => {
                                let n = buf.len().min(8);
                                buf[..n].copy_from_slice(&self.id_block[..n]);
                            }
                            _ => self.take_events(buf),
                        }
                    }
                }
            }

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::*;
    use super::*;
    use stmfts_protocol::reg;

    #[test]
    fn test_read_one_uses_address_and_register() {
        let mut bus = MockI2c::new();
        let mut record = [0x11; 16];
        record[7] = 0;
        bus.queue(&[record]);

        let mut transport = I2cTransport::new(bus, 0x49);
        let mut out = [0u8; 16];
        transport.read_one(reg::READ_ONE_EVENT, &mut out).unwrap();

        assert_eq!(out, record);
        let bus = transport.release();
        assert_eq!(bus.address, Some(0x49));
        assert_eq!(
            bus.log.as_slice(),
            &[Transfer::Read {
                reg: reg::READ_ONE_EVENT,
                len: 16
            }]
        );
    }

    #[test]
    fn test_write_command() {
        let mut transport = I2cTransport::new(MockI2c::new(), 0x49);
        transport.write_command(&reg::SCAN_ENABLE).unwrap();

        let bus = transport.release();
        let writes: heapless::Vec<&[u8], 4> = bus.writes().collect();
        assert_eq!(writes.as_slice(), &[&reg::SCAN_ENABLE[..]]);
    }

    #[test]
    fn test_bus_error_propagates() {
        let mut bus = MockI2c::new();
        bus.fail = true;
        let mut transport = I2cTransport::new(bus, 0x49);
        let mut buf = [0u8; 32];

        assert_eq!(
            transport.read_bulk(reg::READ_ALL_EVENT, &mut buf),
            Err(embedded_hal::i2c::ErrorKind::Bus)
        );
    }
}
