//! FTS5CU56A touch controller
//!
//! Power sequencing, identity readout and interrupt-driven FIFO draining
//! for the STMicroelectronics FTS5CU56A over I2C.
//!
//! # Power-on Sequence
//!
//! 1. Wait for supplies to settle
//! 2. Read firmware and device id blocks
//! 3. System reset, wait for the controller to come back
//! 4. Enable touch types, force calibration, clear the event FIFO
//! 5. Enable scanning
//!
//! Supplies, reset GPIO and interrupt wiring belong to the board.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use stmfts_core::{DrainError, DrainSummary, InputSink, TouchConfig, TouchEngine};
use stmfts_protocol::reg;

use crate::i2c::I2cTransport;

/// Size of the identity blocks
const ID_BLOCK_LEN: usize = 8;

/// Controller identity captured at power-on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    pub chip_id: u16,
    pub chip_ver: u8,
    pub fw_ver: u16,
    /// Not reported by this controller, always 0
    pub config_id: u16,
    pub config_ver: u16,
}

impl DeviceInfo {
    /// Fill firmware fields from the firmware version block
    fn parse_fw_block(&mut self, block: &[u8; ID_BLOCK_LEN]) {
        self.fw_ver = u16::from_be_bytes([block[0], block[1]]);
        self.config_ver = u16::from_be_bytes([block[2], block[3]]);
        self.config_id = 0;
    }

    /// Fill chip fields from the device id block
    fn parse_id_block(&mut self, block: &[u8; ID_BLOCK_LEN]) {
        self.chip_id = u16::from_be_bytes([block[2], block[3]]);
        self.chip_ver = block[4];
    }
}

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError<E> {
    /// I2C transfer failed
    Bus(E),
    /// Controller is powered down
    NotPowered,
}

impl<E> From<DrainError<E>> for DeviceError<E> {
    fn from(err: DrainError<E>) -> Self {
        match err {
            DrainError::Transport(e) => DeviceError::Bus(e),
        }
    }
}

/// Touch type enable command for `mask`
pub fn touch_type_command(mask: u16) -> [u8; 3] {
    let [lo, hi] = mask.to_le_bytes();
    [reg::TOUCH_TYPE_ENABLE, lo, hi]
}

/// FTS5CU56A driver
pub struct Fts5cu56a<I2C> {
    transport: I2cTransport<I2C>,
    engine: TouchEngine,
    info: DeviceInfo,
    powered: bool,
}

impl<I2C: I2c> Fts5cu56a<I2C> {
    /// Create a driver; the controller is assumed powered down
    pub fn new(i2c: I2C, config: TouchConfig) -> Self {
        Self {
            transport: I2cTransport::new(i2c, config.i2c_address),
            engine: TouchEngine::new(config),
            info: DeviceInfo::default(),
            powered: false,
        }
    }

    /// Bring the controller up and start scanning
    ///
    /// Tracking state is cleared whether or not the sequence succeeds.
    pub fn power_on<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<DeviceInfo, DeviceError<I2C::Error>> {
        self.powered = false;
        self.engine.reset();

        let config = *self.engine.config();
        delay.delay_ms(config.power_on_delay_ms);

        let mut info = DeviceInfo::default();
        let mut block = [0u8; ID_BLOCK_LEN];

        self.transport
            .read_register(reg::READ_FW_VERSION, &mut block)
            .map_err(DeviceError::Bus)?;
        info.parse_fw_block(&block);

        self.transport
            .read_register(reg::READ_DEVICE_ID, &mut block)
            .map_err(DeviceError::Bus)?;
        info.parse_id_block(&block);

        self.command(&reg::SYSTEM_RESET)?;
        delay.delay_ms(config.reset_delay_ms);

        self.command(&touch_type_command(config.touch_type_mask))?;
        self.command(&[reg::FORCE_CALIBRATION])?;
        self.command(&[reg::CLEAR_ALL_EVENT])?;
        self.command(&reg::SCAN_ENABLE)?;

        info!(
            "FTS chip {=u16:#06x} ver {=u8} fw {=u16:#06x} config {=u16:#06x}",
            info.chip_id,
            info.chip_ver,
            info.fw_ver,
            info.config_ver
        );

        self.info = info;
        self.powered = true;
        Ok(info)
    }

    /// Stop scanning and forget all contacts
    ///
    /// A failed scan-disable is logged; the driver is powered down either
    /// way.
    pub fn power_off(&mut self) {
        if self.powered && self.transport.write_command(&reg::SCAN_DISABLE).is_err() {
            warn!("Failed to disable scanning");
        }
        self.powered = false;
        self.engine.reset();
    }

    /// Drain the event FIFO after the controller raised its interrupt
    ///
    /// Returns [`DeviceError::NotPowered`] without touching the bus while
    /// powered down.
    pub fn handle_interrupt<S: InputSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<DrainSummary, DeviceError<I2C::Error>> {
        if !self.powered {
            trace!("Interrupt while powered down, ignored");
            return Err(DeviceError::NotPowered);
        }

        let summary = self.engine.drain(&mut self.transport, sink)?;

        if summary.esd_detected {
            warn!("ESD reported, controller needs a power cycle");
        }
        if summary.ic_reset {
            warn!("Controller reset itself while scanning");
        }

        Ok(summary)
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Identity read at the last successful power-on
    pub fn device_info(&self) -> &DeviceInfo {
        &self.info
    }

    pub fn engine(&self) -> &TouchEngine {
        &self.engine
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.transport.release()
    }

    fn command(&mut self, bytes: &[u8]) -> Result<(), DeviceError<I2C::Error>> {
        self.transport.write_command(bytes).map_err(DeviceError::Bus)
    }
}
