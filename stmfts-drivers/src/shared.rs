//! Shared touchscreen handle
//!
//! Puts the driver behind an async mutex so the interrupt task and the
//! power-management path never interleave. Each drain cycle holds the lock
//! from the pending-count read until the frame sync has been delivered.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use stmfts_core::{DrainSummary, InputSink};

use crate::fts5cu56a::{DeviceError, DeviceInfo, Fts5cu56a};

/// Touchscreen shared between tasks
pub struct SharedTouchscreen<M: RawMutex, I2C> {
    device: Mutex<M, Fts5cu56a<I2C>>,
}

impl<M: RawMutex, I2C: I2c> SharedTouchscreen<M, I2C> {
    pub const fn new(device: Fts5cu56a<I2C>) -> Self {
        Self {
            device: Mutex::new(device),
        }
    }

    /// Drain the controller after its interrupt line fired
    ///
    /// Returns `Ok(None)` if the controller is suspended.
    pub async fn on_interrupt<S: InputSink + ?Sized>(
        &self,
        sink: &mut S,
    ) -> Result<Option<DrainSummary>, DeviceError<I2C::Error>> {
        let mut device = self.device.lock().await;
        match device.handle_interrupt(sink) {
            Ok(summary) => Ok(Some(summary)),
            Err(DeviceError::NotPowered) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Power the controller up
    pub async fn resume<D: DelayNs>(
        &self,
        delay: &mut D,
    ) -> Result<DeviceInfo, DeviceError<I2C::Error>> {
        let mut device = self.device.lock().await;
        device.power_on(delay)
    }

    /// Power the controller down
    pub async fn suspend(&self) {
        let mut device = self.device.lock().await;
        device.power_off();
    }

    /// Exclusive access to the driver
    pub async fn lock(&self) -> MutexGuard<'_, M, Fts5cu56a<I2C>> {
        self.device.lock().await
    }
}
