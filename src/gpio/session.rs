//! Scoped chip ownership.

use embedded_hal::delay::DelayNs;

use crate::error::{MotorError, Result};
use crate::motor::SequencerBuilder;

use super::GpioChip;

/// Owner of an open GPIO chip for the lifetime of a control session.
///
/// Created once at the entry point and passed by reference to whatever
/// needs pins. The chip is closed by [`close`](Self::close) or, failing
/// that, when the session is dropped; never twice.
pub struct ChipSession<C: GpioChip> {
    chip: C,
    closed: bool,
}

impl<C: GpioChip> ChipSession<C> {
    /// Take ownership of an opened chip.
    pub fn open(chip: C) -> Self {
        log::debug!("gpio session opened");
        Self { chip, closed: false }
    }

    /// Claim an output pin.
    ///
    /// # Errors
    ///
    /// `MotorError::PinClaim` if the backend refuses the pin.
    pub fn claim_output(&mut self, pin: u8) -> Result<C::Output> {
        self.chip.claim_output(pin).map_err(|e| {
            log::error!("cannot claim output pin {}: {:?}", pin, e);
            MotorError::PinClaim { pin }.into()
        })
    }

    /// Claim an input pin.
    ///
    /// # Errors
    ///
    /// `MotorError::PinClaim` if the backend refuses the pin.
    pub fn claim_input(&mut self, pin: u8) -> Result<C::Input> {
        self.chip.claim_input(pin).map_err(|e| {
            log::error!("cannot claim input pin {}: {:?}", pin, e);
            MotorError::PinClaim { pin }.into()
        })
    }

    /// Claim `pins` as outputs and add them to `builder` as coils, in order.
    ///
    /// # Errors
    ///
    /// `MotorError::PinClaim` for the first pin that cannot be claimed.
    pub fn claim_coils<D: DelayNs>(
        &mut self,
        pins: &[u8],
        mut builder: SequencerBuilder<C::Output, D>,
    ) -> Result<SequencerBuilder<C::Output, D>> {
        for &pin in pins {
            builder = builder.coil(pin, self.claim_output(pin)?);
        }
        Ok(builder)
    }

    /// Borrow the underlying chip.
    pub fn chip(&self) -> &C {
        &self.chip
    }

    /// Close the chip now.
    pub fn close(mut self) {
        self.close_once();
    }

    fn close_once(&mut self) {
        if !self.closed {
            self.closed = true;
            self.chip.close();
            log::debug!("gpio session closed");
        }
    }
}

impl<C: GpioChip> Drop for ChipSession<C> {
    fn drop(&mut self) {
        self.close_once();
    }
}
