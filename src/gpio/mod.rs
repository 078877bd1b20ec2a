//! GPIO module for unipolar-stepper.
//!
//! A [`GpioChip`] hands out embedded-hal pins by number. [`ChipSession`] is
//! the scoped owner of an open chip and closes it exactly once, whether the
//! session ends normally, through `?`, or by unwinding.

mod session;

#[cfg(feature = "rpi")]
mod rpi;

pub use session::ChipSession;

#[cfg(feature = "rpi")]
pub use rpi::{RppalChip, RppalDelay};

use embedded_hal::digital::{InputPin, OutputPin};

/// A GPIO controller that can claim pins by number.
///
/// Opening the chip is the implementor's constructor.
pub trait GpioChip {
    /// Pin type returned by [`claim_output`](Self::claim_output).
    type Output: OutputPin;
    /// Pin type returned by [`claim_input`](Self::claim_input).
    type Input: InputPin;
    /// Claim failure reported by the backend.
    type Error: core::fmt::Debug;

    /// Claim `pin` as an output, driven low.
    fn claim_output(&mut self, pin: u8) -> core::result::Result<Self::Output, Self::Error>;

    /// Claim `pin` as an input.
    fn claim_input(&mut self, pin: u8) -> core::result::Result<Self::Input, Self::Error>;

    /// Release the chip. Called once by [`ChipSession`].
    fn close(&mut self);
}

impl<C: GpioChip + ?Sized> GpioChip for &mut C {
    type Output = C::Output;
    type Input = C::Input;
    type Error = C::Error;

    fn claim_output(&mut self, pin: u8) -> core::result::Result<Self::Output, Self::Error> {
        (**self).claim_output(pin)
    }

    fn claim_input(&mut self, pin: u8) -> core::result::Result<Self::Input, Self::Error> {
        (**self).claim_input(pin)
    }

    fn close(&mut self) {
        (**self).close()
    }
}
