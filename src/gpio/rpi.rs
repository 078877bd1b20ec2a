//! Raspberry Pi backend (rppal).

use rppal::gpio::{Error as GpioError, Gpio, InputPin, OutputPin};

use super::GpioChip;

/// Blocking delay provider backed by the OS scheduler.
pub use rppal::hal::Delay as RppalDelay;

/// The Raspberry Pi GPIO peripheral.
///
/// Pins are addressed by BCM number. Claimed output pins start low and are
/// reset by rppal when dropped.
pub struct RppalChip {
    gpio: Option<Gpio>,
}

impl RppalChip {
    /// Open `/dev/gpiomem`.
    ///
    /// # Errors
    ///
    /// Any rppal error, e.g. missing permissions or an unsupported board.
    pub fn open() -> core::result::Result<Self, GpioError> {
        let gpio = Gpio::new()?;
        log::info!("opened gpio chip");
        Ok(Self { gpio: Some(gpio) })
    }

    fn gpio(&self, pin: u8) -> core::result::Result<&Gpio, GpioError> {
        self.gpio.as_ref().ok_or(GpioError::PinNotAvailable(pin))
    }
}

impl GpioChip for RppalChip {
    type Output = OutputPin;
    type Input = InputPin;
    type Error = GpioError;

    fn claim_output(&mut self, pin: u8) -> core::result::Result<OutputPin, GpioError> {
        Ok(self.gpio(pin)?.get(pin)?.into_output_low())
    }

    fn claim_input(&mut self, pin: u8) -> core::result::Result<InputPin, GpioError> {
        Ok(self.gpio(pin)?.get(pin)?.into_input())
    }

    fn close(&mut self) {
        if self.gpio.take().is_some() {
            log::info!("closed gpio chip");
        }
    }
}
