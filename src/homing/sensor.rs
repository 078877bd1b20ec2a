//! Home position sensors.

use embedded_hal::digital::InputPin;

use crate::config::SensorKind;
use crate::error::{MotorError, Result};

/// Anything that can tell whether the motor sits at its home position.
pub trait HomeSensor {
    /// Read the sensor once; `true` means the home condition is met.
    fn is_home(&mut self) -> Result<bool>;
}

impl<S: HomeSensor + ?Sized> HomeSensor for &mut S {
    fn is_home(&mut self) -> Result<bool> {
        (**self).is_home()
    }
}

/// Digital limit switch on a GPIO input.
pub struct LimitSwitch<I: InputPin> {
    pin: I,
    active_high: bool,
}

impl<I: InputPin> LimitSwitch<I> {
    /// Switch that reads high when engaged.
    pub fn active_high(pin: I) -> Self {
        Self {
            pin,
            active_high: true,
        }
    }

    /// Switch that reads low when engaged.
    pub fn active_low(pin: I) -> Self {
        Self {
            pin,
            active_high: false,
        }
    }
}

impl<I: InputPin> HomeSensor for LimitSwitch<I> {
    fn is_home(&mut self) -> Result<bool> {
        let high = self.pin.is_high().map_err(|_| MotorError::SensorRead)?;
        Ok(high == self.active_high)
    }
}

/// Analog sensor (e.g. potentiometer) that reads home below a threshold.
///
/// `read` returns one raw sample per call.
pub struct ThresholdSensor<F>
where
    F: FnMut() -> Result<u16>,
{
    read: F,
    shutoff: u16,
}

impl<F> ThresholdSensor<F>
where
    F: FnMut() -> Result<u16>,
{
    /// Home when a sample is strictly below `shutoff`.
    pub fn new(shutoff: u16, read: F) -> Self {
        Self { read, shutoff }
    }
}

impl<F> HomeSensor for ThresholdSensor<F>
where
    F: FnMut() -> Result<u16>,
{
    fn is_home(&mut self) -> Result<bool> {
        let sample = (self.read)()?;
        Ok(sample < self.shutoff)
    }
}

/// Build a limit switch from its configured kind.
///
/// Returns `None` for sensor kinds that are not a digital input.
pub fn limit_switch_from_kind<I: InputPin>(kind: SensorKind, pin: I) -> Option<LimitSwitch<I>> {
    match kind {
        SensorKind::LimitSwitch { active_high: true } => Some(LimitSwitch::active_high(pin)),
        SensorKind::LimitSwitch { active_high: false } => Some(LimitSwitch::active_low(pin)),
        SensorKind::Threshold { .. } => None,
    }
}
