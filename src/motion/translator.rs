//! Angle to step translation.
//!
//! `degrees_per_step` is a per-motor calibration constant. It is measured,
//! not derived from the motor datasheet, because the gearbox between motor
//! and output shaft has an unknown ratio.

use libm::{fabsf, roundf, truncf};

use crate::config::units::{Degrees, Steps};
use crate::config::validate_degrees_per_step;
use crate::error::Result;

/// Round to the nearest integer, ties to even.
#[inline]
fn round_half_even(value: f32) -> f32 {
    if fabsf(value - truncf(value)) == 0.5 {
        2.0 * roundf(value / 2.0)
    } else {
        roundf(value)
    }
}

/// Convert an angle to a signed step count.
///
/// Computes `angle / degrees_per_step` rounded to the nearest integer with
/// ties going to the even neighbour, so `angle` and `-angle` always give
/// counts of equal magnitude. The sign of the result is the direction.
///
/// # Errors
///
/// Returns `ConfigError::InvalidDegreesPerStep` unless `degrees_per_step`
/// is finite and > 0.
pub fn angle_to_steps(angle: Degrees, degrees_per_step: f32) -> Result<Steps> {
    validate_degrees_per_step(degrees_per_step)?;
    Ok(Steps(round_half_even(angle.0 / degrees_per_step) as i64))
}

/// Validated angle/step converter for one motor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleTranslator {
    degrees_per_step: f32,
}

impl AngleTranslator {
    /// Create a translator.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidDegreesPerStep` unless the constant is
    /// finite and > 0.
    pub fn new(degrees_per_step: f32) -> Result<Self> {
        validate_degrees_per_step(degrees_per_step)?;
        Ok(Self { degrees_per_step })
    }

    /// Degrees per step this translator was built with.
    #[inline]
    pub fn degrees_per_step(&self) -> f32 {
        self.degrees_per_step
    }

    /// Convert an angle to a signed step count (ties to even).
    #[inline]
    pub fn to_steps(&self, angle: Degrees) -> Steps {
        Steps(round_half_even(angle.0 / self.degrees_per_step) as i64)
    }

    /// Convert a step count back to degrees.
    #[inline]
    pub fn to_degrees(&self, steps: Steps) -> Degrees {
        Degrees(steps.0 as f32 * self.degrees_per_step)
    }
}
