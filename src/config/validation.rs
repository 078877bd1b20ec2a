//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::motor::MAX_COILS;

use super::{HomingConfig, MotorConfig, PlaybackConfig, SoftLimits, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - At least two, at most `MAX_COILS`, unique coil pins
/// - Start index addresses a configured coil
/// - Degrees per step is finite and positive
/// - Soft limits are valid (min < max)
/// - Playback start angle lies within the soft limits
/// - Homing step budget is positive
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_motor(&config.motor)?;
    validate_limits(&config.limits)?;
    validate_playback(&config.playback, &config.limits)?;
    validate_homing(&config.homing)?;
    Ok(())
}

/// Validate a motor configuration on its own.
pub fn validate_motor(config: &MotorConfig) -> Result<()> {
    validate_coil_pins(&config.coil_pins)?;

    if config.start_index >= config.coil_pins.len() {
        return Err(Error::Config(ConfigError::InvalidStartIndex {
            index: config.start_index,
            coils: config.coil_pins.len(),
        }));
    }

    validate_degrees_per_step(config.degrees_per_step)
}

/// Coil list must hold 2..=MAX_COILS distinct pins.
pub(crate) fn validate_coil_pins(pins: &[u8]) -> Result<()> {
    if pins.len() < 2 {
        return Err(Error::Config(ConfigError::TooFewCoils(pins.len())));
    }
    if pins.len() > MAX_COILS {
        return Err(Error::Config(ConfigError::TooManyCoils(pins.len())));
    }
    for (i, pin) in pins.iter().enumerate() {
        if pins[i + 1..].contains(pin) {
            return Err(Error::Config(ConfigError::DuplicateCoilPin(*pin)));
        }
    }
    Ok(())
}

pub(crate) fn validate_degrees_per_step(value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidDegreesPerStep(value)));
    }
    Ok(())
}

fn validate_limits(limits: &SoftLimits) -> Result<()> {
    if !limits.is_valid() {
        return Err(Error::Config(ConfigError::InvalidSoftLimits {
            min: limits.min.0,
            max: limits.max.0,
        }));
    }
    Ok(())
}

fn validate_playback(playback: &PlaybackConfig, limits: &SoftLimits) -> Result<()> {
    if !limits.contains(playback.start) {
        return Err(Error::Config(ConfigError::StartOutOfRange {
            start: playback.start.0,
            min: limits.min.0,
            max: limits.max.0,
        }));
    }
    Ok(())
}

fn validate_homing(homing: &HomingConfig) -> Result<()> {
    if homing.enabled && homing.max_steps == 0 {
        return Err(Error::Config(ConfigError::InvalidHomingBudget));
    }
    Ok(())
}
