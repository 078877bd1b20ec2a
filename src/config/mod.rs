//! Configuration module for unipolar-stepper.
//!
//! Provides types for loading and validating the motor, limit, homing and
//! playback configuration from TOML files (with `std` feature) or pre-parsed
//! data.

mod homing;
mod limits;
mod motor;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use homing::{HomingConfig, SensorKind};
pub use limits::{LimitPolicy, SoftLimits};
pub use motor::MotorConfig;
pub use system::{PlaybackConfig, SystemConfig};
pub use validation::{validate_config, validate_motor};

pub(crate) use validation::{validate_coil_pins, validate_degrees_per_step};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, Steps};
