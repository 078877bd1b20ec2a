//! Homing module for unipolar-stepper.
//!
//! Establishes a known zero position by stepping toward a home sensor.

mod controller;
mod sensor;

pub use controller::{HomingController, HomingState};
pub use sensor::{limit_switch_from_kind, HomeSensor, LimitSwitch, ThresholdSensor};
