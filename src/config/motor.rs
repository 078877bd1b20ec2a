//! Motor configuration from TOML.

use heapless::{String, Vec};
use serde::Deserialize;

use crate::motor::{DriveMode, MAX_COILS};

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    #[serde(default = "default_name")]
    pub name: String<32>,

    /// Coil pins (BCM numbering) in energization order, e.g. A1, B1, A2, B2.
    ///
    /// The order must match the motor wiring; use the permutation scan
    /// to discover it for an unknown motor.
    pub coil_pins: Vec<u8, MAX_COILS>,

    /// Shaft degrees per winding step.
    ///
    /// Found empirically: an intermediate gearbox of unknown ratio sits
    /// between the motor and the output shaft.
    pub degrees_per_step: f32,

    /// Delay after every step during normal moves (milliseconds).
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u32,

    /// Full-step (one coil) or half-step (overlapping coils) sequencing.
    #[serde(default)]
    pub drive_mode: DriveMode,

    /// Index into `coil_pins` of the coil energized at startup.
    #[serde(default)]
    pub start_index: usize,
}

fn default_name() -> String<32> {
    let mut name = String::new();
    let _ = name.push_str("motor");
    name
}

fn default_step_delay_ms() -> u32 {
    10
}

impl MotorConfig {
    /// Number of configured coils.
    pub fn coil_count(&self) -> usize {
        self.coil_pins.len()
    }

    /// Winding steps for one full turn of the output shaft.
    pub fn steps_per_revolution(&self) -> u32 {
        libm::roundf(360.0 / self.degrees_per_step) as u32
    }
}
