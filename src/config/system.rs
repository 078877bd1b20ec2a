//! System configuration - root configuration structure.

use heapless::String;
use serde::Deserialize;

use super::homing::HomingConfig;
use super::limits::SoftLimits;
use super::motor::MotorConfig;
use super::units::Degrees;

/// Command playback settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaybackConfig {
    /// Angle assumed once homing has finished.
    #[serde(default, rename = "start_degrees")]
    pub start: Degrees,

    /// Default command file (`angle,hold` rows after a header line).
    #[serde(default)]
    pub command_file: Option<String<128>>,
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// The driven motor.
    pub motor: MotorConfig,

    /// Allowed absolute angle range for playback.
    #[serde(default)]
    pub limits: SoftLimits,

    /// Calibration against the home sensor.
    #[serde(default)]
    pub homing: HomingConfig,

    /// Command playback settings.
    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl SystemConfig {
    /// Get the command file path, if one is configured.
    pub fn command_file(&self) -> Option<&str> {
        self.playback.command_file.as_ref().map(|s| s.as_str())
    }
}
