//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{bounded, ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use unipolar_stepper::load_config;
///
/// let config = load_config("stepper.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::Config(ConfigError::IoError(bounded(&e.to_string()))))?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::message(e.message())))?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LimitPolicy, SensorKind};
    use crate::motion::Direction;
    use crate::motor::DriveMode;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[motor]
coil_pins = [27, 23, 22, 24]
degrees_per_step = 0.01
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.motor.name.as_str(), "motor");
        assert_eq!(config.motor.step_delay_ms, 10);
        assert_eq!(config.motor.drive_mode, DriveMode::FullStep);
        assert_eq!(config.limits.max.0, 270.0);
        assert_eq!(config.homing.direction, Direction::Backward);
        assert_eq!(config.homing.step_delay_ms, 50);
        assert!(config.command_file().is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[motor]
name = "aspire"
coil_pins = [27, 23, 22, 24]
degrees_per_step = 0.01
step_delay_ms = 25
drive_mode = "half_step"
start_index = 2

[limits]
min_degrees = -10.0
max_degrees = 180.0
policy = "clamp"

[homing]
sensor_pin = 17
direction = "forward"
max_steps = 500

[homing.sensor]
kind = "threshold"
shutoff = 30

[playback]
start_degrees = 5.0
command_file = "/home/pi/commands.csv"
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.motor.drive_mode, DriveMode::HalfStep);
        assert_eq!(config.motor.start_index, 2);
        assert_eq!(config.limits.policy, LimitPolicy::Clamp);
        assert_eq!(config.homing.sensor, SensorKind::Threshold { shutoff: 30 });
        assert_eq!(config.homing.direction, Direction::Forward);
        assert_eq!(config.homing.max_steps, 500);
        assert_eq!(config.playback.start.0, 5.0);
        assert_eq!(config.command_file(), Some("/home/pi/commands.csv"));
    }

    #[test]
    fn test_parse_rejects_single_coil() {
        let toml = r#"
[motor]
coil_pins = [27]
degrees_per_step = 0.01
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::TooFewCoils(1)))
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = parse_config("[motor]\ncoil_pins = \"oops\"\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
    }
}
