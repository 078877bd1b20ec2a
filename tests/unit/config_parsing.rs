//! Unit tests for configuration parsing.

use unipolar_stepper::config::{parse_config, LimitPolicy, SensorKind, SystemConfig};
use unipolar_stepper::error::{ConfigError, Error};
use unipolar_stepper::{Direction, DriveMode};

/// Test parsing the documented example configuration.
#[test]
fn test_parse_documented_config() {
    let toml_str = r#"
[motor]
name = "aspire"
coil_pins = [27, 23, 22, 24]
degrees_per_step = 0.01
step_delay_ms = 10
drive_mode = "full_step"
start_index = 0

[limits]
min_degrees = 0.0
max_degrees = 270.0
policy = "reject"

[homing]
enabled = true
sensor_pin = 17
direction = "backward"
step_delay_ms = 50
max_steps = 36000
[homing.sensor]
kind = "limit_switch"
active_high = true

[playback]
start_degrees = 0.0
command_file = "/home/pi/commands.csv"
"#;

    let config = parse_config(toml_str).expect("Failed to parse config");

    assert_eq!(config.motor.name.as_str(), "aspire");
    assert_eq!(config.motor.coil_pins.as_slice(), &[27, 23, 22, 24]);
    assert_eq!(config.motor.coil_count(), 4);
    assert_eq!(config.motor.steps_per_revolution(), 36_000);
    assert_eq!(config.limits.policy, LimitPolicy::Reject);
    assert_eq!(config.homing.sensor_pin, 17);
    assert_eq!(config.homing.sensor, SensorKind::LimitSwitch { active_high: true });
    assert_eq!(config.homing.max_steps, 36_000);
    assert_eq!(config.command_file(), Some("/home/pi/commands.csv"));
}

/// Test that every section but `[motor]` may be left out.
#[test]
fn test_defaults_for_missing_sections() {
    let toml_str = r#"
[motor]
coil_pins = [5, 6]
degrees_per_step = 1.8
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.motor.drive_mode, DriveMode::FullStep);
    assert_eq!(config.motor.start_index, 0);
    assert_eq!(config.limits.min.0, 0.0);
    assert_eq!(config.limits.max.0, 270.0);
    assert!(config.homing.enabled);
    assert_eq!(config.homing.direction, Direction::Backward);
    assert_eq!(config.homing.sensor, SensorKind::LimitSwitch { active_high: true });
    assert_eq!(config.playback.start.0, 0.0);
}

/// Test that a threshold sensor gets its default shutoff.
#[test]
fn test_threshold_sensor_default_shutoff() {
    let toml_str = r#"
[motor]
coil_pins = [27, 23, 22, 24]
degrees_per_step = 0.01

[homing.sensor]
kind = "threshold"
"#;

    let config = parse_config(toml_str).expect("Failed to parse config");
    assert_eq!(config.homing.sensor, SensorKind::Threshold { shutoff: 20 });
}

/// Test that an unknown policy name is a parse error.
#[test]
fn test_unknown_policy_rejected() {
    let toml_str = r#"
[motor]
coil_pins = [27, 23, 22, 24]
degrees_per_step = 0.01

[limits]
min_degrees = 0.0
max_degrees = 90.0
policy = "wrap"
"#;

    assert!(matches!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test that the `[motor]` section is required.
#[test]
fn test_missing_motor_section() {
    assert!(matches!(
        parse_config("[limits]\nmin_degrees = 0.0\nmax_degrees = 1.0\n"),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test that loading a missing file is an I/O error.
#[test]
fn test_load_missing_file() {
    assert!(matches!(
        unipolar_stepper::load_config("/nonexistent/stepper.toml"),
        Err(Error::Config(ConfigError::IoError(_)))
    ));
}
