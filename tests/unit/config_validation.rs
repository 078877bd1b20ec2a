//! Unit tests for configuration validation.

use unipolar_stepper::config::{validate_config, SystemConfig};
use unipolar_stepper::error::{ConfigError, Error};

fn config(toml_str: &str) -> SystemConfig {
    toml::from_str(toml_str).expect("Failed to parse TOML")
}

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config = config(
        r#"
[motor]
coil_pins = [27, 23, 22, 24]
degrees_per_step = 0.01
"#,
    );
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for duplicate coil pins.
#[test]
fn test_duplicate_coil_pin() {
    let config = config(
        r#"
[motor]
coil_pins = [27, 23, 23, 24]
degrees_per_step = 0.01
"#,
    );
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::DuplicateCoilPin(23)))
    );
}

/// Test validation fails for a start index past the last coil.
#[test]
fn test_start_index_out_of_range() {
    let config = config(
        r#"
[motor]
coil_pins = [27, 23, 22, 24]
degrees_per_step = 0.01
start_index = 4
"#,
    );
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStartIndex { index: 4, coils: 4 }))
    );
}

/// Test validation fails for a negative calibration constant.
#[test]
fn test_negative_degrees_per_step() {
    let config = config(
        r#"
[motor]
coil_pins = [27, 23, 22, 24]
degrees_per_step = -0.01
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidDegreesPerStep(_)))
    ));
}

/// Test validation fails for inverted soft limits.
#[test]
fn test_inverted_soft_limits() {
    let config = config(
        r#"
[motor]
coil_pins = [27, 23, 22, 24]
degrees_per_step = 0.01

[limits]
min_degrees = 90.0
max_degrees = 0.0
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidSoftLimits { .. }))
    ));
}

/// Test validation fails for a zero homing budget, unless homing is off.
#[test]
fn test_zero_homing_budget() {
    let mut config = config(
        r#"
[motor]
coil_pins = [27, 23, 22, 24]
degrees_per_step = 0.01

[homing]
max_steps = 0
"#,
    );
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidHomingBudget))
    );

    config.homing.enabled = false;
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a playback start outside the soft limits.
#[test]
fn test_playback_start_outside_limits() {
    let config = config(
        r#"
[motor]
coil_pins = [27, 23, 22, 24]
degrees_per_step = 0.01

[limits]
min_degrees = 0.0
max_degrees = 90.0

[playback]
start_degrees = 120.0
"#,
    );
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::StartOutOfRange {
            start: 120.0,
            min: 0.0,
            max: 90.0,
        }))
    );
}
