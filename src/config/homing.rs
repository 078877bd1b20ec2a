//! Homing (calibration) configuration from TOML.

use serde::Deserialize;

use crate::motion::Direction;

/// Kind of sensor that marks the home position.
///
/// Read from a flat `[homing.sensor]` table whose `kind` key picks the
/// variant; keys belonging to the other variant are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "SensorTable")]
pub enum SensorKind {
    /// Digital limit switch on a GPIO input.
    LimitSwitch {
        /// Level that means "engaged" (true = high).
        active_high: bool,
    },
    /// Analog sensor (e.g. potentiometer): home when the sample drops
    /// below `shutoff`.
    Threshold {
        /// Samples strictly below this value mean "home".
        shutoff: u16,
    },
}

impl Default for SensorKind {
    fn default() -> Self {
        SensorKind::LimitSwitch {
            active_high: default_active_high(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum SensorType {
    LimitSwitch,
    Threshold,
}

#[derive(Deserialize)]
struct SensorTable {
    kind: SensorType,
    #[serde(default = "default_active_high")]
    active_high: bool,
    #[serde(default = "default_shutoff")]
    shutoff: u16,
}

impl From<SensorTable> for SensorKind {
    fn from(table: SensorTable) -> Self {
        match table.kind {
            SensorType::LimitSwitch => SensorKind::LimitSwitch {
                active_high: table.active_high,
            },
            SensorType::Threshold => SensorKind::Threshold {
                shutoff: table.shutoff,
            },
        }
    }
}

fn default_active_high() -> bool {
    true
}

fn default_shutoff() -> u16 {
    20
}

/// Homing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HomingConfig {
    /// Run homing before playback.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// GPIO input pin of the home sensor.
    #[serde(default)]
    pub sensor_pin: u8,

    /// Sensor type and trigger condition.
    #[serde(default)]
    pub sensor: SensorKind,

    /// Direction to seek in. The limit switch sits on the backward side
    /// of the travel by default.
    #[serde(default = "default_direction")]
    pub direction: Direction,

    /// Delay after every seek step (milliseconds). Slower than normal moves
    /// to avoid overshooting the switch.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u32,

    /// Give up after this many steps without reaching home.
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
}

fn default_enabled() -> bool {
    true
}

fn default_direction() -> Direction {
    Direction::Backward
}

fn default_step_delay_ms() -> u32 {
    50
}

fn default_max_steps() -> u32 {
    36_000
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            sensor_pin: 0,
            sensor: SensorKind::default(),
            direction: default_direction(),
            step_delay_ms: default_step_delay_ms(),
            max_steps: default_max_steps(),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Section {
        sensor: SensorKind,
    }

    fn sensor(toml: &str) -> SensorKind {
        toml::from_str::<Section>(toml).unwrap().sensor
    }

    #[test]
    fn test_sensor_kind_defaults() {
        assert_eq!(
            sensor("[sensor]\nkind = \"limit_switch\"\n"),
            SensorKind::LimitSwitch { active_high: true }
        );
        assert_eq!(
            sensor("[sensor]\nkind = \"threshold\"\n"),
            SensorKind::Threshold { shutoff: 20 }
        );
    }

    #[test]
    fn test_sensor_kind_ignores_other_variant_keys() {
        assert_eq!(
            sensor("[sensor]\nkind = \"threshold\"\nactive_high = false\nshutoff = 7\n"),
            SensorKind::Threshold { shutoff: 7 }
        );
        assert_eq!(
            sensor("[sensor]\nkind = \"limit_switch\"\nactive_high = false\nshutoff = 7\n"),
            SensorKind::LimitSwitch { active_high: false }
        );
    }

    #[test]
    fn test_sensor_kind_requires_known_kind() {
        assert!(toml::from_str::<Section>("[sensor]\nkind = \"optical\"\n").is_err());
        assert!(toml::from_str::<Section>("[sensor]\nactive_high = true\n").is_err());
    }
}
