//! Simulated playback example.
//!
//! Builds a motor from TOML configuration, homes it against a simulated
//! sensor and plays a short command list, printing every coil change.
//!
//! No hardware needed: pins and delay are in-memory stand-ins.

use std::cell::Cell;

use unipolar_stepper::homing::ThresholdSensor;
use unipolar_stepper::{
    parse_commands, CommandPlayer, HomingController, SequencerBuilder,
};

/// Delay provider that does not wait.
struct InstantDelay;

impl embedded_hal::delay::DelayNs for InstantDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Coil pin that prints its level changes.
struct ConsolePin {
    number: u8,
    state: bool,
}

impl ConsolePin {
    fn new(number: u8) -> Self {
        Self {
            number,
            state: false,
        }
    }

    fn set(&mut self, high: bool) {
        if self.state != high {
            println!("  gpio {:>2} {}", self.number, if high { "on" } else { "off" });
        }
        self.state = high;
    }
}

impl embedded_hal::digital::ErrorType for ConsolePin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for ConsolePin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }
}

const CONFIG: &str = r#"
[motor]
name = "demo"
coil_pins = [27, 23, 22, 24]
degrees_per_step = 1.5
step_delay_ms = 10

[limits]
min_degrees = 0.0
max_degrees = 10.0
policy = "reject"

[homing]
sensor_pin = 17
max_steps = 100
[homing.sensor]
kind = "threshold"
shutoff = 20
"#;

const COMMANDS: &str = "angle,hold
3,0.5
4.5,0
30,1
-6,0
";

fn main() -> Result<(), unipolar_stepper::Error> {
    println!("=== Simulated Playback Example ===\n");

    let config = unipolar_stepper::config::parse_config(CONFIG)?;
    println!(
        "Motor '{}': {} coils, {} steps/rev",
        config.motor.name,
        config.motor.coil_count(),
        config.motor.steps_per_revolution()
    );

    let mut builder = SequencerBuilder::new()
        .from_motor_config(&config.motor)
        .delay(InstantDelay);
    for &pin in &config.motor.coil_pins {
        builder = builder.coil(pin, ConsolePin::new(pin));
    }

    println!("\n--- energize ---");
    let mut motor = builder.build()?;

    // Light level drops below the shutoff after three steps.
    println!("\n--- homing ---");
    let readings = Cell::new(0u16);
    let mut sensor = ThresholdSensor::new(20, || {
        readings.set(readings.get() + 1);
        Ok(if readings.get() > 3 { 5 } else { 400 })
    });
    let homed = HomingController::from_config(&config.homing)?.calibrate(&mut motor, &mut sensor)?;
    println!("Homed after {} steps", homed.steps());

    println!("\n--- playback ---");
    let commands = parse_commands(COMMANDS)?;
    let report = CommandPlayer::from_config(&config)?.play(&mut motor, &commands)?;

    println!(
        "\nDone: {} moved, {} skipped, at {} deg ({} steps)",
        report.executed,
        report.rejected,
        report.position.angle().0,
        report.position.steps().0
    );

    motor.release()?;
    println!("\n=== Example Complete ===");
    Ok(())
}
