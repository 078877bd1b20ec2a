//! # unipolar-stepper
//!
//! GPIO sequencing for unipolar stepper motors with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Winding sequencer**: Full- and half-step energization over N coil pins
//! - **embedded-hal 1.0**: Uses `OutputPin` for coils, `InputPin` for the home
//!   sensor, `DelayNs` for timing
//! - **no_std compatible**: Core library works without standard library
//! - **Homing**: Bounded seek toward a limit switch or threshold sensor
//! - **Command playback**: `angle,hold` lists with soft-limit policies
//! - **Clean shutdown**: Cooperative stop flag and a scoped GPIO session
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use unipolar_stepper::{ChipSession, CommandPlayer, HomingController, SequencerBuilder};
//!
//! let config = unipolar_stepper::load_config("stepper.toml")?;
//! let mut session = ChipSession::open(chip);
//!
//! // Claim coil pins in cycle order and energize the start coil
//! let builder = SequencerBuilder::new()
//!     .from_motor_config(&config.motor)
//!     .delay(delay);
//! let mut motor = session.claim_coils(&config.motor.coil_pins, builder)?.build()?;
//!
//! // Establish zero against the home sensor
//! let mut switch = LimitSwitch::active_high(session.claim_input(17)?);
//! HomingController::from_config(&config.homing)?.calibrate(&mut motor, &mut switch)?;
//!
//! // Play a command file
//! let commands = unipolar_stepper::load_commands("commands.csv")?;
//! CommandPlayer::from_config(&config)?.play(&mut motor, &commands)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt formatting for embedded targets
//! - `rpi`: Raspberry Pi GPIO backend and the `stepper-ctl` binary

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod gpio;
pub mod homing;
pub mod motion;
pub mod motor;
pub mod playback;
pub mod shutdown;

// Re-exports for ergonomic API
pub use config::{validate_config, MotorConfig, SystemConfig};
pub use error::{Error, Result};
pub use gpio::{ChipSession, GpioChip};
pub use homing::{HomeSensor, HomingController, HomingState, LimitSwitch};
pub use motion::{angle_to_steps, AngleTranslator, Direction};
pub use motor::{DriveMode, SequencerBuilder, WindingSequencer, WindingState};
pub use playback::{parse_commands, CommandPlayer, MotionCommand};
pub use shutdown::ShutdownSignal;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;
#[cfg(feature = "std")]
pub use playback::load_commands;

// Unit types
pub use config::units::{Degrees, Steps};
