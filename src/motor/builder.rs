//! Builder pattern for WindingSequencer.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::{String, Vec};

use crate::config::MotorConfig;
use crate::error::{bounded, ConfigError, Error, Result};
use crate::shutdown::ShutdownSignal;

use super::coils::{CoilConfiguration, MAX_COILS};
use super::sequencer::WindingSequencer;
use super::winding::{DriveMode, WindingState};

/// Builder for creating WindingSequencer instances.
pub struct SequencerBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pins: Vec<P, MAX_COILS>,
    pin_numbers: Vec<u8, MAX_COILS>,
    overflow: usize,
    delay: Option<D>,
    name: Option<String<32>>,
    step_delay_ms: u32,
    drive_mode: DriveMode,
    start_index: usize,
    shutdown: Option<&'static ShutdownSignal>,
}

impl<P, D> Default for SequencerBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, D> SequencerBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            pins: Vec::new(),
            pin_numbers: Vec::new(),
            overflow: 0,
            delay: None,
            name: None,
            step_delay_ms: 10,
            drive_mode: DriveMode::FullStep,
            start_index: 0,
            shutdown: None,
        }
    }

    /// Append a coil pin to the energization cycle.
    ///
    /// `number` identifies the pin in logs and errors.
    pub fn coil(mut self, number: u8, pin: P) -> Self {
        if self.pins.push(pin).is_err() {
            self.overflow += 1;
        } else {
            let _ = self.pin_numbers.push(number);
        }
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(bounded(name));
        self
    }

    /// Set the delay after every step of a move.
    pub fn step_delay_ms(mut self, ms: u32) -> Self {
        self.step_delay_ms = ms;
        self
    }

    /// Set full- or half-step sequencing.
    pub fn drive_mode(mut self, mode: DriveMode) -> Self {
        self.drive_mode = mode;
        self
    }

    /// Set the coil energized at startup.
    pub fn start_index(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }

    /// Attach a shutdown signal checked between steps and during holds.
    pub fn shutdown(mut self, signal: &'static ShutdownSignal) -> Self {
        self.shutdown = Some(signal);
        self
    }

    /// Configure timing, mode, start coil and name from a MotorConfig.
    ///
    /// Coil pins still have to be supplied with [`coil`](Self::coil), in
    /// the order of `config.coil_pins`.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.name = Some(config.name.clone());
        self.step_delay_ms = config.step_delay_ms;
        self.drive_mode = config.drive_mode;
        self.start_index = config.start_index;
        self
    }

    /// Build the sequencer without touching the pins.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an invalid coil list or start index, or
    /// if no delay provider was given.
    pub fn build_idle(self) -> Result<WindingSequencer<P, D>> {
        if self.overflow > 0 {
            return Err(Error::Config(ConfigError::TooManyCoils(
                self.pins.len() + self.overflow,
            )));
        }

        let coils = CoilConfiguration::new(&self.pin_numbers)?;

        if self.start_index >= coils.len() {
            return Err(Error::Config(ConfigError::InvalidStartIndex {
                index: self.start_index,
                coils: coils.len(),
            }));
        }

        let delay = self.delay.ok_or_else(|| {
            Error::Config(ConfigError::message("delay is required"))
        })?;

        let name = self.name.unwrap_or_else(|| bounded("motor"));

        Ok(WindingSequencer::new(
            self.pins,
            coils,
            WindingState::Single(self.start_index),
            self.drive_mode,
            delay,
            self.step_delay_ms,
            self.shutdown,
            name,
        ))
    }

    /// Build the sequencer and energize the start coil.
    ///
    /// # Errors
    ///
    /// Any error from [`build_idle`](Self::build_idle), or
    /// `MotorError::PinWrite` while energizing.
    pub fn build(self) -> Result<WindingSequencer<P, D>> {
        let mut sequencer = self.build_idle()?;
        sequencer.energize()?;
        log::debug!(
            "{}: {} coils {:?}, {:?}",
            sequencer.name(),
            sequencer.coils().len(),
            sequencer.coils().pins(),
            sequencer.drive_mode()
        );
        Ok(sequencer)
    }
}
