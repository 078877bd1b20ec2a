//! Homing state machine.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::HomingConfig;
use crate::error::{ConfigError, HomingError, Result};
use crate::motion::Direction;
use crate::motor::WindingSequencer;

use super::sensor::HomeSensor;

/// Homing progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingState {
    /// Stepping toward the sensor.
    Seeking {
        /// Steps taken so far.
        steps: u32,
    },
    /// Sensor reached; the current position is zero.
    Homed {
        /// Steps it took to get there.
        steps: u32,
    },
}

impl HomingState {
    /// Steps taken so far.
    pub fn steps(&self) -> u32 {
        match *self {
            HomingState::Seeking { steps } | HomingState::Homed { steps } => steps,
        }
    }

    /// `true` once the sensor was reached.
    pub fn is_homed(&self) -> bool {
        matches!(self, HomingState::Homed { .. })
    }
}

/// Drives the sequencer toward the home sensor until it triggers.
///
/// Each tick reads the sensor first, so a motor already at home takes no
/// steps. Seeking is bounded by `max_steps`; an unreachable or broken
/// sensor fails with `HomingError::HomingFailed` instead of rotating
/// forever.
#[derive(Debug, Clone)]
pub struct HomingController {
    state: HomingState,
    direction: Direction,
    step_delay_ms: u32,
    max_steps: u32,
}

impl HomingController {
    /// Create a controller in the `Seeking` state.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidHomingBudget` if `max_steps` is zero.
    pub fn new(direction: Direction, step_delay_ms: u32, max_steps: u32) -> Result<Self> {
        if max_steps == 0 {
            return Err(ConfigError::InvalidHomingBudget.into());
        }
        Ok(Self {
            state: HomingState::Seeking { steps: 0 },
            direction,
            step_delay_ms,
            max_steps,
        })
    }

    /// Create a controller from configuration.
    pub fn from_config(config: &HomingConfig) -> Result<Self> {
        Self::new(config.direction, config.step_delay_ms, config.max_steps)
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> HomingState {
        self.state
    }

    /// Seek direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Run one iteration of the state machine.
    ///
    /// # Errors
    ///
    /// `HomingError::HomingFailed` once the step budget is spent,
    /// `Error::Interrupted` on shutdown, or any sensor/pin error.
    pub fn tick<P, D, S>(
        &mut self,
        sequencer: &mut WindingSequencer<P, D>,
        sensor: &mut S,
    ) -> Result<HomingState>
    where
        P: OutputPin,
        D: DelayNs,
        S: HomeSensor,
    {
        let steps = match self.state {
            HomingState::Homed { .. } => return Ok(self.state),
            HomingState::Seeking { steps } => steps,
        };

        if sensor.is_home()? {
            self.state = HomingState::Homed { steps };
            return Ok(self.state);
        }

        if steps >= self.max_steps {
            return Err(HomingError::HomingFailed { steps }.into());
        }

        sequencer.step(self.direction)?;
        sequencer.pause_ms(self.step_delay_ms)?;
        self.state = HomingState::Seeking { steps: steps + 1 };
        Ok(self.state)
    }

    /// Seek until the sensor reports home.
    ///
    /// # Errors
    ///
    /// See [`tick`](Self::tick).
    pub fn calibrate<P, D, S>(
        &mut self,
        sequencer: &mut WindingSequencer<P, D>,
        sensor: &mut S,
    ) -> Result<HomingState>
    where
        P: OutputPin,
        D: DelayNs,
        S: HomeSensor,
    {
        log::info!(
            "{}: homing {:?} (max {} steps)",
            sequencer.name(),
            self.direction,
            self.max_steps
        );

        loop {
            let state = match self.tick(sequencer, sensor) {
                Ok(state) => state,
                Err(e) => {
                    log::error!("{}: homing failed: {}", sequencer.name(), e);
                    return Err(e);
                }
            };
            if state.is_homed() {
                log::info!("{}: homed after {} steps", sequencer.name(), state.steps());
                return Ok(state);
            }
        }
    }
}
