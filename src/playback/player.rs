//! Command list playback.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::{Degrees, Steps};
use crate::config::{LimitPolicy, SoftLimits, SystemConfig};
use crate::error::{CommandError, Result};
use crate::motion::AngleTranslator;
use crate::motor::{MotorPosition, WindingSequencer};

use super::command::MotionCommand;

/// What happened to one command.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Moved to the requested angle.
    Moved {
        /// Angle reached.
        target: Degrees,
        /// Signed steps issued.
        steps: Steps,
    },
    /// Moved, but stopped at a limit instead of the requested angle.
    Clamped {
        /// Angle the command asked for.
        requested: Degrees,
        /// Limit reached instead.
        target: Degrees,
        /// Signed steps issued.
        steps: Steps,
    },
    /// Skipped; position unchanged.
    Rejected(CommandError),
}

/// Summary of a playback run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackReport {
    /// Commands moved as requested.
    pub executed: usize,
    /// Commands cut short at a limit.
    pub clamped: usize,
    /// Commands skipped for leaving the allowed range.
    pub rejected: usize,
    /// Position after the last command.
    pub position: MotorPosition,
}

/// Plays relative moves with bounds checking.
///
/// Tracks the motor angle from the start angle it was created with
/// (normally zero right after homing). Out-of-range moves are handled per
/// [`LimitPolicy`]: skipped, clamped to the nearest limit, or fatal.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    translator: AngleTranslator,
    limits: SoftLimits,
    position: MotorPosition,
}

impl CommandPlayer {
    /// Create a player at `start`.
    pub fn new(translator: AngleTranslator, limits: SoftLimits, start: Degrees) -> Self {
        Self {
            translator,
            limits,
            position: MotorPosition::at(start),
        }
    }

    /// Create a player from the motor calibration, limits and start angle
    /// of a configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidDegreesPerStep` for a bad calibration constant.
    pub fn from_config(config: &SystemConfig) -> Result<Self> {
        let translator = AngleTranslator::new(config.motor.degrees_per_step)?;
        Ok(Self::new(translator, config.limits, config.playback.start))
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> MotorPosition {
        self.position
    }

    /// Allowed range.
    #[inline]
    pub fn limits(&self) -> &SoftLimits {
        &self.limits
    }

    /// Execute one command: bounds check, move, record, hold.
    ///
    /// A rejected command does not move or hold and leaves the position
    /// unchanged.
    ///
    /// # Errors
    ///
    /// `CommandError::OutOfRangeMove` under [`LimitPolicy::Abort`], or any
    /// sequencer error (pin failure, `Error::Interrupted`).
    pub fn execute<P, D>(
        &mut self,
        sequencer: &mut WindingSequencer<P, D>,
        command: &MotionCommand,
    ) -> Result<MoveOutcome>
    where
        P: OutputPin,
        D: DelayNs,
    {
        let requested = self.position.after(command.angle);

        let target = match self.limits.apply(requested) {
            Some(target) => target,
            None => {
                let violation = CommandError::OutOfRangeMove {
                    command: *command,
                    target: requested.0,
                    min: self.limits.min.0,
                    max: self.limits.max.0,
                };
                if self.limits.policy == LimitPolicy::Abort {
                    log::error!("{}", violation);
                    return Err(violation.into());
                }
                log::warn!("{}; skipped", violation);
                return Ok(MoveOutcome::Rejected(violation));
            }
        };

        let delta = if target == requested {
            command.angle
        } else {
            target - self.position.angle()
        };
        let steps = self.translator.to_steps(delta);
        log::info!(
            "{}: {:+} deg -> {} deg ({} steps), hold {} s",
            sequencer.name(),
            delta.0,
            target.0,
            steps.0,
            command.hold_secs
        );

        sequencer.move_by(steps)?;
        self.position.record(target, steps);
        sequencer.pause_secs(command.hold_secs)?;

        if target == requested {
            Ok(MoveOutcome::Moved { target, steps })
        } else {
            Ok(MoveOutcome::Clamped {
                requested,
                target,
                steps,
            })
        }
    }

    /// Execute every command in order.
    ///
    /// # Errors
    ///
    /// Stops at the first error from [`execute`](Self::execute). Rejected
    /// commands are counted, not errors.
    pub fn play<P, D>(
        &mut self,
        sequencer: &mut WindingSequencer<P, D>,
        commands: &[MotionCommand],
    ) -> Result<PlaybackReport>
    where
        P: OutputPin,
        D: DelayNs,
    {
        let mut report = PlaybackReport::default();

        for command in commands {
            match self.execute(sequencer, command)? {
                MoveOutcome::Moved { .. } => report.executed += 1,
                MoveOutcome::Clamped { .. } => report.clamped += 1,
                MoveOutcome::Rejected(_) => report.rejected += 1,
            }
        }

        report.position = self.position;
        log::info!(
            "{}: playback done: {} moved, {} clamped, {} rejected, at {} deg",
            sequencer.name(),
            report.executed,
            report.clamped,
            report.rejected,
            report.position.angle().0
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::motor::SequencerBuilder;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    fn player(policy: LimitPolicy) -> CommandPlayer {
        CommandPlayer::new(
            AngleTranslator::new(10.0).unwrap(),
            SoftLimits::new(Degrees(0.0), Degrees(270.0), policy),
            Degrees(0.0),
        )
    }

    fn idle_sequencer(pins: &[PinMock]) -> WindingSequencer<PinMock, NoopDelay> {
        let mut builder = SequencerBuilder::new().step_delay_ms(0).delay(NoopDelay::new());
        for (number, pin) in pins.iter().enumerate() {
            builder = builder.coil(number as u8, pin.clone());
        }
        builder.build_idle().unwrap()
    }

    #[test]
    fn test_rejected_move_does_not_touch_pins() {
        let pins = [PinMock::new(&[]), PinMock::new(&[])];
        let mut seq = idle_sequencer(&pins);
        let mut player = player(LimitPolicy::Reject);

        let outcome = player.execute(&mut seq, &MotionCommand::new(-10.0, 5.0)).unwrap();
        assert_eq!(
            outcome.clone(),
            MoveOutcome::Rejected(CommandError::OutOfRangeMove {
                command: MotionCommand::new(-10.0, 5.0),
                target: -10.0,
                min: 0.0,
                max: 270.0,
            })
        );
        assert_eq!(player.position().angle(), Degrees(0.0));

        for mut pin in pins {
            pin.done();
        }
    }

    #[test]
    fn test_abort_returns_error() {
        let pins = [PinMock::new(&[]), PinMock::new(&[])];
        let mut seq = idle_sequencer(&pins);
        let mut player = player(LimitPolicy::Abort);

        let result = player.execute(&mut seq, &MotionCommand::new(280.0, 0.0));
        assert!(matches!(
            result,
            Err(Error::Command(CommandError::OutOfRangeMove { .. }))
        ));

        for mut pin in pins {
            pin.done();
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_clamped_move_stops_at_limit() {
        // 2 coils, 10 deg/step: 0 -> 270 is 27 forward steps, one write
        // low and one write high each.
        let mut coil_a = std::vec::Vec::new();
        let mut coil_b = std::vec::Vec::new();
        for step in 0..27 {
            let (off, on) = if step % 2 == 0 {
                (&mut coil_a, &mut coil_b)
            } else {
                (&mut coil_b, &mut coil_a)
            };
            off.push(Transaction::set(State::Low));
            on.push(Transaction::set(State::High));
        }
        let pins = [PinMock::new(&coil_a), PinMock::new(&coil_b)];
        let mut seq = idle_sequencer(&pins);
        let mut player = player(LimitPolicy::Clamp);

        let outcome = player.execute(&mut seq, &MotionCommand::new(300.0, 0.0)).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Clamped {
                requested: Degrees(300.0),
                target: Degrees(270.0),
                steps: Steps(27),
            }
        );
        assert_eq!(player.position().steps(), Steps(27));

        for mut pin in pins {
            pin.done();
        }
    }
}
