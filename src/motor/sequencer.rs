//! Winding sequencer.
//!
//! Generic over embedded-hal 1.0 output pins and delay provider.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::{String, Vec};

use crate::config::units::Steps;
use crate::error::{MotorError, Result};
use crate::motion::Direction;
use crate::shutdown::ShutdownSignal;

use super::coils::{CoilConfiguration, MAX_COILS};
use super::winding::{DriveMode, WindingState};

/// Longest uninterrupted sleep inside [`WindingSequencer::pause_ms`].
const PAUSE_SLICE_MS: u32 = 100;

/// Unipolar winding sequencer.
///
/// Owns the coil pins and the energization state. Every step de-energizes
/// the old coil(s) and energizes the new one(s) before returning.
///
/// Generic over:
/// - `P`: coil pin type (must implement `OutputPin`)
/// - `D`: delay provider (must implement `DelayNs`)
pub struct WindingSequencer<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Coil pins in the order they were claimed.
    pins: Vec<P, MAX_COILS>,

    /// Pin numbers in cycle order.
    coils: CoilConfiguration,

    /// Cycle position -> slot in `pins`.
    order: Vec<usize, MAX_COILS>,

    /// Currently energized coils.
    state: WindingState,

    /// Full- or half-step sequencing.
    mode: DriveMode,

    /// Delay provider for step timing and holds.
    delay: D,

    /// Delay after every step of a move.
    step_delay_ms: u32,

    /// Net steps taken since the sequencer was built.
    position: Steps,

    /// Stop request checked between steps.
    shutdown: Option<&'static ShutdownSignal>,

    /// Motor name for logging.
    name: String<32>,
}

impl<P, D> WindingSequencer<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a sequencer. Does not touch the pins; see [`energize`](Self::energize).
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        pins: Vec<P, MAX_COILS>,
        coils: CoilConfiguration,
        state: WindingState,
        mode: DriveMode,
        delay: D,
        step_delay_ms: u32,
        shutdown: Option<&'static ShutdownSignal>,
        name: String<32>,
    ) -> Self {
        let order = (0..pins.len()).collect();
        Self {
            pins,
            coils,
            order,
            state,
            mode,
            delay,
            step_delay_ms,
            position: Steps::default(),
            shutdown,
            name,
        }
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the current winding state.
    #[inline]
    pub fn state(&self) -> WindingState {
        self.state
    }

    /// Get the coil configuration.
    #[inline]
    pub fn coils(&self) -> &CoilConfiguration {
        &self.coils
    }

    /// Get the drive mode.
    #[inline]
    pub fn drive_mode(&self) -> DriveMode {
        self.mode
    }

    /// Net steps taken since the sequencer was built.
    #[inline]
    pub fn position_steps(&self) -> Steps {
        self.position
    }

    /// Delay after every step of a move.
    #[inline]
    pub fn step_delay_ms(&self) -> u32 {
        self.step_delay_ms
    }

    fn check_shutdown(&self) -> Result<()> {
        match self.shutdown {
            Some(signal) => signal.check(),
            None => Ok(()),
        }
    }

    fn write(&mut self, coil: usize, high: bool) -> Result<()> {
        let pin_number = self.coils.pin(coil).unwrap_or_default();
        let pin = &mut self.pins[self.order[coil]];
        let result = if high { pin.set_high() } else { pin.set_low() };
        result.map_err(|_| MotorError::PinWrite { pin: pin_number }.into())
    }

    /// Drive every coil low, then energize the current state.
    ///
    /// # Errors
    ///
    /// `MotorError::PinWrite` if any write fails.
    pub fn energize(&mut self) -> Result<()> {
        self.release()?;
        let (first, second) = self.state.coils();
        self.write(first, true)?;
        if let Some(second) = second {
            self.write(second, true)?;
        }
        Ok(())
    }

    /// Drive every coil low. The winding state is kept so `energize` can
    /// restore it.
    ///
    /// Attempts every pin even if one fails; reports the first failure.
    pub fn release(&mut self) -> Result<()> {
        let mut first_error = Ok(());
        for coil in 0..self.coils.len() {
            let result = self.write(coil, false);
            if first_error.is_ok() {
                first_error = result;
            }
        }
        first_error
    }

    /// Advance the windings by one step.
    ///
    /// De-energizes the outgoing coil and energizes the incoming one
    /// (full-step), or adds/drops a single coil (half-step). Both writes
    /// have completed when this returns.
    ///
    /// # Errors
    ///
    /// `MotorError::PinWrite` if a write fails. The state is not advanced,
    /// and a coil switched off by this step is switched back on first.
    pub fn step(&mut self, direction: Direction) -> Result<WindingState> {
        let transition = self.state.advance(direction, self.coils.len(), self.mode);

        if let Some(off) = transition.off {
            self.write(off, false)?;
        }
        if let Some(on) = transition.on {
            if let Err(e) = self.write(on, true) {
                if let Some(off) = transition.off {
                    if self.write(off, true).is_err() {
                        log::error!("{}: coil {} left de-energized", self.name, off);
                    }
                }
                return Err(e);
            }
        }

        self.state = transition.state;
        self.position = Steps(self.position.0 + direction.sign());
        log::debug!("{}: {:?} -> {:?}", self.name, direction, self.state);

        Ok(self.state)
    }

    /// Take `|count|` steps, forward for positive counts, with the step
    /// delay after each one.
    ///
    /// # Errors
    ///
    /// `Error::Interrupted` if shutdown is requested between steps, or any
    /// error from [`step`](Self::step).
    pub fn move_steps(&mut self, count: i64) -> Result<WindingState> {
        let direction = Direction::from_steps(count);
        for _ in 0..count.unsigned_abs() {
            self.check_shutdown()?;
            self.step(direction)?;
            self.delay.delay_ms(self.step_delay_ms);
        }
        Ok(self.state)
    }

    /// Take a signed number of steps.
    #[inline]
    pub fn move_by(&mut self, steps: Steps) -> Result<WindingState> {
        self.move_steps(steps.0)
    }

    /// Hold position for `ms` milliseconds (blocking).
    ///
    /// Sleeps in slices so a shutdown request ends the hold early.
    pub fn pause_ms(&mut self, ms: u32) -> Result<()> {
        let mut remaining = ms;
        while remaining > 0 {
            self.check_shutdown()?;
            let slice = remaining.min(PAUSE_SLICE_MS);
            self.delay.delay_ms(slice);
            remaining -= slice;
        }
        self.check_shutdown()
    }

    /// Hold position for a number of seconds (blocking).
    pub fn pause_secs(&mut self, secs: f32) -> Result<()> {
        // Float to int `as` saturates; negative and NaN become 0.
        self.pause_ms(libm::roundf(secs * 1000.0) as u32)
    }

    /// Return a sequencer that cycles through the coils in a new order.
    ///
    /// Cycle position `k` of the result drives this sequencer's coil
    /// `order[k]`. All coils are driven low and the result starts at cycle
    /// position 0, de-energized; call [`energize`](Self::energize) next.
    ///
    /// # Errors
    ///
    /// `MotorError::InvalidOrder` if `order` is not a permutation.
    pub fn reorder(mut self, order: &[usize]) -> Result<Self> {
        let coils = self.coils.reordered(order)?;
        self.release()?;
        let slots = order.iter().map(|&k| self.order[k]).collect();
        self.order = slots;
        self.coils = coils;
        self.state = WindingState::Single(0);
        Ok(self)
    }
}
