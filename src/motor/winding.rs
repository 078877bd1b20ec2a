//! Winding energization state and its transition function.
//!
//! Transitions are pure: [`WindingState::advance`] takes a state and returns
//! the next one together with the coil writes needed to get there. Only the
//! [`WindingSequencer`](super::WindingSequencer) applies them to pins.

use serde::Deserialize;

use crate::motion::Direction;

/// Coil sequencing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum DriveMode {
    /// One coil energized at a time.
    #[default]
    FullStep,
    /// Alternate between one coil and two adjacent coils for finer
    /// resolution and smoother torque hand-over.
    HalfStep,
}

/// Which coils are energized, by index into the coil cycle.
///
/// A `Pair(a, b)` always satisfies `b == (a + 1) % n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindingState {
    /// Exactly one coil energized.
    Single(usize),
    /// Two adjacent coils energized, trailing coil first.
    Pair(usize, usize),
}

/// Result of advancing a [`WindingState`] by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State after the step.
    pub state: WindingState,
    /// Coil to de-energize, if any.
    pub off: Option<usize>,
    /// Coil to energize, if any.
    pub on: Option<usize>,
}

/// Index `delta` positions away from `index` on a ring of `n` coils.
#[inline]
pub(crate) fn wrap(index: usize, delta: i64, n: usize) -> usize {
    (index as i64 + delta).rem_euclid(n as i64) as usize
}

impl Default for WindingState {
    fn default() -> Self {
        WindingState::Single(0)
    }
}

impl WindingState {
    /// The coil the state is anchored on: the single coil, or the trailing
    /// coil of a pair.
    #[inline]
    pub fn index(&self) -> usize {
        match *self {
            WindingState::Single(i) => i,
            WindingState::Pair(a, _) => a,
        }
    }

    /// Energized coils as `(first, second)`.
    #[inline]
    pub fn coils(&self) -> (usize, Option<usize>) {
        match *self {
            WindingState::Single(i) => (i, None),
            WindingState::Pair(a, b) => (a, Some(b)),
        }
    }

    /// Check whether a coil is energized in this state.
    #[inline]
    pub fn is_energized(&self, coil: usize) -> bool {
        match *self {
            WindingState::Single(i) => i == coil,
            WindingState::Pair(a, b) => a == coil || b == coil,
        }
    }

    /// Check the state against a ring of `n` coils.
    pub fn is_valid(&self, n: usize) -> bool {
        match *self {
            WindingState::Single(i) => i < n,
            WindingState::Pair(a, b) => a < n && b == wrap(a, 1, n),
        }
    }

    /// Compute the next state for one step on a ring of `n` coils.
    ///
    /// Full-step moves the single energized coil one position. Half-step
    /// adds the leading coil to a single coil, or drops the trailing coil of
    /// a pair; stepping back undoes exactly what stepping forward did.
    pub fn advance(self, direction: Direction, n: usize, mode: DriveMode) -> Transition {
        let d = direction.sign();
        match (self, mode) {
            (WindingState::Single(i), DriveMode::FullStep) => {
                let next = wrap(i, d, n);
                Transition {
                    state: WindingState::Single(next),
                    off: Some(i),
                    on: Some(next),
                }
            }
            (WindingState::Single(i), DriveMode::HalfStep) => {
                let added = wrap(i, d, n);
                let state = match direction {
                    Direction::Forward => WindingState::Pair(i, added),
                    Direction::Backward => WindingState::Pair(added, i),
                };
                Transition {
                    state,
                    off: None,
                    on: Some(added),
                }
            }
            (WindingState::Pair(a, b), _) => match direction {
                Direction::Forward => Transition {
                    state: WindingState::Single(b),
                    off: Some(a),
                    on: None,
                },
                Direction::Backward => Transition {
                    state: WindingState::Single(a),
                    off: Some(b),
                    on: None,
                },
            },
        }
    }
}
