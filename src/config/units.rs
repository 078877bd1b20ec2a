//! Unit types for physical quantities.
//!
//! Keeps shaft angles and winding step counts apart at compile time.

use core::ops::{Add, Neg, Sub};

use serde::Deserialize;

use crate::motion::Direction;

/// Angular position or displacement in degrees.
///
/// Used for configuration, commands and position tracking. Lowered to
/// [`Steps`] by the [`AngleTranslator`](crate::motion::AngleTranslator).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f32);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Add for Degrees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Degrees {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Signed winding step count.
///
/// The sign carries the direction, the magnitude the number of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Steps(pub i64);

impl Steps {
    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Get absolute value as u64.
    #[inline]
    pub fn abs(self) -> u64 {
        self.0.unsigned_abs()
    }

    /// Direction implied by the sign (zero counts as forward).
    #[inline]
    pub fn direction(self) -> Direction {
        Direction::from_steps(self.0)
    }
}

impl Add for Steps {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Neg for Steps {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}
