//! Position tracking for the open-loop motor.
//!
//! Nothing measures the shaft: the position is whatever the executed moves
//! add up to since homing.

use crate::config::units::{Degrees, Steps};

/// Cumulative motor position since homing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotorPosition {
    /// Commanded angle (sum of executed relative moves).
    angle: Degrees,
    /// Net steps actually issued.
    steps: Steps,
}

impl MotorPosition {
    /// Create a position tracker at a given angle with zero steps issued.
    #[inline]
    pub fn at(angle: Degrees) -> Self {
        Self {
            angle,
            steps: Steps::default(),
        }
    }

    /// Get current angle in degrees.
    #[inline]
    pub fn angle(&self) -> Degrees {
        self.angle
    }

    /// Get net steps issued since the tracker was created.
    #[inline]
    pub fn steps(&self) -> Steps {
        self.steps
    }

    /// Angle reached by a relative move from here.
    #[inline]
    pub fn after(&self, delta: Degrees) -> Degrees {
        self.angle + delta
    }

    /// Record a completed move.
    #[inline]
    pub fn record(&mut self, target: Degrees, steps: Steps) {
        self.angle = target;
        self.steps = self.steps + steps;
    }

    /// Set current position as the new origin.
    #[inline]
    pub fn set_origin(&mut self) {
        *self = Self::default();
    }
}
