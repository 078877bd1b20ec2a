//! Motion commands.

use crate::config::units::Degrees;

/// One playback row: a relative move followed by a hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionCommand {
    /// Relative rotation; negative turns backward.
    pub angle: Degrees,
    /// Time to hold the new position before the next command.
    pub hold_secs: f32,
}

impl MotionCommand {
    /// Create a command.
    #[inline]
    pub const fn new(angle: f32, hold_secs: f32) -> Self {
        Self {
            angle: Degrees(angle),
            hold_secs,
        }
    }

    /// A move with no hold, as issued from manual control.
    #[inline]
    pub const fn immediate(angle: f32) -> Self {
        Self::new(angle, 0.0)
    }
}

impl From<(f32, f32)> for MotionCommand {
    fn from((angle, hold_secs): (f32, f32)) -> Self {
        Self::new(angle, hold_secs)
    }
}
