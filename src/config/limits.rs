//! Soft limit configuration and types.

use serde::Deserialize;

use super::units::Degrees;

/// Policy for handling moves that would leave the allowed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum LimitPolicy {
    /// Skip the offending command and keep playing.
    #[default]
    Reject,
    /// Move to the nearest limit instead.
    Clamp,
    /// Stop playback with an error.
    Abort,
}

/// Allowed absolute angle range in degrees (inclusive at both ends).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SoftLimits {
    /// Minimum allowed position in degrees.
    #[serde(rename = "min_degrees")]
    pub min: Degrees,

    /// Maximum allowed position in degrees.
    #[serde(rename = "max_degrees")]
    pub max: Degrees,

    /// What to do when a limit is exceeded.
    #[serde(default)]
    pub policy: LimitPolicy,
}

impl Default for SoftLimits {
    fn default() -> Self {
        Self::new(Degrees(0.0), Degrees(270.0), LimitPolicy::Reject)
    }
}

impl SoftLimits {
    /// Create new soft limits.
    pub fn new(min: Degrees, max: Degrees, policy: LimitPolicy) -> Self {
        Self { min, max, policy }
    }

    /// Check if limits are valid (min < max).
    pub fn is_valid(&self) -> bool {
        self.min.0 < self.max.0
    }

    /// Check if a position is within limits.
    pub fn contains(&self, position: Degrees) -> bool {
        position.0 >= self.min.0 && position.0 <= self.max.0
    }

    /// Apply limit policy to a target position.
    ///
    /// Returns `Some(position)` if valid or clamped, `None` if the policy
    /// refuses the move (`Reject` or `Abort`).
    pub fn apply(&self, target: Degrees) -> Option<Degrees> {
        if self.contains(target) {
            Some(target)
        } else {
            match self.policy {
                LimitPolicy::Reject | LimitPolicy::Abort => None,
                LimitPolicy::Clamp => {
                    if target.0 < self.min.0 {
                        Some(self.min)
                    } else {
                        Some(self.max)
                    }
                }
            }
        }
    }
}
