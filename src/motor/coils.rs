//! Coil configuration.

use heapless::Vec;

use crate::config::validate_coil_pins;
use crate::error::{MotorError, Result};

/// Maximum number of coils a sequencer can drive.
pub const MAX_COILS: usize = 8;

/// Ordered coil pins; index order is the energization cycle.
///
/// Holds between 2 and [`MAX_COILS`] distinct pin numbers. Immutable once
/// built; [`reordered`](Self::reordered) returns a new configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoilConfiguration {
    pins: Vec<u8, MAX_COILS>,
}

impl CoilConfiguration {
    /// Create a coil configuration from pin numbers in cycle order.
    ///
    /// # Errors
    ///
    /// `ConfigError::TooFewCoils`, `TooManyCoils` or `DuplicateCoilPin`.
    pub fn new(pins: &[u8]) -> Result<Self> {
        validate_coil_pins(pins)?;
        // Length checked above
        let pins = Vec::from_slice(pins).map_err(|_| MotorError::InvalidOrder)?;
        Ok(Self { pins })
    }

    /// Number of coils in the cycle.
    #[inline]
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Always false: a configuration holds at least two coils.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Pin number of the coil at cycle position `index`.
    #[inline]
    pub fn pin(&self, index: usize) -> Option<u8> {
        self.pins.get(index).copied()
    }

    /// Pin numbers in cycle order.
    #[inline]
    pub fn pins(&self) -> &[u8] {
        &self.pins
    }

    /// Check that `order` is a permutation of `0..len()`.
    pub fn is_permutation(&self, order: &[usize]) -> bool {
        order.len() == self.len()
            && order.iter().all(|&i| i < self.len())
            && order
                .iter()
                .enumerate()
                .all(|(k, i)| !order[k + 1..].contains(i))
    }

    /// Configuration whose cycle position `k` is this one's `order[k]`.
    ///
    /// # Errors
    ///
    /// `MotorError::InvalidOrder` if `order` is not a permutation.
    pub fn reordered(&self, order: &[usize]) -> Result<Self> {
        if !self.is_permutation(order) {
            return Err(MotorError::InvalidOrder.into());
        }
        let mut pins = Vec::new();
        for &i in order {
            let _ = pins.push(self.pins[i]);
        }
        Ok(Self { pins })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            CoilConfiguration::new(&[]),
            Err(Error::Config(ConfigError::TooFewCoils(0)))
        ));
    }

    #[test]
    fn test_new_rejects_too_many() {
        let pins = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        assert!(matches!(
            CoilConfiguration::new(&pins),
            Err(Error::Config(ConfigError::TooManyCoils(9)))
        ));
    }

    #[test]
    fn test_reordered() {
        let coils = CoilConfiguration::new(&[27, 23, 22, 24]).unwrap();
        let swapped = coils.reordered(&[0, 2, 1, 3]).unwrap();
        assert_eq!(swapped.pins(), &[27, 22, 23, 24]);
        assert!(coils.reordered(&[0, 0, 1, 2]).is_err());
        assert!(coils.reordered(&[0, 1, 2]).is_err());
    }
}
