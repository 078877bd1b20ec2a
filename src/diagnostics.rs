//! Wiring diagnostics.
//!
//! A unipolar motor with unlabeled leads only turns smoothly when its coils
//! are energized in the right order. [`permutation_scan`] runs the motor
//! through every possible order so the working one can be spotted.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::Vec;

use crate::error::Result;
use crate::motor::{WindingSequencer, MAX_COILS};

/// Steps per order used by the `scan` command unless told otherwise.
pub const DEFAULT_SCAN_STEPS: u32 = 20_000;

/// All orderings of `0..n` in lexicographic order.
#[derive(Debug, Clone)]
pub struct CoilPermutations {
    current: Vec<usize, MAX_COILS>,
    exhausted: bool,
}

impl CoilPermutations {
    /// Start at the identity ordering. `n` is capped at [`MAX_COILS`].
    pub fn new(n: usize) -> Self {
        Self {
            current: (0..n.min(MAX_COILS)).collect(),
            exhausted: false,
        }
    }
}

/// Rearrange `v` into its lexicographic successor; `false` at the last one.
fn next_permutation(v: &mut [usize]) -> bool {
    let Some(pivot) = v.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let successor = v
        .iter()
        .rposition(|&x| x > v[pivot])
        .unwrap_or(pivot + 1);
    v.swap(pivot, successor);
    v[pivot + 1..].reverse();
    true
}

impl Iterator for CoilPermutations {
    type Item = Vec<usize, MAX_COILS>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let order = self.current.clone();
        self.exhausted = !next_permutation(&mut self.current);
        Some(order)
    }
}

/// Run `steps_per_order` forward steps in every coil order.
///
/// Orders are visited lexicographically starting from the configured one.
/// `on_order` is called with the order's index and pin list before the
/// motor runs in it. All coils are released at the end and the sequencer
/// is handed back in the last order tried.
///
/// # Errors
///
/// Any pin error, or `Error::Interrupted` on shutdown; the scan stops
/// there.
pub fn permutation_scan<P, D, F>(
    mut sequencer: WindingSequencer<P, D>,
    steps_per_order: u32,
    mut on_order: F,
) -> Result<WindingSequencer<P, D>>
where
    P: OutputPin,
    D: DelayNs,
    F: FnMut(usize, &[u8]),
{
    let n = sequencer.coils().len();
    // Order of the sequencer's current cycle, relative to the original one.
    let mut applied: Vec<usize, MAX_COILS> = (0..n).collect();

    for (index, order) in CoilPermutations::new(n).enumerate() {
        let relative: Vec<usize, MAX_COILS> = order
            .iter()
            .map(|k| applied.iter().position(|a| a == k).unwrap_or(*k))
            .collect();
        sequencer = sequencer.reorder(&relative)?;
        applied = order;

        log::info!(
            "{}: order {} {:?}",
            sequencer.name(),
            index + 1,
            sequencer.coils().pins()
        );
        on_order(index, sequencer.coils().pins());

        sequencer.energize()?;
        sequencer.move_steps(i64::from(steps_per_order))?;
    }

    sequencer.release()?;
    Ok(sequencer)
}
