//! Motor module for unipolar-stepper.
//!
//! Provides the winding sequencer, its coil configuration and energization
//! state, and open-loop position tracking.

mod builder;
mod coils;
mod position;
mod sequencer;
mod winding;

pub use builder::SequencerBuilder;
pub use coils::{CoilConfiguration, MAX_COILS};
pub use position::MotorPosition;
pub use sequencer::WindingSequencer;
pub use winding::{DriveMode, Transition, WindingState};
