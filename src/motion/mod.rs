//! Motion module for unipolar-stepper.
//!
//! Provides step direction and the angle/step translator.

mod direction;
mod translator;

pub use direction::Direction;
pub use translator::{angle_to_steps, AngleTranslator};
