//! Playback module for unipolar-stepper.
//!
//! Parses `angle,hold` command lists and plays them as bounded relative
//! moves.

mod command;
mod parser;
mod player;

pub use command::MotionCommand;
#[cfg(feature = "std")]
pub use parser::load_commands;
pub use parser::{parse_commands, parse_line, parse_manual, CommandList, MAX_COMMANDS};
pub use player::{CommandPlayer, MoveOutcome, PlaybackReport};
