//! Command list parsing.
//!
//! Format: UTF-8 text, one `angle,hold_seconds` row per line. The first line
//! is a header and is skipped without being looked at. Blank lines are
//! ignored. Any bad row fails the whole load.

use heapless::Vec;

use crate::error::{CommandError, Result};

use super::command::MotionCommand;

/// Maximum number of commands held by one parsed list.
pub const MAX_COMMANDS: usize = 256;

/// Parsed command list.
pub type CommandList = Vec<MotionCommand, MAX_COMMANDS>;

fn parse_field(field: &str, line: usize) -> Result<f32> {
    match field.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CommandError::MalformedCommand { line }.into()),
    }
}

/// Parse one data row. `line` is its 1-based line number, used in errors.
///
/// # Errors
///
/// `CommandError::FieldCount` unless there are exactly two fields,
/// `CommandError::MalformedCommand` if a field is not a finite number or
/// the hold is negative.
pub fn parse_line(text: &str, line: usize) -> Result<MotionCommand> {
    let found = text.split(',').count();
    let mut fields = text.split(',');
    let (Some(angle), Some(hold), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(CommandError::FieldCount { line, found }.into());
    };

    let angle = parse_field(angle, line)?;
    let hold = parse_field(hold, line)?;
    if hold < 0.0 {
        return Err(CommandError::MalformedCommand { line }.into());
    }

    Ok(MotionCommand::new(angle, hold))
}

/// Parse a whole command file.
///
/// # Errors
///
/// The first bad row's error; no commands are returned in that case.
/// `CommandError::TooManyCommands` past [`MAX_COMMANDS`] rows.
pub fn parse_commands(text: &str) -> Result<CommandList> {
    let mut commands = CommandList::new();

    for (index, row) in text.lines().enumerate().skip(1) {
        if row.trim().is_empty() {
            continue;
        }
        let command = parse_line(row, index + 1)?;
        commands
            .push(command)
            .map_err(|_| CommandError::TooManyCommands)?;
    }

    Ok(commands)
}

/// Parse one manual-control entry: a single angle, held for zero seconds.
///
/// # Errors
///
/// `CommandError::InvalidAngle` unless the input is one finite number.
pub fn parse_manual(input: &str) -> Result<MotionCommand> {
    match input.trim().parse::<f32>() {
        Ok(angle) if angle.is_finite() => Ok(MotionCommand::immediate(angle)),
        _ => Err(CommandError::InvalidAngle.into()),
    }
}

/// Load a command file from disk.
///
/// # Errors
///
/// `CommandError::IoError` if the file cannot be read, otherwise as
/// [`parse_commands`].
#[cfg(feature = "std")]
pub fn load_commands<P: AsRef<std::path::Path>>(path: P) -> Result<CommandList> {
    let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        CommandError::IoError(crate::error::bounded(&e.to_string()))
    })?;
    parse_commands(&text)
}
