//! Error types for unipolar-stepper.
//!
//! Provides unified error handling across configuration, winding control,
//! command playback and homing.

use core::fmt;

use crate::playback::MotionCommand;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all unipolar-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// GPIO or winding operation error
    Motor(MotorError),
    /// Command parsing or playback error
    Command(CommandError),
    /// Homing (calibration) error
    Homing(HomingError),
    /// Shutdown was requested while the motor was running
    Interrupted,
}

/// Configuration-related errors.
///
/// All of these are fatal: they prevent the motor from being driven at all.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Fewer than two coil pins were configured
    TooFewCoils(usize),
    /// More coil pins than the sequencer can hold
    TooManyCoils(usize),
    /// The same pin appears twice in the coil list
    DuplicateCoilPin(u8),
    /// Start index does not address a configured coil
    InvalidStartIndex {
        /// Requested start index
        index: usize,
        /// Number of configured coils
        coils: usize,
    },
    /// Degrees per step must be finite and > 0
    InvalidDegreesPerStep(f32),
    /// Invalid soft limits (min must be < max)
    InvalidSoftLimits {
        /// Minimum limit value
        min: f32,
        /// Maximum limit value
        max: f32,
    },
    /// Homing step budget must be > 0
    InvalidHomingBudget,
    /// Playback start angle lies outside the soft limits
    StartOutOfRange {
        /// Configured start angle
        start: f32,
        /// Minimum limit value
        min: f32,
        /// Maximum limit value
        max: f32,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

impl ConfigError {
    /// Free-form configuration error, truncated to 128 bytes.
    pub fn message(msg: &str) -> Self {
        ConfigError::ParseError(bounded(msg))
    }
}

/// GPIO and winding errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Claiming a pin from the GPIO chip failed
    PinClaim {
        /// BCM pin number
        pin: u8,
    },
    /// Writing a level to a coil pin failed
    PinWrite {
        /// BCM pin number
        pin: u8,
    },
    /// Reading the calibration sensor failed
    SensorRead,
    /// A coil order is not a permutation of the configured coils
    InvalidOrder,
    /// The GPIO chip could not be opened
    ChipUnavailable,
}

/// Command parsing and playback errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// A field of a command row is not a finite number (1-based file line)
    MalformedCommand {
        /// Line number in the command source
        line: usize,
    },
    /// A command row does not have exactly two fields
    FieldCount {
        /// Line number in the command source
        line: usize,
        /// Number of fields found
        found: usize,
    },
    /// Manual input is not a single finite angle
    InvalidAngle,
    /// Command source holds more rows than the command buffer
    TooManyCommands,
    /// A relative move would leave the allowed angle range
    OutOfRangeMove {
        /// Offending command
        command: MotionCommand,
        /// Angle the move would have reached
        target: f32,
        /// Allowed minimum angle
        min: f32,
        /// Allowed maximum angle
        max: f32,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Homing errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HomingError {
    /// Sensor never reported home within the step budget
    HomingFailed {
        /// Steps taken before giving up
        steps: u32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
            Error::Homing(e) => write!(f, "Homing error: {}", e),
            Error::Interrupted => write!(f, "Interrupted by shutdown request"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::TooFewCoils(n) => {
                write!(f, "At least 2 coil pins are required, got {}", n)
            }
            ConfigError::TooManyCoils(n) => write!(
                f,
                "Too many coil pins: {} (max {})",
                n,
                crate::motor::MAX_COILS
            ),
            ConfigError::DuplicateCoilPin(pin) => write!(f, "Coil pin {} listed twice", pin),
            ConfigError::InvalidStartIndex { index, coils } => {
                write!(f, "Start index {} out of range for {} coils", index, coils)
            }
            ConfigError::InvalidDegreesPerStep(v) => {
                write!(f, "Invalid degrees per step: {}. Must be > 0", v)
            }
            ConfigError::InvalidSoftLimits { min, max } => {
                write!(f, "Invalid soft limits: min ({}) must be < max ({})", min, max)
            }
            ConfigError::InvalidHomingBudget => write!(f, "Homing max_steps must be > 0"),
            ConfigError::StartOutOfRange { start, min, max } => write!(
                f,
                "Playback start {} deg is outside the soft limits [{}, {}]",
                start, min, max
            ),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinClaim { pin } => write!(f, "Failed to claim GPIO pin {}", pin),
            MotorError::PinWrite { pin } => write!(f, "Failed to write GPIO pin {}", pin),
            MotorError::SensorRead => write!(f, "Failed to read calibration sensor"),
            MotorError::InvalidOrder => write!(f, "Coil order is not a permutation of the coils"),
            MotorError::ChipUnavailable => write!(f, "GPIO chip is not available"),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::MalformedCommand { line } => write!(
                f,
                "Line {} is not numeric. Each row must be two comma-separated numbers: angle(degrees), hold(seconds)",
                line
            ),
            CommandError::FieldCount { line, found } => {
                write!(f, "Line {} has {} fields, expected 2", line, found)
            }
            CommandError::InvalidAngle => write!(f, "Input is not a number of degrees"),
            CommandError::TooManyCommands => {
                write!(f, "Too many commands (max {})", crate::playback::MAX_COMMANDS)
            }
            CommandError::OutOfRangeMove {
                command,
                target,
                min,
                max,
            } => write!(
                f,
                "Command ({}, {}) moves the motor to {}. Allowable range is [{}, {}]",
                command.angle.0, command.hold_secs, target, min, max
            ),
            #[cfg(feature = "std")]
            CommandError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for HomingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomingError::HomingFailed { steps } => {
                write!(f, "Home sensor not reached after {} steps", steps)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

impl From<HomingError> for Error {
    fn from(e: HomingError) -> Self {
        Error::Homing(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

#[cfg(feature = "std")]
impl std::error::Error for HomingError {}

/// Copy a message into a bounded string, truncating at a char boundary.
pub(crate) fn bounded<const N: usize>(msg: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
