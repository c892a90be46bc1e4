use thiserror::Error;

use crate::quiz::Phase;

/// An operation that is not valid in the session's current state.
///
/// These are expected during normal play (a double click racing a phase
/// change) and leave the session untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTransition {
    #[error("cannot {action} while the session is {phase:?}")]
    WrongPhase { action: &'static str, phase: Phase },
    #[error("cannot {action} while the settings panel is open")]
    SettingsOpen { action: &'static str },
    #[error("the session has been disposed")]
    Disposed,
}

/// Settings values that break the engine's invariants.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("timer must be a positive number of seconds, got {0}")]
    TimerNotPositive(f32),
    #[error("timer of {0} seconds is too long")]
    TimerTooLong(f32),
    #[error("a session needs at least one question")]
    NoQuestions,
    #[error("at least {min} choices are required, got {got}")]
    TooFewChoices { got: usize, min: usize },
    #[error("at most {max} choices are allowed, got {got}")]
    TooManyChoices { got: usize, max: usize },
    #[error("dot count range is inverted: min {min} > max {max}")]
    InvertedRange { min: i32, max: i32 },
    #[error("dot count range must start at {floor} or above, got {min}")]
    RangeBelowFloor { min: i32, floor: i32 },
    #[error("dot count range must end at {ceiling} or below, got {max}")]
    RangeAboveCeiling { max: i32, ceiling: i32 },
    #[error("speed must be finite, got {0}")]
    SpeedNotFinite(f32),
    #[error("setting {setting} expects {expected} input")]
    KindMismatch {
        setting: &'static str,
        expected: &'static str,
    },
    #[error("unknown option {option:?} for setting {setting}")]
    UnknownOption { setting: &'static str, option: String },
    #[error("malformed settings JSON")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// Anything an engine operation can reject.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
