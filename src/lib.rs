//! Dot Count - estimate-the-dots quiz game
//!
//! Core modules:
//! - `quiz`: Session engine (difficulty, answer generation, countdown, state machine)
//! - `settings`: Typed game options and the schema describing how they are edited
//! - `intl`: Translation lookup collaborator
//! - `hud`: Read-only presentation model built from session snapshots
//! - `platform`: Browser bindings

pub mod error;
pub mod hud;
pub mod intl;
pub mod platform;
pub mod quiz;
pub mod settings;

pub use error::{ConfigurationError, EngineError, InvalidTransition};
pub use intl::{Translations, Translator};
pub use quiz::{AnswerOutcome, EngineContext, Phase, QuizSession, SessionSnapshot};
pub use settings::{SettingKind, Settings, SettingsPatch, SettingsSchema};

/// Game configuration constants
pub mod consts {
    /// Difficulty a fresh session starts at
    pub const DEFAULT_DIFFICULTY: i32 = 8;
    /// Half-width of the window the target count is drawn from, around the difficulty
    pub const ANSWER_SPREAD: i32 = 5;
    /// Fewest answer choices a question can show
    pub const MIN_CHOICES: usize = 2;
    /// Most answer choices a question can show
    pub const MAX_CHOICES: usize = 100;
    /// Smallest dot count a question may ask for
    pub const MIN_DOT_COUNT: i32 = 1;
    /// Largest dot count a question may ask for; keeps choice runs inside `i32`
    pub const MAX_DOT_COUNT: i32 = 1_000_000;
}
