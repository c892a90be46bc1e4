//! Session state and the read-only snapshot handed to the UI

use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyTracker;
use crate::settings::Settings;

/// Top-level phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Constructed, not started yet
    Idle,
    /// A question is on screen (or paused behind the settings panel)
    Playing,
    /// All questions resolved
    GameOver,
}

/// Result of resolving one question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub new_difficulty: i32,
}

/// Correct/incorrect flash for the question that just ended.
///
/// Only produced when `Settings::answer_feedback` is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub question_index: i32,
    pub correct: bool,
}

/// Timeout payload carried by the session clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QuestionTimeout {
    pub question_index: i32,
}

/// Everything the engine mutates
#[derive(Debug, Clone)]
pub(crate) struct SessionState {
    pub phase: Phase,
    pub settings_open: bool,
    /// -1 before the first question
    pub question_index: i32,
    pub current_answer: i32,
    pub choices: Vec<i32>,
    pub difficulty: DifficultyTracker,
    pub correct_count: u32,
    pub last_feedback: Option<AnswerFeedback>,
    pub settings: Settings,
}

impl SessionState {
    pub fn new(settings: Settings) -> Self {
        Self {
            phase: Phase::Idle,
            settings_open: false,
            question_index: -1,
            current_answer: 0,
            choices: Vec::new(),
            difficulty: DifficultyTracker::default(),
            correct_count: 0,
            last_feedback: None,
            settings,
        }
    }

    /// Back to "before the first question", keeping settings and the overlay flag
    pub fn reset(&mut self) {
        self.question_index = -1;
        self.current_answer = 0;
        self.choices.clear();
        self.difficulty.reset();
        self.correct_count = 0;
        self.last_feedback = None;
    }
}

/// Read-only copy of the session, broadcast after every change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub settings_open: bool,
    pub question_index: i32,
    pub current_answer: i32,
    pub choices: Vec<i32>,
    pub difficulty: i32,
    pub correct_count: u32,
    /// Elapsed fraction of the current question's countdown
    pub timer_progress: f32,
    pub last_feedback: Option<AnswerFeedback>,
    pub settings: Settings,
}

impl SessionSnapshot {
    /// Questions resolved so far
    pub fn answered(&self) -> u32 {
        match self.phase {
            Phase::Idle => 0,
            Phase::Playing => self.question_index.max(0) as u32,
            Phase::GameOver => (self.question_index + 1).max(0) as u32,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
