//! Quiz session state machine
//!
//! `Idle -> Playing -> (answered | timed out)* -> GameOver -> Playing (retry)`.
//! The settings panel is an overlay flag: opening it while playing freezes
//! the countdown, closing it restarts the current question.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::answer::{generate_answer, generate_choices};
use super::clock::SessionClock;
use super::state::{
    AnswerFeedback, AnswerOutcome, Phase, QuestionTimeout, SessionSnapshot, SessionState,
};
use crate::error::{EngineError, InvalidTransition};
use crate::hud::Hud;
use crate::intl::{Translations, Translator};
use crate::settings::{Settings, SettingsPatch, SettingsProvider, SettingsSchema};

/// Collaborators handed to the engine at construction
pub struct EngineContext {
    pub translator: Box<dyn Translator>,
    pub settings: Box<dyn SettingsProvider>,
}

impl Default for EngineContext {
    fn default() -> Self {
        Self {
            translator: Box::new(Translations::english()),
            settings: Box::new(SettingsSchema::default()),
        }
    }
}

impl EngineContext {
    pub fn new(translator: impl Translator + 'static, settings: impl SettingsProvider + 'static) -> Self {
        Self {
            translator: Box::new(translator),
            settings: Box::new(settings),
        }
    }
}

/// Handle returned by `QuizSession::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Listener = Box<dyn FnMut(&SessionSnapshot)>;

/// How a question ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Correct,
    Wrong,
    TimedOut,
}

/// The game session engine
pub struct QuizSession {
    state: SessionState,
    clock: SessionClock<QuestionTimeout>,
    rng: Pcg32,
    context: EngineContext,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u32,
    disposed: bool,
}

impl QuizSession {
    /// Create an idle session; settings come from the context's provider
    pub fn new(context: EngineContext, seed: u64) -> Self {
        let settings = context.settings.default_settings();
        log::info!("Quiz session created with seed {}", seed);
        Self {
            state: SessionState::new(settings),
            clock: SessionClock::new(),
            rng: Pcg32::seed_from_u64(seed),
            context,
            listeners: Vec::new(),
            next_subscription: 1,
            disposed: false,
        }
    }

    /// Idle session with English strings and schema defaults
    pub fn with_defaults(seed: u64) -> Self {
        Self::new(EngineContext::default(), seed)
    }

    /// Begin a session with `settings`. Valid from `Idle` or `GameOver`.
    pub fn start(&mut self, settings: Settings) -> Result<(), EngineError> {
        self.ensure_live()?;
        if self.state.phase == Phase::Playing {
            return Err(InvalidTransition::WrongPhase {
                action: "start",
                phase: self.state.phase,
            }
            .into());
        }
        if self.state.settings_open {
            return Err(InvalidTransition::SettingsOpen { action: "start" }.into());
        }
        settings.validate()?;

        self.state.settings = settings;
        self.state.reset();
        self.clock.cancel();
        log::info!(
            "Session started: {} questions, {} choices, {}s timer, dots {:?}",
            self.state.settings.num_questions,
            self.state.settings.num_choices,
            self.state.settings.timer_seconds,
            self.state.settings.aircraft_count_range
        );

        self.advance();
        self.notify();
        Ok(())
    }

    /// Start again with the current settings
    pub fn retry(&mut self) -> Result<(), EngineError> {
        let settings = self.state.settings.clone();
        self.start(settings)
    }

    /// Answer the current question. The first of {submission, timeout} wins.
    pub fn submit_answer(&mut self, choice: i32) -> Result<AnswerOutcome, InvalidTransition> {
        self.ensure_live()?;
        if self.state.phase != Phase::Playing {
            return Err(InvalidTransition::WrongPhase {
                action: "submit an answer",
                phase: self.state.phase,
            });
        }
        if self.state.settings_open {
            return Err(InvalidTransition::SettingsOpen {
                action: "submit an answer",
            });
        }
        // Must precede any state change so the pending timeout can't also resolve this question
        self.clock.cancel();

        log::debug!(
            "Question {}: chose {}, answer {}",
            self.state.question_index + 1,
            choice,
            self.state.current_answer
        );
        let resolution = if choice == self.state.current_answer {
            Resolution::Correct
        } else {
            Resolution::Wrong
        };
        let outcome = self.resolve(resolution);
        self.notify();
        Ok(outcome)
    }

    /// Advance the countdown. Returns the outcome if the current question timed out.
    pub fn tick(&mut self, dt: Duration) -> Option<AnswerOutcome> {
        if self.disposed || self.state.phase != Phase::Playing {
            return None;
        }
        let timeout = self.clock.advance(dt)?;
        if timeout.question_index != self.state.question_index {
            log::debug!(
                "Ignoring timeout for question {} (now on {})",
                timeout.question_index,
                self.state.question_index
            );
            return None;
        }

        log::info!("Time's up on question {}", self.state.question_index + 1);
        let outcome = self.resolve(Resolution::TimedOut);
        self.notify();
        Some(outcome)
    }

    /// Show the settings overlay; pauses the countdown while playing
    pub fn open_settings(&mut self) -> Result<(), InvalidTransition> {
        self.ensure_live()?;
        if self.state.settings_open {
            return Ok(());
        }
        self.state.settings_open = true;
        if self.state.phase == Phase::Playing {
            self.clock.cancel();
            log::info!("Paused on question {}", self.state.question_index + 1);
        }
        self.notify();
        Ok(())
    }

    /// Hide the settings overlay; restarts the current question while playing
    pub fn close_settings(&mut self) -> Result<(), InvalidTransition> {
        self.ensure_live()?;
        if !self.state.settings_open {
            return Ok(());
        }
        self.state.settings_open = false;
        if self.state.phase == Phase::Playing {
            log::info!("Resuming with question {}", self.state.question_index + 1);
            self.pose_question();
        }
        self.notify();
        Ok(())
    }

    /// Merge `patch` into the settings. Applies from the next question on,
    /// except a dot range that no longer holds the current answer, which
    /// redraws the current question.
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> Result<(), EngineError> {
        self.ensure_live()?;
        if patch.is_empty() {
            return Ok(());
        }
        let merged = self.state.settings.merged(patch);
        merged.validate()?;
        log::info!("Settings changed: {:?}", patch);
        self.state.settings = merged;

        let (min, max) = self.state.settings.aircraft_count_range;
        let answer = self.state.current_answer;
        if self.state.phase == Phase::Playing
            && !self.state.settings_open
            && !(min..=max).contains(&answer)
        {
            log::info!(
                "Answer {} is outside {}..={}, redrawing question {}",
                answer,
                min,
                max,
                self.state.question_index + 1
            );
            self.pose_question();
        }
        self.notify();
        Ok(())
    }

    /// Register a listener called with a fresh snapshot after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Release the countdown and listeners. Later mutations are rejected.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.clock.cancel();
        self.listeners.clear();
        self.disposed = true;
        log::info!("Quiz session disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.state.phase,
            settings_open: self.state.settings_open,
            question_index: self.state.question_index,
            current_answer: self.state.current_answer,
            choices: self.state.choices.clone(),
            difficulty: self.state.difficulty.value(),
            correct_count: self.state.correct_count,
            timer_progress: self.clock.progress(),
            last_feedback: self.state.last_feedback,
            settings: self.state.settings.clone(),
        }
    }

    /// Presentation model for the current state
    pub fn hud(&self) -> Hud {
        Hud::build(&self.snapshot(), self.context.translator.as_ref())
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn translator(&self) -> &dyn Translator {
        self.context.translator.as_ref()
    }

    fn ensure_live(&self) -> Result<(), InvalidTransition> {
        if self.disposed {
            return Err(InvalidTransition::Disposed);
        }
        Ok(())
    }

    /// Score the current question, adapt difficulty, move on
    fn resolve(&mut self, resolution: Resolution) -> AnswerOutcome {
        let correct = resolution == Resolution::Correct;
        let new_difficulty = if correct {
            self.state.correct_count += 1;
            log::info!("Bingo! ({} correct)", self.state.correct_count);
            self.state.difficulty.increase()
        } else {
            if resolution == Resolution::Wrong {
                log::info!("Wrong :(");
            }
            self.state.difficulty.decrease()
        };

        self.state.last_feedback = self.state.settings.answer_feedback.then_some(AnswerFeedback {
            question_index: self.state.question_index,
            correct,
        });

        self.advance();
        AnswerOutcome {
            correct,
            new_difficulty,
        }
    }

    /// Next question, or game over after the last one
    fn advance(&mut self) {
        let next = self.state.question_index + 1;
        if i64::from(next) >= i64::from(self.state.settings.num_questions) {
            self.clock.cancel();
            self.state.phase = Phase::GameOver;
            self.state.choices.clear();
            log::info!(
                "GG: {} / {}",
                self.state.correct_count,
                self.state.settings.num_questions
            );
            return;
        }

        self.state.question_index = next;
        self.state.phase = Phase::Playing;
        self.pose_question();
    }

    /// Generate the answer and choices for `question_index` and start its countdown
    fn pose_question(&mut self) {
        let settings = &self.state.settings;
        let answer = generate_answer(
            &mut self.rng,
            self.state.difficulty.value(),
            settings.aircraft_count_range,
        );
        self.state.current_answer = answer;
        self.state.choices = generate_choices(&mut self.rng, answer, settings.num_choices);
        self.clock.start(
            settings.timer_duration(),
            QuestionTimeout {
                question_index: self.state.question_index,
            },
        );
        log::debug!(
            "Question {}: {} dots, choices {:?}",
            self.state.question_index + 1,
            answer,
            self.state.choices
        );
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}
