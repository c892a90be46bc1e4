//! Game settings and the schema describing how each one is edited
//!
//! `Settings` is what the engine reads. `SettingsSchema` is what a settings
//! panel reads: every option is one of a closed set of editor kinds
//! (`Range`, `Slider`, `Select`) carrying its bounds and default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_CHOICES, MAX_DOT_COUNT, MIN_CHOICES, MIN_DOT_COUNT};
use crate::error::ConfigurationError;

/// Game settings consumed by the quiz engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Seconds allowed per question
    pub timer_seconds: f32,
    /// Questions per session
    pub num_questions: u32,
    /// Answer buttons shown per question
    pub num_choices: usize,
    /// Inclusive bounds on the number of dots shown
    pub aircraft_count_range: (i32, i32),
    /// Dot animation speed (presentation only)
    pub speed: f32,
    /// Flash correct/incorrect feedback after each question
    pub answer_feedback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timer_seconds: 15.0,
            num_questions: 15,
            num_choices: 5,
            aircraft_count_range: (5, 20),
            speed: 5.0,
            answer_feedback: false,
        }
    }
}

impl Settings {
    /// Check every invariant the engine relies on
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.timer_seconds.is_finite() && self.timer_seconds > 0.0) {
            return Err(ConfigurationError::TimerNotPositive(self.timer_seconds));
        }
        if Duration::try_from_secs_f32(self.timer_seconds).is_err() {
            return Err(ConfigurationError::TimerTooLong(self.timer_seconds));
        }
        if self.num_questions == 0 {
            return Err(ConfigurationError::NoQuestions);
        }
        if self.num_choices < MIN_CHOICES {
            return Err(ConfigurationError::TooFewChoices {
                got: self.num_choices,
                min: MIN_CHOICES,
            });
        }
        if self.num_choices > MAX_CHOICES {
            return Err(ConfigurationError::TooManyChoices {
                got: self.num_choices,
                max: MAX_CHOICES,
            });
        }
        let (min, max) = self.aircraft_count_range;
        if min > max {
            return Err(ConfigurationError::InvertedRange { min, max });
        }
        if min < MIN_DOT_COUNT {
            return Err(ConfigurationError::RangeBelowFloor {
                min,
                floor: MIN_DOT_COUNT,
            });
        }
        if max > MAX_DOT_COUNT {
            return Err(ConfigurationError::RangeAboveCeiling {
                max,
                ceiling: MAX_DOT_COUNT,
            });
        }
        if !self.speed.is_finite() {
            return Err(ConfigurationError::SpeedNotFinite(self.speed));
        }
        Ok(())
    }

    /// Countdown length for one question. Saturates on settings that
    /// failed `validate`.
    pub fn timer_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.timer_seconds.max(0.0)).unwrap_or(Duration::MAX)
    }

    /// Return a copy with every field present in `patch` replaced
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        Self {
            timer_seconds: patch.timer_seconds.unwrap_or(self.timer_seconds),
            num_questions: patch.num_questions.unwrap_or(self.num_questions),
            num_choices: patch.num_choices.unwrap_or(self.num_choices),
            aircraft_count_range: patch
                .aircraft_count_range
                .unwrap_or(self.aircraft_count_range),
            speed: patch.speed.unwrap_or(self.speed),
            answer_feedback: patch.answer_feedback.unwrap_or(self.answer_feedback),
        }
    }
}

/// Partial settings update; absent fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub timer_seconds: Option<f32>,
    pub num_questions: Option<u32>,
    pub num_choices: Option<usize>,
    pub aircraft_count_range: Option<(i32, i32)>,
    pub speed: Option<f32>,
    pub answer_feedback: Option<bool>,
}

impl SettingsPatch {
    /// Parse a patch such as `{"num_choices": 4}`
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Supplies the defaults a fresh engine starts from
pub trait SettingsProvider {
    fn default_settings(&self) -> Settings;
}

impl SettingsProvider for Settings {
    fn default_settings(&self) -> Settings {
        self.clone()
    }
}

/// Identifies one editable option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingId {
    Timer,
    Speed,
    AircraftCount,
    NumQuestions,
    NumChoices,
    AnswerFeedback,
}

impl SettingId {
    /// Display order in the settings panel
    pub const ALL: [SettingId; 6] = [
        SettingId::Timer,
        SettingId::Speed,
        SettingId::AircraftCount,
        SettingId::NumQuestions,
        SettingId::NumChoices,
        SettingId::AnswerFeedback,
    ];

    /// Translation key (also the option's label)
    pub fn key(&self) -> &'static str {
        match self {
            SettingId::Timer => "timer",
            SettingId::Speed => "speed",
            SettingId::AircraftCount => "aircraft-count",
            SettingId::NumQuestions => "num-questions",
            SettingId::NumChoices => "num-choices",
            SettingId::AnswerFeedback => "answer-feedback",
        }
    }
}

/// How an option is edited, with its bounds and default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SettingKind {
    /// Two knobs picking an inclusive sub-range of `min..=max`
    Range { min: i32, max: i32, default: (i32, i32) },
    /// One knob picking a value in `min..=max`
    Slider { min: i32, max: i32, default: i32 },
    /// One of a fixed list of options
    Select { items: Vec<String>, default: String },
}

impl SettingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKind::Range { .. } => "range",
            SettingKind::Slider { .. } => "slider",
            SettingKind::Select { .. } => "select",
        }
    }
}

/// Raw value coming out of a settings editor
#[derive(Debug, Clone, PartialEq)]
pub enum SettingInput {
    Range(f64, f64),
    Slider(f64),
    Select(String),
}

/// Every option the settings panel shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SettingsSchema {
    pub timer: SettingKind,
    pub speed: SettingKind,
    pub aircraft_count: SettingKind,
    pub num_questions: SettingKind,
    pub num_choices: SettingKind,
    pub answer_feedback: SettingKind,
}

impl Default for SettingsSchema {
    fn default() -> Self {
        Self {
            timer: SettingKind::Slider {
                min: 5,
                max: 20,
                default: 15,
            },
            speed: SettingKind::Slider {
                min: 1,
                max: 10,
                default: 5,
            },
            aircraft_count: SettingKind::Range {
                min: 3,
                max: 50,
                default: (5, 20),
            },
            num_questions: SettingKind::Slider {
                min: 5,
                max: 100,
                default: 15,
            },
            num_choices: SettingKind::Slider {
                min: 2,
                max: 10,
                default: 5,
            },
            answer_feedback: SettingKind::Select {
                items: vec!["yes".to_string(), "no".to_string()],
                default: "no".to_string(),
            },
        }
    }
}

impl SettingsSchema {
    /// Parse a schema shaped like `{"timer": {"type": "slider", ...}, ...}`
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn kind(&self, id: SettingId) -> &SettingKind {
        match id {
            SettingId::Timer => &self.timer,
            SettingId::Speed => &self.speed,
            SettingId::AircraftCount => &self.aircraft_count,
            SettingId::NumQuestions => &self.num_questions,
            SettingId::NumChoices => &self.num_choices,
            SettingId::AnswerFeedback => &self.answer_feedback,
        }
    }

    /// Settings built from every option's default
    pub fn defaults(&self) -> Result<Settings, ConfigurationError> {
        let mut patch = SettingsPatch::default();
        for id in SettingId::ALL {
            let input = match self.kind(id) {
                SettingKind::Range { default, .. } => {
                    SettingInput::Range(default.0 as f64, default.1 as f64)
                }
                SettingKind::Slider { default, .. } => SettingInput::Slider(*default as f64),
                SettingKind::Select { default, .. } => SettingInput::Select(default.clone()),
            };
            patch = self.apply_input(patch, id, input)?;
        }
        let settings = Settings::default().merged(&patch);
        settings.validate()?;
        Ok(settings)
    }

    /// Convert editor output into a patch, flooring and clamping into bounds
    pub fn patch(&self, id: SettingId, input: SettingInput) -> Result<SettingsPatch, ConfigurationError> {
        self.apply_input(SettingsPatch::default(), id, input)
    }

    fn apply_input(
        &self,
        mut patch: SettingsPatch,
        id: SettingId,
        input: SettingInput,
    ) -> Result<SettingsPatch, ConfigurationError> {
        let value = match (self.kind(id), input) {
            (SettingKind::Slider { min, max, .. }, SettingInput::Slider(raw)) => {
                EditedValue::Number(floor_clamp(raw, *min, *max))
            }
            (SettingKind::Range { min, max, .. }, SettingInput::Range(lo, hi)) => {
                let lo = floor_clamp(lo, *min, *max);
                let hi = floor_clamp(hi, *min, *max);
                EditedValue::Pair(lo.min(hi), lo.max(hi))
            }
            (SettingKind::Select { items, .. }, SettingInput::Select(option)) => {
                if !items.iter().any(|item| *item == option) {
                    return Err(ConfigurationError::UnknownOption {
                        setting: id.key(),
                        option,
                    });
                }
                EditedValue::Choice(option)
            }
            (kind, _) => {
                return Err(ConfigurationError::KindMismatch {
                    setting: id.key(),
                    expected: kind.as_str(),
                });
            }
        };

        match (id, value) {
            (SettingId::Timer, EditedValue::Number(n)) => patch.timer_seconds = Some(n as f32),
            (SettingId::Speed, EditedValue::Number(n)) => patch.speed = Some(n as f32),
            (SettingId::NumQuestions, EditedValue::Number(n)) => {
                patch.num_questions = Some(n.max(0) as u32)
            }
            (SettingId::NumChoices, EditedValue::Number(n)) => {
                patch.num_choices = Some(n.max(0) as usize)
            }
            (SettingId::AircraftCount, EditedValue::Pair(lo, hi)) => {
                patch.aircraft_count_range = Some((lo, hi))
            }
            (SettingId::AnswerFeedback, EditedValue::Choice(option)) => {
                patch.answer_feedback = Some(option == "yes")
            }
            (id, _) => {
                return Err(ConfigurationError::KindMismatch {
                    setting: id.key(),
                    expected: self.kind(id).as_str(),
                });
            }
        }
        Ok(patch)
    }
}

impl SettingsProvider for SettingsSchema {
    fn default_settings(&self) -> Settings {
        match self.defaults() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Settings schema defaults rejected ({}), using built-in defaults", e);
                Settings::default()
            }
        }
    }
}

enum EditedValue {
    Number(i32),
    Pair(i32, i32),
    Choice(String),
}

/// Editors report fractional positions; options are whole numbers
fn floor_clamp(raw: f64, min: i32, max: i32) -> i32 {
    if raw.is_nan() {
        return min;
    }
    (raw.floor() as i32).clamp(min, max)
}
