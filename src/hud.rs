//! HUD model: what the screen shows for a snapshot
//!
//! Pure function of a snapshot and a translator. The host turns this into
//! DOM/text; nothing here draws.

use serde::{Deserialize, Serialize};

use crate::intl::Translator;
use crate::quiz::{Phase, SessionSnapshot};
use crate::settings::SettingId;

/// Final score panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOverPanel {
    pub title: String,
    pub correct: u32,
    pub total: u32,
    /// e.g. "12 / 15"
    pub score_line: String,
    pub retry_label: String,
}

/// One labelled option in the settings panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingLabel {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    /// "Stage 3" while a question is up
    pub stage_label: Option<String>,
    /// Dots the viewport should animate (0 when hidden)
    pub dot_count: i32,
    pub dot_speed: f32,
    pub choices: Vec<i32>,
    pub timer_visible: bool,
    /// Width of the countdown bar, 1.0 full to 0.0 empty
    pub timer_remaining: f32,
    /// Background flash for the question that just ended
    pub flash: Option<bool>,
    pub game_over: Option<GameOverPanel>,
    pub settings_open: bool,
    pub settings_title: String,
    pub setting_labels: Vec<SettingLabel>,
}

impl Hud {
    pub fn build(snapshot: &SessionSnapshot, t: &dyn Translator) -> Self {
        let playing = snapshot.phase == Phase::Playing;
        let question_up = playing && snapshot.question_index >= 0;

        let game_over = (snapshot.phase == Phase::GameOver).then(|| GameOverPanel {
            title: t.t("game-over"),
            correct: snapshot.correct_count,
            total: snapshot.settings.num_questions,
            score_line: format!(
                "{} / {}",
                snapshot.correct_count, snapshot.settings.num_questions
            ),
            retry_label: t.t("retry"),
        });

        let setting_labels = if snapshot.settings_open {
            SettingId::ALL
                .iter()
                .map(|id| SettingLabel {
                    key: id.key().to_string(),
                    label: t.t(id.key()),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            stage_label: question_up
                .then(|| format!("{} {}", t.t("stage"), snapshot.question_index + 1)),
            dot_count: if question_up { snapshot.current_answer } else { 0 },
            dot_speed: snapshot.settings.speed,
            choices: if question_up && !snapshot.settings_open {
                snapshot.choices.clone()
            } else {
                Vec::new()
            },
            timer_visible: playing,
            timer_remaining: 1.0 - snapshot.timer_progress.clamp(0.0, 1.0),
            flash: snapshot.last_feedback.map(|f| f.correct),
            game_over,
            settings_open: snapshot.settings_open,
            settings_title: t.t("settings"),
            setting_labels,
        }
    }
}
