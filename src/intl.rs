//! Translation lookup
//!
//! The engine never formats user-facing text itself; it asks a `Translator`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Key to display string lookup. Must be pure.
pub trait Translator {
    fn t(&self, key: &str) -> String;
}

/// Flat string table for one locale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Translations {
    pub locale: String,
    pub entries: HashMap<String, String>,
}

impl Translations {
    /// Parse a locale file shaped like `{"game-over": "Game Over", ...}`
    pub fn from_json(locale: &str, json: &str) -> Result<Self, ConfigurationError> {
        let entries: HashMap<String, String> = serde_json::from_str(json)?;
        log::info!("Loaded {} translations for {}", entries.len(), locale);
        Ok(Self {
            locale: locale.to_string(),
            entries,
        })
    }

    /// Built-in English table
    pub fn english() -> Self {
        let entries = [
            ("game-over", "Game Over"),
            ("retry", "Retry"),
            ("stage", "Stage"),
            ("settings", "Settings"),
            ("timer", "Timer (seconds)"),
            ("speed", "Speed"),
            ("aircraft-count", "Aircraft count"),
            ("num-questions", "Number of questions"),
            ("num-choices", "Number of choices"),
            ("answer-feedback", "Answer feedback"),
            ("yes", "Yes"),
            ("no", "No"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            locale: "en".to_string(),
            entries,
        }
    }
}

impl Translator for Translations {
    /// Missing keys fall back to the key itself
    fn t(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(text) => text.clone(),
            None => {
                log::debug!("Missing {} translation for {:?}", self.locale, key);
                key.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_lookup() {
        let t = Translations::english();
        assert_eq!(t.t("game-over"), "Game Over");
        assert_eq!(t.t("stage"), "Stage");
    }

    #[test]
    fn test_missing_key_falls_back() {
        let t = Translations::english();
        assert_eq!(t.t("no-such-key"), "no-such-key");
    }

    #[test]
    fn test_from_json() {
        let t = Translations::from_json("fr", r#"{"retry": "Réessayer"}"#).unwrap();
        assert_eq!(t.locale, "fr");
        assert_eq!(t.t("retry"), "Réessayer");
        assert_eq!(t.t("stage"), "stage");

        assert!(Translations::from_json("fr", "[1, 2]").is_err());
    }
}
