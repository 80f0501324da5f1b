use anyhow::{Result, anyhow};
use isolang::Language;
use std::fmt;
use std::str::FromStr;

use crate::errors::TranslationError;

/// Language utilities for the translation menu
///
/// The menu is a closed set of human-readable names. Each entry maps to a
/// backend code through a static table instead of a lower-case transform of
/// the display name, and the table is checked against ISO 639.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetLanguage {
    Hindi,
    French,
    Gujarati,
    Japanese,
}

/// Menu name and ISO 639-1 code for every supported language, in menu order
const LANGUAGE_TABLE: [(TargetLanguage, &str, &str); 4] = [
    (TargetLanguage::Hindi, "Hindi", "hi"),
    (TargetLanguage::French, "French", "fr"),
    (TargetLanguage::Gujarati, "Gujarati", "gu"),
    (TargetLanguage::Japanese, "Japanese", "ja"),
];

impl TargetLanguage {
    /// All languages in menu order
    pub fn all() -> [TargetLanguage; 4] {
        LANGUAGE_TABLE.map(|(language, _, _)| language)
    }

    /// Human-readable menu name
    pub fn menu_name(&self) -> &'static str {
        LANGUAGE_TABLE.iter()
            .find(|(language, _, _)| language == self)
            .map(|(_, name, _)| *name)
            .unwrap_or_default()
    }

    /// Lower-case ISO 639-1 code sent to translation backends
    pub fn code(&self) -> &'static str {
        LANGUAGE_TABLE.iter()
            .find(|(language, _, _)| language == self)
            .map(|(_, _, code)| *code)
            .unwrap_or_default()
    }

    /// Parse a menu name (case-insensitive) or an ISO 639-1 code from the table
    pub fn from_menu_name(name: &str) -> Result<Self, TranslationError> {
        let wanted = name.trim();
        LANGUAGE_TABLE.iter()
            .find(|(_, menu, code)| menu.eq_ignore_ascii_case(wanted) || code.eq_ignore_ascii_case(wanted))
            .map(|(language, _, _)| *language)
            .ok_or_else(|| TranslationError::UnsupportedLanguage(wanted.to_string()))
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.menu_name())
    }
}

impl FromStr for TargetLanguage {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_menu_name(s)
    }
}

/// Check that every menu entry maps to a real ISO 639-1 code whose English
/// name matches the menu name
pub fn validate_menu() -> Result<()> {
    for (_, name, code) in LANGUAGE_TABLE.iter() {
        let language = Language::from_639_1(code)
            .ok_or_else(|| anyhow!("Menu entry '{}' maps to unknown language code '{}'", name, code))?;

        if !language.to_name().eq_ignore_ascii_case(name) {
            return Err(anyhow!(
                "Menu entry '{}' maps to '{}' which is {}",
                name, code, language.to_name()
            ));
        }
    }

    Ok(())
}
