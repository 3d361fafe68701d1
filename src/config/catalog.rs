//! Voice and language tables

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Voices offered by the speech endpoint
pub const VOICES: &[&str] = &[
    "alloy", "ash", "coral", "echo", "fable", "onyx", "nova", "sage", "shimmer",
];

/// Languages offered for narration
pub const LANGUAGES: &[&str] = &[
    "Afrikaans", "Arabic", "Armenian", "Azerbaijani", "Belarusian", "Bosnian",
    "Bulgarian", "Catalan", "Chinese", "Croatian", "Czech", "Danish", "Dutch",
    "English", "Estonian", "Finnish", "French", "Galician", "German", "Greek",
    "Hebrew", "Hindi", "Hungarian", "Icelandic", "Indonesian", "Italian",
    "Japanese", "Kannada", "Kazakh", "Korean", "Latvian", "Lithuanian",
    "Macedonian", "Malay", "Marathi", "Maori", "Nepali", "Norwegian", "Persian",
    "Polish", "Portuguese", "Romanian", "Russian", "Serbian", "Slovak",
    "Slovenian", "Spanish", "Swahili", "Swedish", "Tagalog", "Tamil", "Thai",
    "Turkish", "Ukrainian", "Urdu", "Vietnamese", "Welsh",
];

/// A voice name validated against a [`Catalog`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Voice(String);

impl Voice {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A language name validated against a [`Catalog`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language(String);

impl Language {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Available voices and languages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub voices: Vec<String>,
    pub languages: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Catalog built from the static tables
    pub fn builtin() -> Self {
        Self {
            voices: VOICES.iter().map(|v| v.to_string()).collect(),
            languages: LANGUAGES.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Look up a voice, ignoring case
    pub fn voice(&self, name: &str) -> Result<Voice> {
        find(&self.voices, name, "voice").map(Voice)
    }

    /// Look up a language, ignoring case
    pub fn language(&self, name: &str) -> Result<Language> {
        find(&self.languages, name, "language").map(Language)
    }

    pub fn validate(&self) -> Result<()> {
        if self.voices.is_empty() {
            return Err(Error::Config("catalog must list at least one voice".into()));
        }
        if self.languages.is_empty() {
            return Err(Error::Config(
                "catalog must list at least one language".into(),
            ));
        }
        Ok(())
    }
}

fn find(options: &[String], name: &str, what: &str) -> Result<String> {
    let name = name.trim();
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(name))
        .cloned()
        .ok_or_else(|| {
            Error::Config(format!(
                "unknown {} '{}' (available: {})",
                what,
                name,
                options.join(", ")
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.voices.len(), 9);
        assert_eq!(catalog.languages.len(), 57);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.voice("Nova").unwrap().as_str(), "nova");
        assert_eq!(catalog.language("french").unwrap().as_str(), "French");
    }

    #[test]
    fn test_unknown_voice_lists_choices() {
        let catalog = Catalog {
            voices: vec!["test-voice".into()],
            languages: vec!["English".into()],
        };
        let err = catalog.voice("alloy").unwrap_err();
        assert!(err.to_string().contains("available: test-voice"));
    }
}
