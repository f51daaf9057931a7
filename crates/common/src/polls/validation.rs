//! Search text validation
//!
//! Turns the raw `search_text` parameter into normalized text or a
//! [`ValidationError`]. Checks run in this order:
//!
//! 1. missing or blank → [`ValidationError::Empty`]
//! 2. longer than the configured maximum (characters, after trimming) →
//!    [`ValidationError::TooLong`]
//! 3. percent-decode, lower-case, trim
//! 4. any configured blocked word occurring as a substring →
//!    [`ValidationError::BlockedWord`]

use crate::config::PollsConfig;
use crate::errors::ValidationError;
use percent_encoding::percent_decode_str;
use validator::ValidateLength;

/// Validates raw search text against the configured limits
#[derive(Debug, Clone)]
pub struct SearchValidator {
    max_length: usize,
    blocked_words: Vec<String>,
}

impl SearchValidator {
    pub fn new(config: &PollsConfig) -> Self {
        Self {
            max_length: config.search_max_length,
            blocked_words: config
                .blocked_words
                .iter()
                .filter(|word| !word.trim().is_empty())
                .cloned()
                .collect(),
        }
    }

    /// Validate and normalize raw search text
    pub fn validate(&self, raw: Option<&str>) -> Result<String, ValidationError> {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }

        if !trimmed.validate_length(None, Some(self.max_length as u64), None) {
            return Err(ValidationError::TooLong {
                max: self.max_length,
                actual: trimmed.chars().count(),
            });
        }

        let normalized = normalize(trimmed);

        if let Some(word) = self
            .blocked_words
            .iter()
            .find(|word| normalized.contains(&word.to_lowercase()))
        {
            return Err(ValidationError::BlockedWord { word: word.clone() });
        }

        Ok(normalized)
    }
}

/// Percent-decode, lower-case and trim
pub fn normalize(text: &str) -> String {
    percent_decode_str(text)
        .decode_utf8_lossy()
        .to_lowercase()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(blocked: &[&str]) -> SearchValidator {
        SearchValidator::new(&PollsConfig {
            blocked_words: blocked.iter().map(|w| w.to_string()).collect(),
            ..PollsConfig::default()
        })
    }

    #[test]
    fn test_missing_and_blank_are_empty() {
        let v = validator(&[]);
        assert_eq!(v.validate(None), Err(ValidationError::Empty));
        assert_eq!(v.validate(Some("")), Err(ValidationError::Empty));
        assert_eq!(v.validate(Some("   \t")), Err(ValidationError::Empty));
    }

    #[test]
    fn test_length_counts_characters() {
        let v = validator(&[]);
        assert!(v.validate(Some("a".repeat(20).as_str())).is_ok());
        assert_eq!(
            v.validate(Some("a".repeat(21).as_str())),
            Err(ValidationError::TooLong { max: 20, actual: 21 })
        );
        // 20 multi-byte characters are still 20 characters
        assert!(v.validate(Some("é".repeat(20).as_str())).is_ok());
    }

    #[test]
    fn test_surrounding_whitespace_does_not_count() {
        let v = validator(&[]);
        let padded = format!("   {}   ", "b".repeat(20));
        assert_eq!(v.validate(Some(&padded)), Ok("b".repeat(20)));
    }

    #[test]
    fn test_normalizes_case_and_percent_encoding() {
        let v = validator(&[]);
        assert_eq!(v.validate(Some("  Test%20Question ")), Ok("test question".to_string()));
        assert_eq!(v.validate(Some("%41BC")), Ok("abc".to_string()));
    }

    #[test]
    fn test_blocked_word_is_case_insensitive_substring() {
        let v = validator(&["🫤", "Spam"]);
        assert_eq!(
            v.validate(Some("🫤")),
            Err(ValidationError::BlockedWord { word: "🫤".to_string() })
        );
        assert_eq!(
            v.validate(Some("no SPAMMERS")),
            Err(ValidationError::BlockedWord { word: "Spam".to_string() })
        );
    }

    #[test]
    fn test_blocked_word_survives_percent_encoding() {
        let v = validator(&["🫤"]);
        assert_eq!(
            v.validate(Some("%F0%9F%AB%A4")),
            Err(ValidationError::BlockedWord { word: "🫤".to_string() })
        );
    }

    #[test]
    fn test_blank_blocked_words_are_ignored() {
        let v = validator(&["", "  "]);
        assert_eq!(v.validate(Some("cats")), Ok("cats".to_string()));
    }

    #[test]
    fn test_blocked_word_message_names_the_word() {
        let err = validator(&["spam"]).validate(Some("spam")).unwrap_err();
        assert_eq!(err.to_string(), "'spam' has been identified as an unhelpful word.");
    }
}
