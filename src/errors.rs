// Trainer errors and user-friendly error messages
//
// `TrainerError` is the only error the training core raises. The helpers
// below turn any front-end failure into an actionable notice.
//
// Localization Support:
// Labels follow the LANG environment variable. English is the default.

use anyhow::{Context, Result};
use std::fmt;
use thiserror::Error;

/// Errors raised while constructing a trainer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainerError {
    /// Deadline kind was neither "time" nor "iterations"
    #[error("Deadline kind should be \"time\" or \"iterations\", not \"{value}\"")]
    InvalidConfiguration { value: String },
}

/// Get the current locale from environment
fn get_locale() -> &'static str {
    if let Ok(lang) = std::env::var("LANG") {
        if lang.starts_with("es") {
            return "es";
        } else if lang.starts_with("fr") {
            return "fr";
        } else if lang.starts_with("de") {
            return "de";
        }
    }
    "en"
}

/// Localized text helper
fn t(key: &str) -> String {
    let locale = get_locale();

    let text = match (locale, key) {
        ("en", "try") => "Try:",
        ("en", "suggestion") => "Suggestion",
        ("en", "invalid_arguments") => "Wrong arguments were given. Check all of them.",

        ("es", "try") => "Intenta:",
        ("es", "suggestion") => "Sugerencia",
        ("es", "invalid_arguments") => "Se dieron argumentos incorrectos. Revísalos todos.",

        ("fr", "try") => "Essayez:",
        ("fr", "suggestion") => "Suggestion",
        ("fr", "invalid_arguments") => "Arguments invalides. Vérifiez-les tous.",

        ("de", "try") => "Versuchen Sie:",
        ("de", "suggestion") => "Vorschlag",
        ("de", "invalid_arguments") => "Ungültige Argumente. Bitte alle prüfen.",

        _ => match key {
            "try" => "Try:",
            "suggestion" => "Suggestion",
            "invalid_arguments" => "Wrong arguments were given. Check all of them.",
            _ => key,
        },
    };

    text.to_string()
}

/// Wrap an error with user-friendly context
pub trait UserFriendlyError {
    /// Add user-friendly context to this error
    fn user_context(self, message: &str) -> Self;

    /// Add user-friendly context with a suggestion
    fn user_context_with_suggestion(self, problem: &str, suggestion: &str) -> Self;
}

impl<T> UserFriendlyError for Result<T> {
    fn user_context(self, message: &str) -> Self {
        self.with_context(|| message.to_string())
    }

    fn user_context_with_suggestion(self, problem: &str, suggestion: &str) -> Self {
        self.with_context(|| {
            format!(
                "{}\n\n\x1b[1;33m{}:\x1b[0m {}",
                problem,
                t("suggestion"),
                suggestion
            )
        })
    }
}

/// Generic notice shown when any of the six training inputs is unusable
pub fn invalid_arguments_error() -> String {
    format!(
        "{}\n\n\
        \x1b[1;32m{}\x1b[0m\n\
        1. Threshold is an integer:\n\
           \x1b[36m--threshold 4\x1b[0m\n\n\
        2. Dots are two numbers separated by a space:\n\
           \x1b[36m--dot1 \"1 5\" --dot2 \"3 3\"\x1b[0m\n\n\
        3. Deadline kind is \"time\" (seconds) or \"iterations\":\n\
           \x1b[36m--deadline 100 --deadline-kind iterations\x1b[0m",
        t("invalid_arguments"),
        t("try")
    )
}

/// Format a config parse error with helpful suggestions
pub fn config_parse_error(error: &str) -> String {
    format!(
        "Failed to parse config file\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;32m{}\x1b[0m\n\
        1. Check config file syntax:\n\
           \x1b[36mcat ~/.perceptron/config.toml\x1b[0m\n\n\
        2. Common mistakes:\n\
           • Missing quotes around deadline_kind\n\
           • Dots not written as [[x, y], [x, y]]\n\
           • Threshold written as a decimal",
        error,
        t("try")
    )
}

/// Wrap a generic error with suggestions
pub fn wrap_error_with_suggestion(error: impl fmt::Display, suggestion: &str) -> String {
    format!(
        "{}\n\n\
        \x1b[1;33m{}:\x1b[0m {}",
        error,
        t("suggestion"),
        suggestion
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_names_value() {
        let err = TrainerError::InvalidConfiguration {
            value: "bogus".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"bogus\""));
        assert!(msg.contains("iterations"));
    }

    #[test]
    fn test_invalid_arguments_has_flag_examples() {
        let msg = invalid_arguments_error();
        assert!(msg.contains("--threshold"));
        assert!(msg.contains("--deadline-kind"));
    }

    #[test]
    fn test_user_context_with_suggestion_keeps_source() {
        let result: Result<()> = Err(anyhow::anyhow!("bad dot"));
        let err = result
            .user_context_with_suggestion("Could not read dot", "Use \"x y\"")
            .unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("Could not read dot"));
        assert!(chain.contains("bad dot"));
    }
}
