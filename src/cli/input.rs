// Text input parsing for the six training parameters

use anyhow::{bail, Context, Result};

use crate::config::Config;
use crate::errors::UserFriendlyError;

const DOT_HINT: &str = "Write a dot as two numbers separated by a space, e.g. \"1 5\"";

/// Raw, unparsed values as typed by the user
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub threshold: Option<String>,
    pub dot1: Option<String>,
    pub dot2: Option<String>,
    pub learning_rate: Option<String>,
    pub deadline: Option<String>,
    pub deadline_kind: Option<String>,
}

impl RawInputs {
    /// Parse every provided field into a config layer
    ///
    /// Both dots must be given together, since the trainer needs the pair.
    pub fn parse(&self) -> Result<Config> {
        let threshold = self
            .threshold
            .as_deref()
            .map(|text| parse_threshold(text).user_context("Invalid threshold"))
            .transpose()?;

        let dots = match (self.dot1.as_deref(), self.dot2.as_deref()) {
            (Some(first), Some(second)) => Some([
                parse_dot(first).user_context_with_suggestion("Invalid first dot", DOT_HINT)?,
                parse_dot(second).user_context_with_suggestion("Invalid second dot", DOT_HINT)?,
            ]),
            (None, None) => None,
            _ => bail!("Both dots must be given together"),
        };

        let learning_rate = self
            .learning_rate
            .as_deref()
            .map(|text| parse_real(text, "learning rate"))
            .transpose()?;
        let deadline = self
            .deadline
            .as_deref()
            .map(|text| parse_real(text, "deadline"))
            .transpose()?;

        Ok(Config {
            threshold,
            dots,
            learning_rate,
            deadline,
            deadline_kind: self.deadline_kind.as_ref().map(|kind| kind.trim().to_string()),
        })
    }
}

/// Threshold must be an integer
pub fn parse_threshold(text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .with_context(|| format!("Threshold must be an integer, got {:?}", text))
}

/// A dot is two reals separated by whitespace, e.g. "1 5"
pub fn parse_dot(text: &str) -> Result<[f64; 2]> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 2 {
        bail!(
            "Dot must have exactly two coordinates, got {} in {:?}",
            parts.len(),
            text
        );
    }

    Ok([
        parse_real(parts[0], "dot coordinate")?,
        parse_real(parts[1], "dot coordinate")?,
    ])
}

pub fn parse_real(text: &str, what: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid {}: {:?}", what, text))
}
