// Configuration structs

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::training::TrainingRequest;

/// Training parameters gathered from the config file and command line
///
/// Every field is optional so a file can hold defaults that flags complete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Threshold P
    pub threshold: Option<i64>,

    /// First dot (scored below P) and second dot (scored above P)
    pub dots: Option<[[f64; 2]; 2]>,

    /// Learning rate δ
    pub learning_rate: Option<f64>,

    /// Seconds or steps, depending on `deadline_kind`
    pub deadline: Option<f64>,

    /// "time" or "iterations"
    pub deadline_kind: Option<String>,
}

impl Config {
    /// Layer `overrides` on top of this config; set fields in `overrides` win
    pub fn merge(self, overrides: Config) -> Config {
        Config {
            threshold: overrides.threshold.or(self.threshold),
            dots: overrides.dots.or(self.dots),
            learning_rate: overrides.learning_rate.or(self.learning_rate),
            deadline: overrides.deadline.or(self.deadline),
            deadline_kind: overrides.deadline_kind.or(self.deadline_kind),
        }
    }

    /// Names of the fields that are still unset
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.threshold.is_none() {
            missing.push("threshold");
        }
        if self.dots.is_none() {
            missing.push("dots");
        }
        if self.learning_rate.is_none() {
            missing.push("learning_rate");
        }
        if self.deadline.is_none() {
            missing.push("deadline");
        }
        if self.deadline_kind.is_none() {
            missing.push("deadline_kind");
        }
        missing
    }

    /// Turn a complete config into a training request
    pub fn into_request(self) -> Result<TrainingRequest> {
        match self {
            Config {
                threshold: Some(threshold),
                dots: Some(dots),
                learning_rate: Some(learning_rate),
                deadline: Some(deadline),
                deadline_kind: Some(deadline_kind),
            } => Ok(TrainingRequest {
                threshold,
                dots,
                learning_rate,
                deadline,
                deadline_kind,
            }),
            incomplete => bail!(
                "Missing training parameters: {}",
                incomplete.missing_fields().join(", ")
            ),
        }
    }
}
