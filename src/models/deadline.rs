// Training deadlines - wall-clock duration or step budget

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::TrainerError;

/// Which budget a deadline value is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineKind {
    Time,       // Seconds of wall-clock time
    Iterations, // Number of steps
}

impl DeadlineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeadlineKind::Time => "time",
            DeadlineKind::Iterations => "iterations",
        }
    }
}

impl FromStr for DeadlineKind {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(DeadlineKind::Time),
            "iterations" => Ok(DeadlineKind::Iterations),
            other => Err(TrainerError::InvalidConfiguration {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DeadlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a training run stops if it has not converged
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deadline {
    /// Stop once elapsed wall-clock time in a `train()` call reaches this
    /// many seconds. Infinite or huge budgets never expire.
    Time(f64),
    /// Stop once the steps taken in a `train()` call reach this budget.
    /// Kept as a real so fractional budgets round up like the step loop does.
    Iterations(f64),
}

impl Deadline {
    /// Build a deadline from its magnitude and kind
    ///
    /// Negative or NaN durations collapse to zero; the trainer still takes
    /// one step before looking at the clock.
    pub fn new(value: f64, kind: DeadlineKind) -> Self {
        match kind {
            // NaN compares false
            DeadlineKind::Time => Deadline::Time(if value > 0.0 { value } else { 0.0 }),
            DeadlineKind::Iterations => Deadline::Iterations(value),
        }
    }

    pub fn kind(&self) -> DeadlineKind {
        match self {
            Deadline::Time(_) => DeadlineKind::Time,
            Deadline::Iterations(_) => DeadlineKind::Iterations,
        }
    }

    /// Deadline magnitude in its own unit (seconds or steps)
    pub fn magnitude(&self) -> f64 {
        match self {
            Deadline::Time(secs) => *secs,
            Deadline::Iterations(budget) => *budget,
        }
    }

    /// Whether `steps` taken in the current call exhaust an iteration budget
    pub(crate) fn steps_exhausted(&self, steps: u64) -> bool {
        match self {
            // NaN budgets compare false, so they allow no steps
            Deadline::Iterations(budget) => !((steps as f64) < *budget),
            Deadline::Time(_) => false,
        }
    }

    /// Whether `elapsed` wall-clock time reaches a time budget
    pub(crate) fn time_exhausted(&self, elapsed: Duration) -> bool {
        match self {
            Deadline::Time(secs) => elapsed.as_secs_f64() >= *secs,
            Deadline::Iterations(_) => false,
        }
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deadline::Time(secs) => write!(f, "time, {}s", secs),
            Deadline::Iterations(budget) => write!(f, "iterations, {}", budget),
        }
    }
}
