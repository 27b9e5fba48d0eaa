// Single training run - builds a trainer, trains it, and reports the result

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

use crate::models::{DeadlineKind, Perceptron, PerceptronStats, TrainingOutcome};

/// The six parameters of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRequest {
    pub threshold: i64,
    pub dots: [[f64; 2]; 2],
    pub learning_rate: f64,
    pub deadline: f64,
    /// Kept as text; the trainer decides whether it is valid
    pub deadline_kind: String,
}

impl TrainingRequest {
    pub fn new(
        threshold: i64,
        dots: [[f64; 2]; 2],
        learning_rate: f64,
        deadline: f64,
        deadline_kind: DeadlineKind,
    ) -> Self {
        Self {
            threshold,
            dots,
            learning_rate,
            deadline,
            deadline_kind: deadline_kind.as_str().to_string(),
        }
    }

    /// Build the trainer for this request
    pub fn build(&self) -> Result<Perceptron> {
        let perceptron = Perceptron::new(
            self.threshold,
            self.dots,
            self.learning_rate,
            self.deadline,
            &self.deadline_kind,
        )?;
        Ok(perceptron)
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Unique id of this run
    pub run_id: Uuid,
    /// When training started
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// How training stopped
    pub outcome: TrainingOutcome,
    /// Final trainer state
    pub stats: PerceptronStats,
    /// Training duration in seconds
    pub duration_secs: f64,
    /// Textual summary of the final trainer
    pub summary: String,
}

impl TrainingResult {
    pub fn iterations(&self) -> u64 {
        self.stats.iterations
    }
}

/// Construct a trainer from `request`, train it to completion, and report
pub fn run_training(request: &TrainingRequest) -> Result<TrainingResult> {
    let mut perceptron = request.build()?;

    let run_id = Uuid::new_v4();
    let started_at = chrono::Utc::now();

    tracing::info!(
        run_id = %run_id,
        threshold = request.threshold,
        learning_rate = request.learning_rate,
        deadline = request.deadline,
        deadline_kind = %request.deadline_kind,
        "Starting perceptron training"
    );

    let timer = Instant::now();
    let outcome = perceptron.train();
    let duration_secs = timer.elapsed().as_secs_f64();

    let stats = perceptron.stats();
    tracing::info!(
        run_id = %run_id,
        outcome = outcome.as_str(),
        iterations = stats.iterations,
        w1 = stats.w1,
        w2 = stats.w2,
        duration_secs,
        "Perceptron training finished"
    );

    Ok(TrainingResult {
        run_id,
        started_at,
        outcome,
        stats,
        duration_secs,
        summary: perceptron.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TrainerError;

    #[test]
    fn test_run_reports_final_state() {
        let request = TrainingRequest::new(
            4,
            [[1.0, 5.0], [3.0, 3.0]],
            0.1,
            5.0,
            DeadlineKind::Iterations,
        );

        let result = run_training(&request).unwrap();

        assert_eq!(result.outcome, TrainingOutcome::DeadlineExpired);
        assert_eq!(result.iterations(), 5);
        assert!(result.summary.contains("P=4"));
        assert!(result.duration_secs >= 0.0);
    }

    #[test]
    fn test_unknown_kind_surfaces_trainer_error() {
        let mut request = TrainingRequest::new(
            4,
            [[1.0, 5.0], [3.0, 3.0]],
            0.1,
            5.0,
            DeadlineKind::Time,
        );
        request.deadline_kind = "weeks".to_string();

        let err = run_training(&request).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TrainerError>(),
            Some(&TrainerError::InvalidConfiguration {
                value: "weeks".to_string()
            })
        );
    }
}
