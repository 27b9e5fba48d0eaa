// Two-input threshold unit trained online against two fixed dots
// Alternates between the dots, nudging the weights on every misclassification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use super::deadline::{Deadline, DeadlineKind};
use crate::errors::TrainerError;

/// Which side of the threshold a dot is tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Below, // First dot
    Above, // Second dot
}

/// One training dot with its threshold relation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingPoint {
    pub x: f64,
    pub y: f64,
    pub relation: Relation,
}

impl TrainingPoint {
    pub fn new(coords: [f64; 2], relation: Relation) -> Self {
        Self {
            x: coords[0],
            y: coords[1],
            relation,
        }
    }
}

impl fmt::Display for TrainingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The two learnable weights
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub w1: f64,
    pub w2: f64,
}

impl WeightVector {
    fn score(&self, point: &TrainingPoint) -> f64 {
        self.w1 * point.x + self.w2 * point.y
    }
}

/// Result of evaluating a single dot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Index of the dot that was evaluated
    pub point_index: usize,
    /// Score before any correction
    pub score: f64,
    /// Whether the weights were corrected
    pub misclassified: bool,
}

/// Terminal state of a `train()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingOutcome {
    /// Two consecutive dots were classified without a correction
    Converged,
    /// The time or iteration budget ran out first
    DeadlineExpired,
}

impl TrainingOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingOutcome::Converged => "converged",
            TrainingOutcome::DeadlineExpired => "deadline_expired",
        }
    }
}

/// Two-input perceptron trainer
///
/// A trainer is built for one run and is not meant to be reused: calling
/// [`Perceptron::train`] again continues from the current weights, pointer
/// and iteration count.
#[derive(Debug, Clone)]
pub struct Perceptron {
    weights: WeightVector,
    threshold: i64,
    points: [TrainingPoint; 2],
    learning_rate: f64,
    deadline: Deadline,

    /// Index of the dot evaluated by the next step
    next_point: usize,
    /// Steps taken over the trainer's lifetime
    iteration: u64,
}

impl Perceptron {
    /// Create a trainer from the six run parameters
    ///
    /// Only the deadline kind is validated. The first dot is tagged
    /// [`Relation::Below`], the second [`Relation::Above`].
    pub fn new(
        threshold: i64,
        dots: [[f64; 2]; 2],
        learning_rate: f64,
        deadline: f64,
        deadline_kind: &str,
    ) -> Result<Self, TrainerError> {
        let kind: DeadlineKind = deadline_kind.parse()?;
        Ok(Self::with_deadline(
            threshold,
            dots,
            learning_rate,
            Deadline::new(deadline, kind),
        ))
    }

    /// Create a trainer with an already-typed deadline
    pub fn with_deadline(
        threshold: i64,
        dots: [[f64; 2]; 2],
        learning_rate: f64,
        deadline: Deadline,
    ) -> Self {
        Self {
            weights: WeightVector::default(),
            threshold,
            points: [
                TrainingPoint::new(dots[0], Relation::Below),
                TrainingPoint::new(dots[1], Relation::Above),
            ],
            learning_rate,
            deadline,
            next_point: 0,
            iteration: 0,
        }
    }

    /// Evaluate the dot under the pointer, correcting the weights if needed
    pub fn step(&mut self) -> StepOutcome {
        let point_index = self.next_point;
        let point = self.points[point_index];
        let threshold = self.threshold as f64;
        let score = self.weights.score(&point);

        // Corrections fire when the score is on the tagged side of the threshold
        let diff = match point.relation {
            Relation::Below if score < threshold => Some(threshold - score),
            Relation::Above if score > threshold => Some(score - threshold),
            _ => None,
        };

        if let Some(diff) = diff {
            self.weights.w1 += diff * point.x * self.learning_rate;
            self.weights.w2 += diff * point.y * self.learning_rate;
        }

        self.next_point = (point_index + 1) % self.points.len();
        self.iteration += 1;

        tracing::trace!(
            iteration = self.iteration,
            point = point_index,
            score,
            misclassified = diff.is_some(),
            w1 = self.weights.w1,
            w2 = self.weights.w2,
            "Perceptron step"
        );

        StepOutcome {
            point_index,
            score,
            misclassified: diff.is_some(),
        }
    }

    /// Step until two consecutive dots pass or the deadline expires
    pub fn train(&mut self) -> TrainingOutcome {
        let start = Instant::now();
        let mut steps: u64 = 0;
        // No previous step yet, so the first step can never converge on its own
        let mut previous_correct = false;

        let outcome = loop {
            if self.deadline.steps_exhausted(steps) {
                break TrainingOutcome::DeadlineExpired;
            }

            let correct = !self.step().misclassified;
            steps += 1;

            if correct && previous_correct {
                break TrainingOutcome::Converged;
            }
            previous_correct = correct;

            if self.deadline.time_exhausted(start.elapsed()) {
                break TrainingOutcome::DeadlineExpired;
            }
        };

        tracing::debug!(
            outcome = outcome.as_str(),
            steps,
            iteration = self.iteration,
            w1 = self.weights.w1,
            w2 = self.weights.w2,
            "Training stopped"
        );

        outcome
    }

    pub fn weights(&self) -> WeightVector {
        self.weights
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    pub fn points(&self) -> &[TrainingPoint; 2] {
        &self.points
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    /// Index of the dot the next step will evaluate
    pub fn next_point(&self) -> usize {
        self.next_point
    }

    /// Get statistics
    pub fn stats(&self) -> PerceptronStats {
        PerceptronStats {
            w1: self.weights.w1,
            w2: self.weights.w2,
            threshold: self.threshold,
            dots: [
                [self.points[0].x, self.points[0].y],
                [self.points[1].x, self.points[1].y],
            ],
            learning_rate: self.learning_rate,
            deadline_kind: self.deadline.kind(),
            deadline: self.deadline.magnitude(),
            iterations: self.iteration,
        }
    }
}

impl fmt::Display for Perceptron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Perceptron(w1={}, w2={}, P={}, dots=[{}, {}], delta={},\n           deadline=({}, {}))",
            self.weights.w1,
            self.weights.w2,
            self.threshold,
            self.points[0],
            self.points[1],
            self.learning_rate,
            self.deadline.kind(),
            self.deadline.magnitude()
        )
    }
}

/// Statistics snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptronStats {
    pub w1: f64,
    pub w2: f64,
    pub threshold: i64,
    pub dots: [[f64; 2]; 2],
    pub learning_rate: f64,
    pub deadline_kind: DeadlineKind,
    pub deadline: f64,
    pub iterations: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    // First dot always passes once the weights grow, second never does
    const DIVERGING: [[f64; 2]; 2] = [[1.0, 5.0], [3.0, 3.0]];

    #[test]
    fn test_first_step_corrects_below_dot() {
        let mut perceptron = Perceptron::new(4, DIVERGING, 0.1, 10.0, "iterations").unwrap();

        let outcome = perceptron.step();

        assert_eq!(outcome.point_index, 0);
        assert_eq!(outcome.score, 0.0);
        assert!(outcome.misclassified);
        assert!((perceptron.weights().w1 - 0.4).abs() < EPS);
        assert!((perceptron.weights().w2 - 2.0).abs() < EPS);
        assert_eq!(perceptron.next_point(), 1);
        assert_eq!(perceptron.iteration(), 1);
    }

    #[test]
    fn test_second_step_corrects_above_dot() {
        let mut perceptron = Perceptron::new(4, DIVERGING, 0.1, 10.0, "iterations").unwrap();
        perceptron.step();

        // y = 0.4*3 + 2.0*3 = 7.2 > 4, diff = 3.2
        let outcome = perceptron.step();

        assert_eq!(outcome.point_index, 1);
        assert!((outcome.score - 7.2).abs() < EPS);
        assert!(outcome.misclassified);
        assert!((perceptron.weights().w1 - 1.36).abs() < EPS);
        assert!((perceptron.weights().w2 - 2.96).abs() < EPS);
        assert_eq!(perceptron.next_point(), 0);
    }

    #[test]
    fn test_correct_step_leaves_weights() {
        let mut perceptron = Perceptron::new(4, DIVERGING, 0.1, 10.0, "iterations").unwrap();
        perceptron.step();
        perceptron.step();
        let before = perceptron.weights();

        // First dot now scores 16.16 >= 4
        let outcome = perceptron.step();

        assert!(!outcome.misclassified);
        assert_eq!(perceptron.weights(), before);
        assert_eq!(perceptron.iteration(), 3);
    }

    #[test]
    fn test_pointer_alternates_every_step() {
        let mut perceptron = Perceptron::new(0, DIVERGING, 0.1, 10.0, "time").unwrap();
        let visited: Vec<usize> = (0..6).map(|_| perceptron.step().point_index).collect();
        assert_eq!(visited, vec![0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_already_separated_converges_in_two_steps() {
        let mut perceptron = Perceptron::new(0, DIVERGING, 0.1, 100.0, "iterations").unwrap();

        assert_eq!(perceptron.train(), TrainingOutcome::Converged);
        assert_eq!(perceptron.iteration(), 2);
        assert_eq!(perceptron.weights(), WeightVector::default());
    }

    #[test]
    fn test_converges_after_correction() {
        let mut perceptron =
            Perceptron::new(4, [[1.0, 0.0], [0.0, 1.0]], 1.0, 100.0, "iterations").unwrap();

        assert_eq!(perceptron.train(), TrainingOutcome::Converged);
        assert_eq!(perceptron.iteration(), 3);
        assert_eq!(perceptron.weights(), WeightVector { w1: 4.0, w2: 0.0 });
    }

    #[test]
    fn test_iteration_budget_is_exact() {
        let mut perceptron = Perceptron::new(4, DIVERGING, 0.1, 5.0, "iterations").unwrap();

        assert_eq!(perceptron.train(), TrainingOutcome::DeadlineExpired);
        assert_eq!(perceptron.iteration(), 5);
    }

    #[test]
    fn test_zero_time_budget_takes_one_step() {
        let mut perceptron = Perceptron::new(4, DIVERGING, 0.1, 0.0, "time").unwrap();

        assert_eq!(perceptron.train(), TrainingOutcome::DeadlineExpired);
        assert_eq!(perceptron.iteration(), 1);
    }

    #[test]
    fn test_zero_iteration_budget_takes_no_steps() {
        let mut perceptron = Perceptron::new(4, DIVERGING, 0.1, 0.0, "iterations").unwrap();

        assert_eq!(perceptron.train(), TrainingOutcome::DeadlineExpired);
        assert_eq!(perceptron.iteration(), 0);
        assert_eq!(perceptron.weights(), WeightVector::default());
    }

    #[test]
    fn test_short_time_budget_terminates() {
        let mut perceptron = Perceptron::with_deadline(
            4,
            DIVERGING,
            0.1,
            Deadline::Time(0.02),
        );

        assert_eq!(perceptron.train(), TrainingOutcome::DeadlineExpired);
        assert!(perceptron.iteration() >= 1);
    }

    #[test]
    fn test_huge_time_budget_does_not_cut_run_short() {
        for deadline in [1e20, f64::INFINITY] {
            let mut perceptron = Perceptron::new(0, DIVERGING, 0.1, deadline, "time").unwrap();

            assert_eq!(perceptron.train(), TrainingOutcome::Converged);
            assert_eq!(perceptron.iteration(), 2);
            assert_eq!(perceptron.deadline().magnitude(), deadline);
        }
    }

    #[test]
    fn test_bogus_kind_rejected() {
        let err = Perceptron::new(4, DIVERGING, 0.1, 1.0, "bogus").unwrap_err();
        assert_eq!(
            err,
            TrainerError::InvalidConfiguration {
                value: "bogus".to_string()
            }
        );
    }

    #[test]
    fn test_display_summary() {
        let mut perceptron = Perceptron::new(4, DIVERGING, 0.1, 5.0, "iterations").unwrap();
        perceptron.step();

        let summary = perceptron.to_string();
        assert!(summary.starts_with("Perceptron(w1=0.4, w2=2, P=4"));
        assert!(summary.contains("dots=[(1, 5), (3, 3)]"));
        assert!(summary.contains("delta=0.1"));
        assert!(summary.contains("deadline=(iterations, 5)"));
    }

    #[test]
    fn test_stats_snapshot() {
        let perceptron = Perceptron::new(4, DIVERGING, 0.1, 2.0, "time").unwrap();
        let stats = perceptron.stats();

        assert_eq!(stats.threshold, 4);
        assert_eq!(stats.dots, DIVERGING);
        assert_eq!(stats.deadline_kind, DeadlineKind::Time);
        assert_eq!(stats.deadline, 2.0);
        assert_eq!(stats.iterations, 0);
    }
}
