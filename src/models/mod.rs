// Threshold unit model and its stopping rules

pub mod deadline;
pub mod perceptron;

pub use deadline::{Deadline, DeadlineKind};
pub use perceptron::{
    Perceptron, PerceptronStats, Relation, StepOutcome, TrainingOutcome, TrainingPoint,
    WeightVector,
};
