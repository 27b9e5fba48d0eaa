// Training module - single runs and sampled configurations

pub mod run;
pub mod sampler;

pub use run::{run_training, TrainingRequest, TrainingResult};
pub use sampler::sample_request;
