// Random run configurations drawn from fixed experiment pools

use rand::seq::index;
use rand::Rng;

use super::run::TrainingRequest;
use crate::models::DeadlineKind;

/// Threshold used by every sampled run
pub const SAMPLE_THRESHOLD: i64 = 4;

/// Candidate dots; two distinct ones are drawn per run
pub const DOT_POOL: [[f64; 2]; 4] = [[0.0, 6.0], [1.0, 5.0], [3.0, 3.0], [2.0, 4.0]];

pub const LEARNING_RATE_POOL: [f64; 6] = [0.001, 0.01, 0.05, 0.1, 0.2, 0.3];

/// Seconds
pub const TIME_DEADLINE_POOL: [f64; 4] = [0.5, 1.0, 2.0, 5.0];

pub const ITERATION_DEADLINE_POOL: [f64; 4] = [100.0, 200.0, 500.0, 1000.0];

/// Draw a training request with a deadline of the given kind
pub fn sample_request<R: Rng + ?Sized>(rng: &mut R, kind: DeadlineKind) -> TrainingRequest {
    let picked = index::sample(rng, DOT_POOL.len(), 2);
    let dots = [DOT_POOL[picked.index(0)], DOT_POOL[picked.index(1)]];

    let learning_rate = LEARNING_RATE_POOL[rng.gen_range(0..LEARNING_RATE_POOL.len())];

    let deadline_pool: &[f64] = match kind {
        DeadlineKind::Time => &TIME_DEADLINE_POOL,
        DeadlineKind::Iterations => &ITERATION_DEADLINE_POOL,
    };
    let deadline = deadline_pool[rng.gen_range(0..deadline_pool.len())];

    tracing::debug!(
        ?dots,
        learning_rate,
        deadline,
        deadline_kind = kind.as_str(),
        "Sampled training configuration"
    );

    TrainingRequest::new(SAMPLE_THRESHOLD, dots, learning_rate, deadline, kind)
}
