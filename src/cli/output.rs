// Result rendering for the terminal

use anyhow::Result;

use crate::training::TrainingResult;

/// Summary followed by the iteration count
pub fn render_text(result: &TrainingResult) -> String {
    format!(
        "{}\n\n# of iterations: {} ({})",
        result.summary,
        result.iterations(),
        result.outcome.as_str()
    )
}

pub fn render_json(result: &TrainingResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
