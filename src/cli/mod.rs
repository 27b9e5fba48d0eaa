// CLI module - collects training parameters and renders results

pub mod input;
pub mod output;

pub use input::{parse_dot, parse_threshold, RawInputs};
pub use output::{render_json, render_text};
