// Perceptron - two-input threshold unit trainer
// Main entry point

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

use perceptron::cli::{render_json, render_text, RawInputs};
use perceptron::config::load_config;
use perceptron::errors::{invalid_arguments_error, wrap_error_with_suggestion};
use perceptron::models::DeadlineKind;
use perceptron::training::{run_training, sample_request, TrainingRequest};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "perceptron")]
#[command(about = "Train a two-input threshold unit against two dots", version)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    /// Run mode (defaults to training with the given flags)
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    train: TrainArgs,
}

#[derive(clap::Args, Debug, Default)]
struct TrainArgs {
    /// Threshold P (integer)
    #[arg(long, allow_hyphen_values = true)]
    threshold: Option<String>,

    /// First dot, scored below the threshold ("x y")
    #[arg(long, allow_hyphen_values = true)]
    dot1: Option<String>,

    /// Second dot, scored above the threshold ("x y")
    #[arg(long, allow_hyphen_values = true)]
    dot2: Option<String>,

    /// Learning rate
    #[arg(long = "learning-rate", allow_hyphen_values = true)]
    learning_rate: Option<String>,

    /// Deadline in seconds or iterations
    #[arg(long, allow_hyphen_values = true)]
    deadline: Option<String>,

    /// Deadline kind: "time" or "iterations"
    #[arg(long = "deadline-kind")]
    deadline_kind: Option<String>,

    /// Config file (default: ~/.perceptron/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Train with the given flags and config file
    Train(TrainArgs),
    /// Train on a random configuration from the experiment pools
    Sample {
        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Deadline kind: "time" or "iterations"
        #[arg(long = "deadline-kind", default_value = "iterations")]
        deadline_kind: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_tracing();

    let result = match args.command {
        Some(Command::Train(train)) => run_train(train),
        Some(Command::Sample {
            seed,
            deadline_kind,
            json,
        }) => run_sample(seed, &deadline_kind, json),
        None => run_train(args.train),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Training run failed");
            eprintln!(
                "{}",
                wrap_error_with_suggestion(invalid_arguments_error(), &format!("{:#}", e))
            );
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    // Check if debug logging should be enabled
    let show_debug = std::env::var("PERCEPTRON_DEBUG")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);

    // Default: INFO level, can be overridden with RUST_LOG env var
    let env_filter = if show_debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    // Bridge log crate → tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
}

/// Train from config file plus command-line flags
fn run_train(args: TrainArgs) -> Result<()> {
    let file_config = load_config(args.config.as_deref())?;

    let raw = RawInputs {
        threshold: args.threshold,
        dot1: args.dot1,
        dot2: args.dot2,
        learning_rate: args.learning_rate,
        deadline: args.deadline,
        deadline_kind: args.deadline_kind,
    };
    let request = file_config.merge(raw.parse()?).into_request()?;

    train_and_print(&request, args.json)
}

/// Train on a sampled configuration
fn run_sample(seed: Option<u64>, deadline_kind: &str, json: bool) -> Result<()> {
    let kind: DeadlineKind = deadline_kind.parse()?;

    let request = match seed {
        Some(seed) => sample_request(&mut StdRng::seed_from_u64(seed), kind),
        None => sample_request(&mut rand::thread_rng(), kind),
    };

    train_and_print(&request, json)
}

fn train_and_print(request: &TrainingRequest, json: bool) -> Result<()> {
    let result = run_training(request)?;

    if json {
        println!("{}", render_json(&result)?);
    } else {
        println!("{}", render_text(&result));
    }

    Ok(())
}
