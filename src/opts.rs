//! CLI options.

use clap::{Args, Parser};

use crate::regression::hyperparameters::Hyperparameters;

pub mod parsers;

#[derive(Parser)]
#[command(author, version, about)]
#[command(propagate_version = true)]
pub struct Opts {
    /// Sentry DSN
    #[arg(short, long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance monitoring sample rate for Sentry
    #[arg(
        long,
        default_value = "0",
        env = "SENTRY_TRACES_SAMPLE_RATE",
        value_parser = parsers::sample_rate,
    )]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand)]
pub enum Subcommand {
    Web(WebOpts),
    Train(TrainOpts),
    Predict(PredictOpts),
}

/// Runs the HTTP API
#[derive(Args)]
pub struct WebOpts {
    /// Web application bind host
    #[arg(long, default_value = "::", env = "SLOPE_HOST")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value = "3001", env = "SLOPE_PORT")]
    pub port: u16,
}

/// Trains a model and prints its parameters and metrics as JSON
#[derive(Args)]
pub struct TrainOpts {
    /// Comma-separated X values
    #[arg(
        short,
        long = "x-values",
        value_delimiter = ',',
        allow_hyphen_values = true,
        required = true
    )]
    pub x_values: Vec<f64>,

    /// Comma-separated Y values
    #[arg(
        short,
        long = "y-values",
        value_delimiter = ',',
        allow_hyphen_values = true,
        required = true
    )]
    pub y_values: Vec<f64>,

    /// Gradient descent step size
    #[arg(
        long,
        default_value_t = Hyperparameters::DEFAULT_LEARNING_RATE,
        value_parser = parsers::positive_f64,
    )]
    pub learning_rate: f64,

    /// Number of update steps
    #[arg(
        long,
        default_value_t = Hyperparameters::DEFAULT_MAX_ITERATIONS,
        value_parser = parsers::non_zero_usize,
    )]
    pub max_iterations: usize,

    /// Number of points per update step
    #[arg(
        long,
        default_value_t = Hyperparameters::DEFAULT_BATCH_SIZE,
        value_parser = parsers::non_zero_usize,
    )]
    pub batch_size: usize,

    /// Stop after this many steps without an improvement of the loss
    #[arg(long, value_parser = parsers::non_zero_usize)]
    pub patience: Option<usize>,

    /// Minimal loss decrease which counts as an improvement
    #[arg(long, value_parser = parsers::non_negative_f64)]
    pub tolerance: Option<f64>,
}

/// Predicts Y for the given X with the given model parameters
#[derive(Args)]
#[command(allow_negative_numbers = true)]
pub struct PredictOpts {
    #[arg(long, allow_hyphen_values = true)]
    pub slope: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub intercept: f64,

    pub x_value: f64,
}
