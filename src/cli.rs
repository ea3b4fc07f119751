//! One-shot `train` and `predict` commands which print JSON to the standard output.

use serde::Serialize;

use crate::helpers::tracing::format_elapsed;
use crate::opts::{PredictOpts, TrainOpts};
use crate::prelude::*;
use crate::regression::dataset::Dataset;
use crate::regression::hyperparameters::{EarlyStopping, Hyperparameters};
use crate::regression::model::Model;
use crate::regression::responses::{PredictResponse, TrainResponse};
use crate::regression::{fit, Fit};

#[instrument(skip_all, fields(n_points = opts.x_values.len()))]
pub fn train(opts: &TrainOpts) -> Result {
    let start_instant = Instant::now();
    let dataset = Dataset::new(&opts.x_values, &opts.y_values)?;
    let fit: Fit = fit(&dataset, &hyperparameters(opts)).context("failed to train the model")?;
    info!(
        slope = fit.model.slope,
        intercept = fit.model.intercept,
        mse = fit.metrics.mse,
        elapsed = format_elapsed(start_instant).as_str(),
        "trained",
    );
    print_json(&TrainResponse::from(&fit))
}

pub fn predict(opts: &PredictOpts) -> Result {
    let prediction = Model::trained(opts.slope, opts.intercept).predict(opts.x_value)?;
    print_json(&PredictResponse { prediction })
}

fn hyperparameters(opts: &TrainOpts) -> Hyperparameters {
    let early_stopping = match (opts.patience, opts.tolerance) {
        (None, None) => None,
        (patience, tolerance) => {
            let defaults = EarlyStopping::default();
            Some(EarlyStopping {
                patience: patience.unwrap_or(defaults.patience),
                tolerance: tolerance.unwrap_or(defaults.tolerance),
            })
        }
    };
    Hyperparameters {
        learning_rate: opts.learning_rate,
        max_iterations: opts.max_iterations,
        batch_size: opts.batch_size,
        early_stopping,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
