//! Fits the straight line `y = slope * x + intercept` with mini-batch gradient descent
//! on the mean squared error.
//!
//! Everything is deterministic: the parameters start from zero and the batches are
//! consecutive chunks of the dataset, visited in order and repeated.

use crate::prelude::*;
use crate::regression::dataset::{Dataset, Point};
use crate::regression::error::{Error, Result};
use crate::regression::hyperparameters::{EarlyStopper, Hyperparameters};
use crate::regression::metrics::{mean_squared_error, Evaluation, Metrics};
use crate::regression::model::Model;

pub mod dataset;
pub mod error;
pub mod hyperparameters;
pub mod metrics;
pub mod model;
pub mod requests;
pub mod responses;

/// Trained model along with its statistics on the training set.
#[derive(Debug, Copy, Clone)]
pub struct Fit {
    pub model: Model,
    pub metrics: Metrics,
}

#[instrument(
    level = "debug",
    skip_all,
    fields(
        n_points = dataset.len(),
        learning_rate = hyperparameters.learning_rate,
        max_iterations = hyperparameters.max_iterations,
        batch_size = hyperparameters.batch_size,
    ),
)]
pub fn fit(dataset: &Dataset, hyperparameters: &Hyperparameters) -> Result<Fit> {
    hyperparameters.validate()?;
    let start_instant = Instant::now();

    let mut slope = 0.0;
    let mut intercept = 0.0;
    let mut early_stopper = hyperparameters.early_stopping.map(EarlyStopper::from);
    let mut n_iterations = 0;

    for batch in dataset
        .batches(hyperparameters.batch_size)
        .take(hyperparameters.max_iterations)
    {
        let (slope_gradient, intercept_gradient) = gradient(slope, intercept, batch);
        slope -= hyperparameters.learning_rate * slope_gradient;
        intercept -= hyperparameters.learning_rate * intercept_gradient;
        n_iterations += 1;

        if !(slope.is_finite() && intercept.is_finite()) {
            warn!(n_iterations, slope, intercept, "diverged");
            return Err(Error::NumericDivergence { iteration: n_iterations });
        }
        if let Some(early_stopper) = &mut early_stopper {
            if early_stopper.push_loss(mean_squared_error(slope, intercept, dataset.points())) {
                debug!(n_iterations, "no more improvement, stopping");
                break;
            }
        }
    }

    let model = Model::trained(slope, intercept);
    let Evaluation { mse, r_squared } = evaluate(&model, dataset)?;
    if !mse.is_finite() {
        warn!(n_iterations, mse, "the loss is not finite");
        return Err(Error::NumericDivergence { iteration: n_iterations });
    }

    let metrics = Metrics {
        mse,
        r_squared,
        training_time: start_instant.elapsed(),
        n_iterations,
    };
    debug!(slope, intercept, mse, r_squared, n_iterations, elapsed = ?metrics.training_time);
    Ok(Fit { model, metrics })
}

/// Evaluates a trained model on an arbitrary dataset.
pub fn evaluate(model: &Model, dataset: &Dataset) -> Result<Evaluation> {
    match model.trained {
        true => Ok(Evaluation::new(model, dataset.points())),
        false => Err(Error::ModelNotTrained),
    }
}

/// Gradient of the batch MSE with respect to the slope and the intercept.
#[inline]
fn gradient(slope: f64, intercept: f64, batch: &[Point]) -> (f64, f64) {
    let mut slope_sum = 0.0;
    let mut intercept_sum = 0.0;
    for point in batch {
        let residual = slope * point.x + intercept - point.y;
        slope_sum += residual * point.x;
        intercept_sum += residual;
    }
    let scale = 2.0 / batch.len() as f64;
    (scale * slope_sum, scale * intercept_sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::hyperparameters::EarlyStopping;

    fn linear_dataset() -> Dataset {
        Dataset::new(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap()
    }

    #[test]
    fn perfectly_linear_ok() -> crate::prelude::Result {
        let hyperparameters = Hyperparameters {
            learning_rate: 0.05,
            max_iterations: 5000,
            ..Default::default()
        };
        let fit = fit(&linear_dataset(), &hyperparameters)?;
        assert!(fit.model.trained);
        assert!((fit.model.slope - 2.0).abs() < 1e-6, "slope: {}", fit.model.slope);
        assert!(fit.model.intercept.abs() < 1e-6, "intercept: {}", fit.model.intercept);
        assert!(fit.metrics.mse < 1e-10, "mse: {}", fit.metrics.mse);
        assert!(fit.metrics.r_squared > 1.0 - 1e-9, "R²: {}", fit.metrics.r_squared);
        assert_eq!(fit.metrics.n_iterations, 5000);
        Ok(())
    }

    #[test]
    fn matches_least_squares() -> crate::prelude::Result {
        let dataset = Dataset::new(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 5.0, 4.0, 5.0])?;
        let hyperparameters = Hyperparameters {
            learning_rate: 0.05,
            max_iterations: 20000,
            ..Default::default()
        };
        let fit = fit(&dataset, &hyperparameters)?;
        assert!((fit.model.slope - 0.6).abs() < 1e-9);
        assert!((fit.model.intercept - 2.2).abs() < 1e-9);
        assert!((fit.metrics.mse - 0.48).abs() < 1e-9);
        assert!((fit.metrics.r_squared - 0.6).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn mini_batches_converge() -> crate::prelude::Result {
        let hyperparameters = Hyperparameters {
            learning_rate: 0.02,
            max_iterations: 50000,
            batch_size: 2,
            ..Default::default()
        };
        let fit = fit(&linear_dataset(), &hyperparameters)?;
        assert!((fit.model.slope - 2.0).abs() < 1e-4, "slope: {}", fit.model.slope);
        assert!(fit.model.intercept.abs() < 1e-4, "intercept: {}", fit.model.intercept);
        Ok(())
    }

    #[test]
    fn deterministic_ok() -> crate::prelude::Result {
        let dataset = Dataset::new(&[0.5, -1.0, 3.0, 2.5, 7.0], &[1.0, -2.0, 4.0, 2.0, 9.5])?;
        let hyperparameters = Hyperparameters {
            batch_size: 2,
            ..Default::default()
        };
        let first = fit(&dataset, &hyperparameters)?;
        let second = fit(&dataset, &hyperparameters)?;
        assert_eq!(first.model, second.model);
        assert_eq!(first.metrics.mse.to_bits(), second.metrics.mse.to_bits());
        assert_eq!(first.metrics.r_squared.to_bits(), second.metrics.r_squared.to_bits());
        Ok(())
    }

    #[test]
    fn oversized_batch_is_full_batch() -> crate::prelude::Result {
        let dataset = linear_dataset();
        let full_batch = Hyperparameters {
            batch_size: dataset.len(),
            ..Default::default()
        };
        let oversized = Hyperparameters {
            batch_size: 100,
            ..Default::default()
        };
        let full_batch = fit(&dataset, &full_batch)?;
        let oversized = fit(&dataset, &oversized)?;
        assert_eq!(full_batch.model, oversized.model);
        assert_eq!(full_batch.metrics.mse, oversized.metrics.mse);
        Ok(())
    }

    #[test]
    fn metrics_bounds_ok() -> crate::prelude::Result {
        let dataset = Dataset::new(&[1.0, 2.0, 3.0, 4.0, 5.0], &[9.0, -4.0, 5.0, 0.0, 3.0])?;
        for batch_size in [1, 2, 5] {
            let hyperparameters = Hyperparameters {
                batch_size,
                ..Default::default()
            };
            let fit = fit(&dataset, &hyperparameters)?;
            assert!(fit.metrics.mse >= 0.0);
            assert!(fit.metrics.r_squared <= 1.0);
        }
        Ok(())
    }

    #[test]
    fn constant_targets_ok() -> crate::prelude::Result {
        let dataset = Dataset::new(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0])?;
        let hyperparameters = Hyperparameters {
            learning_rate: 0.05,
            max_iterations: 10000,
            ..Default::default()
        };
        let fit = fit(&dataset, &hyperparameters)?;
        assert!(fit.metrics.mse < 1e-12, "mse: {}", fit.metrics.mse);
        assert_eq!(fit.metrics.r_squared, 1.0);
        Ok(())
    }

    #[test]
    fn single_point_ok() -> crate::prelude::Result {
        let dataset = Dataset::new(&[2.0], &[3.0])?;
        let fit = fit(&dataset, &Hyperparameters::default())?;
        assert!(fit.metrics.r_squared.is_finite());
        assert!(fit.metrics.mse.is_finite());
        Ok(())
    }

    #[test]
    fn divergence_detected() {
        let hyperparameters = Hyperparameters {
            learning_rate: 1.0,
            ..Default::default()
        };
        match fit(&linear_dataset(), &hyperparameters) {
            Err(Error::NumericDivergence { iteration }) => assert!(iteration < 1000),
            result => panic!("unexpected result: {:?}", result),
        }
    }

    #[test]
    fn invalid_hyperparameters_rejected() {
        let hyperparameters = Hyperparameters {
            batch_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            fit(&linear_dataset(), &hyperparameters),
            Err(Error::InvalidInput(_)),
        ));
    }

    #[test]
    fn early_stopping_ok() -> crate::prelude::Result {
        let hyperparameters = Hyperparameters {
            learning_rate: 0.05,
            max_iterations: 100_000,
            early_stopping: Some(EarlyStopping {
                tolerance: 1e-9,
                patience: 5,
            }),
            ..Default::default()
        };
        let fit = fit(&linear_dataset(), &hyperparameters)?;
        assert!(fit.metrics.n_iterations < 100_000);
        assert!((fit.model.slope - 2.0).abs() < 1e-2, "slope: {}", fit.model.slope);
        Ok(())
    }

    #[test]
    fn evaluate_ok() -> crate::prelude::Result {
        let evaluation = evaluate(&Model::trained(2.0, 0.0), &linear_dataset())?;
        assert_eq!(evaluation.mse, 0.0);
        assert_eq!(evaluation.r_squared, 1.0);
        assert_eq!(
            evaluate(&Model::default(), &linear_dataset()),
            Err(Error::ModelNotTrained),
        );
        Ok(())
    }
}
