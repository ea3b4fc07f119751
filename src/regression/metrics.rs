use std::time::Duration;

use statrs::statistics::Statistics;

use crate::regression::dataset::Point;
use crate::regression::model::Model;

/// MSE below this is considered a perfect fit when the targets have no variance.
const ZERO_MSE: f64 = 1e-12;

#[derive(Debug, Copy, Clone)]
pub struct Metrics {
    pub mse: f64,
    pub r_squared: f64,
    pub training_time: Duration,

    /// Number of the performed update steps.
    pub n_iterations: usize,
}

/// Sum of squared residuals.
#[derive(Default, Copy, Clone)]
pub struct SquaredError {
    sum: f64,
    n: usize,
}

impl SquaredError {
    #[inline]
    pub fn push(&mut self, residual: f64) {
        self.sum += residual * residual;
        self.n += 1;
    }

    #[must_use]
    pub const fn sum(&self) -> f64 {
        self.sum
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.sum / self.n.max(1) as f64
    }
}

/// Mean squared error of the straight line over the points.
#[must_use]
pub fn mean_squared_error(slope: f64, intercept: f64, points: &[Point]) -> f64 {
    residual_error(slope, intercept, points).mean()
}

fn residual_error(slope: f64, intercept: f64, points: &[Point]) -> SquaredError {
    let mut error = SquaredError::default();
    for point in points {
        error.push(slope * point.x + intercept - point.y);
    }
    error
}

/// Goodness of fit of a model over the points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Evaluation {
    pub mse: f64,
    pub r_squared: f64,
}

impl Evaluation {
    #[must_use]
    pub fn new(model: &Model, points: &[Point]) -> Self {
        let residuals = residual_error(model.slope, model.intercept, points);
        let mse = residuals.mean();

        let mean_y = points.iter().map(|point| point.y).mean();
        let mut total = SquaredError::default();
        for point in points {
            total.push(point.y - mean_y);
        }

        let r_squared = if total.sum() != 0.0 {
            1.0 - residuals.sum() / total.sum()
        } else if mse <= ZERO_MSE {
            // The targets are constant and the model reproduces them.
            1.0
        } else {
            0.0
        };

        Self { mse, r_squared }
    }
}
