use serde::{Deserialize, Serialize};

use crate::regression::Fit;

#[derive(Serialize, Deserialize, Debug)]
pub struct TrainResponse {
    pub slope: f64,
    pub intercept: f64,
    /// Milliseconds.
    pub training_time: f64,
    pub mse: f64,
    pub r_squared: f64,
    pub n_iterations: usize,
}

impl From<&Fit> for TrainResponse {
    fn from(fit: &Fit) -> Self {
        Self {
            slope: fit.model.slope,
            intercept: fit.model.intercept,
            training_time: fit.metrics.training_time.as_secs_f64() * 1000.0,
            mse: fit.metrics.mse,
            r_squared: fit.metrics.r_squared,
            n_iterations: fit.metrics.n_iterations,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PredictResponse {
    pub prediction: f64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}
