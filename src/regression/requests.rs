use serde::{Deserialize, Serialize};

use crate::regression::dataset::Dataset;
use crate::regression::error::{Error, Result};
use crate::regression::hyperparameters::{EarlyStopping, Hyperparameters};

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct TrainRequest {
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_rate: Option<f64>,

    /// Signed, so that negative values are reported as invalid input rather than malformed JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<i64>,

    /// Enables early stopping when either of the two is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_stopping_patience: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_stopping_tolerance: Option<f64>,
}

impl TrainRequest {
    pub fn dataset(&self) -> Result<Dataset> {
        Dataset::new(&self.x_values, &self.y_values)
    }

    /// Fills in the defaults for the missing values.
    pub fn hyperparameters(&self) -> Result<Hyperparameters> {
        let defaults = Hyperparameters::default();
        let early_stopping =
            match (self.early_stopping_patience, self.early_stopping_tolerance) {
                (None, None) => None,
                (patience, tolerance) => {
                    let defaults = EarlyStopping::default();
                    Some(EarlyStopping {
                        patience: patience
                            .map(|value| to_count("early stopping patience", value))
                            .transpose()?
                            .unwrap_or(defaults.patience),
                        tolerance: tolerance.unwrap_or(defaults.tolerance),
                    })
                }
            };
        let hyperparameters = Hyperparameters {
            learning_rate: self.learning_rate.unwrap_or(defaults.learning_rate),
            max_iterations: self
                .max_iterations
                .map(|value| to_count("maximum number of iterations", value))
                .transpose()?
                .unwrap_or(defaults.max_iterations),
            batch_size: self
                .batch_size
                .map(|value| to_count("batch size", value))
                .transpose()?
                .unwrap_or(defaults.batch_size),
            early_stopping,
        };
        hyperparameters.validate()?;
        Ok(hyperparameters)
    }
}

fn to_count(name: &str, value: i64) -> Result<usize> {
    match usize::try_from(value) {
        Ok(value) if value != 0 => Ok(value),
        _ => Err(Error::invalid_input(format!("{name} must be positive, got {value}"))),
    }
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone)]
pub struct PredictRequest {
    pub x_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_ok() -> crate::prelude::Result {
        let request: TrainRequest = serde_json::from_str(
            // language=JSON
            r#"{"x_values": [1, 2, 3], "y_values": [2, 4, 6]}"#,
        )?;
        assert_eq!(request.dataset()?.len(), 3);
        assert_eq!(request.hyperparameters()?, Hyperparameters::default());
        Ok(())
    }

    #[test]
    fn parse_full_ok() -> crate::prelude::Result {
        let request: TrainRequest = serde_json::from_str(
            // language=JSON
            r#"{
                "x_values": [1],
                "y_values": [2],
                "learning_rate": 0.5,
                "max_iterations": 10,
                "batch_size": 4,
                "early_stopping_patience": 3
            }"#,
        )?;
        let hyperparameters = request.hyperparameters()?;
        assert_eq!(hyperparameters.learning_rate, 0.5);
        assert_eq!(hyperparameters.max_iterations, 10);
        assert_eq!(hyperparameters.batch_size, 4);
        assert_eq!(
            hyperparameters.early_stopping,
            Some(EarlyStopping { patience: 3, tolerance: 1e-6 }),
        );
        Ok(())
    }

    #[test]
    fn negative_values_rejected() {
        for request in [
            TrainRequest { max_iterations: Some(-1), ..Default::default() },
            TrainRequest { batch_size: Some(0), ..Default::default() },
            TrainRequest { learning_rate: Some(-0.01), ..Default::default() },
            TrainRequest { early_stopping_patience: Some(-5), ..Default::default() },
        ] {
            assert!(matches!(request.hyperparameters(), Err(Error::InvalidInput(_))));
        }
    }
}
