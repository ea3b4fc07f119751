use crate::regression::error::{Error, Result};

/// Straight line `y = slope * x + intercept`.
///
/// The default model is untrained and refuses to predict.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Model {
    pub slope: f64,
    pub intercept: f64,
    pub trained: bool,
}

impl Model {
    #[must_use]
    pub const fn trained(slope: f64, intercept: f64) -> Self {
        Self {
            slope,
            intercept,
            trained: true,
        }
    }

    /// Non-finite `x` is accepted and yields a non-finite prediction.
    pub fn predict(&self, x: f64) -> Result<f64> {
        match self.trained {
            true => Ok(self.slope * x + self.intercept),
            false => Err(Error::ModelNotTrained),
        }
    }
}
