use crate::regression::error::{Error, Result};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hyperparameters {
    pub learning_rate: f64,
    pub max_iterations: usize,

    /// Clamped to the dataset length when larger.
    pub batch_size: usize,

    /// Disabled by default, the training then performs exactly `max_iterations` steps.
    pub early_stopping: Option<EarlyStopping>,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            learning_rate: Self::DEFAULT_LEARNING_RATE,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            batch_size: Self::DEFAULT_BATCH_SIZE,
            early_stopping: None,
        }
    }
}

impl Hyperparameters {
    pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
    pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
    pub const DEFAULT_BATCH_SIZE: usize = 32;

    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::invalid_input(format!(
                "learning rate must be a positive number, got {}",
                self.learning_rate,
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::invalid_input("maximum number of iterations must be positive"));
        }
        if self.batch_size == 0 {
            return Err(Error::invalid_input("batch size must be positive"));
        }
        if let Some(early_stopping) = &self.early_stopping {
            early_stopping.validate()?;
        }
        Ok(())
    }
}

/// Stops the training when the full-dataset MSE stops improving.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EarlyStopping {
    /// Minimal MSE decrease which counts as an improvement.
    pub tolerance: f64,

    /// Number of consecutive steps without an improvement before stopping.
    pub patience: usize,
}

impl Default for EarlyStopping {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            patience: 5,
        }
    }
}

impl EarlyStopping {
    fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(Error::invalid_input(format!(
                "early stopping tolerance must be a non-negative number, got {}",
                self.tolerance,
            )));
        }
        if self.patience == 0 {
            return Err(Error::invalid_input("early stopping patience must be positive"));
        }
        Ok(())
    }
}

/// Tracks the loss between the steps and tells when to stop.
pub struct EarlyStopper {
    settings: EarlyStopping,
    best_loss: f64,
    n_stale_steps: usize,
}

impl From<EarlyStopping> for EarlyStopper {
    fn from(settings: EarlyStopping) -> Self {
        Self {
            settings,
            best_loss: f64::INFINITY,
            n_stale_steps: 0,
        }
    }
}

impl EarlyStopper {
    /// Returns `true` when the training should stop.
    #[must_use]
    pub fn push_loss(&mut self, loss: f64) -> bool {
        if loss < self.best_loss - self.settings.tolerance {
            self.best_loss = loss;
            self.n_stale_steps = 0;
            false
        } else {
            self.n_stale_steps += 1;
            self.n_stale_steps >= self.settings.patience
        }
    }
}
