use thiserror::Error as ThisError;

/// Regression engine result.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(ThisError, Debug, Clone, PartialEq)]
pub enum Error {
    /// The dataset or the hyperparameters are rejected before any iteration runs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("model is not trained yet, train the model first")]
    ModelNotTrained,

    /// Parameters or the final loss became non-finite, usually because of a too large learning rate.
    #[error("training diverged at iteration #{iteration}, try a smaller learning rate")]
    NumericDivergence { iteration: usize },
}

impl Error {
    pub fn invalid_input<R: Into<String>>(reason: R) -> Self {
        Self::InvalidInput(reason.into())
    }
}
