//! Error taxonomy shared by the optimizer core and its HTTP collaborators.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Too few points, an out-of-range index, or a non-finite coordinate.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Anchored topology requested without an anchor.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
    /// A computed cost came out NaN or infinite.
    #[error("numerical anomaly: route cost evaluated to {cost}")]
    NumericalAnomaly { cost: f64 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// An external service answered with something we could not use.
    #[error("service error: {0}")]
    Service(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn degenerate_input(message: impl Into<String>) -> Self {
        Self::DegenerateInput(message.into())
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }
}

/// Surface a non-finite cost instead of letting it leak into comparisons.
pub(crate) fn ensure_finite(cost: f64) -> Result<f64> {
    if cost.is_finite() {
        Ok(cost)
    } else {
        Err(Error::NumericalAnomaly { cost })
    }
}
