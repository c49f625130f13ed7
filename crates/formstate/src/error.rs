//! Engine-level error type.

use formstate_path::PathError;
use thiserror::Error;

use crate::deep::DeepError;

/// Error raised by a validator that failed to run (as opposed to reporting
/// field errors, which are data).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("malformed path: {0}")]
    Path(#[from] PathError),
    #[error("structural update failed: {0}")]
    Deep(#[from] DeepError),
    #[error("validator #{index} failed: {source}")]
    Validator {
        index: usize,
        #[source]
        source: BoxError,
    },
}

impl FormError {
    /// True for failures raised by a validator rather than by a path.
    pub fn is_validator_failure(&self) -> bool {
        matches!(self, FormError::Validator { .. })
    }
}
