//! Error type for the structural operations.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeepError {
    #[error("cannot address array with key {key:?}")]
    KeyOnArray { key: String },
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("expected an array, found {found}")]
    NotAnArray { found: &'static str },
}
