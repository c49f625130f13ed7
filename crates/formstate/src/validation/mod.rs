//! Validation pipeline.
//!
//! A [`Validator`] turns a snapshot of the value tree into an error tree (or
//! nothing), possibly asynchronously. [`execute`] runs a set of validators
//! against one snapshot and merges what they report.

pub mod execute;
pub mod validator;

pub use execute::execute;
pub use validator::{ErrorMessage, ErrorTree, ValidationResult, Validator, ValidatorId, ValidatorRegistry};
