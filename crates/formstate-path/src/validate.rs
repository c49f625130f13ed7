//! Limits on path size.

use crate::types::PathStep;
use crate::PathError;

/// Maximum allowed path string length, in bytes.
pub const MAX_PATH_SOURCE_LENGTH: usize = 1024;

/// Maximum allowed path depth.
pub const MAX_PATH_DEPTH: usize = 256;

/// Validate a path string before parsing.
///
/// # Errors
///
/// - `PathError::Empty` for the empty string
/// - `PathError::TooLong` above 1024 bytes
pub fn validate_source(src: &str) -> Result<(), PathError> {
    if src.is_empty() {
        return Err(PathError::Empty);
    }
    if src.len() > MAX_PATH_SOURCE_LENGTH {
        return Err(PathError::TooLong);
    }
    Ok(())
}

/// Validate a list of steps.
///
/// # Errors
///
/// Returns `PathError::TooDeep` if the path exceeds 256 steps.
///
/// # Example
///
/// ```
/// use formstate_path::{validate_path, PathStep};
///
/// validate_path(&[PathStep::Key("foo".into()), PathStep::Index(0)]).unwrap();
/// validate_path(&(0..300).map(PathStep::Index).collect::<Vec<_>>()).unwrap_err();
/// ```
pub fn validate_path(steps: &[PathStep]) -> Result<(), PathError> {
    if steps.len() > MAX_PATH_DEPTH {
        return Err(PathError::TooDeep);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty_source() {
        assert_eq!(validate_source(""), Err(PathError::Empty));
    }

    #[test]
    fn test_validate_long_source() {
        let long = "a".repeat(2000);
        assert_eq!(validate_source(&long), Err(PathError::TooLong));
    }

    #[test]
    fn test_validate_max_depth() {
        let steps: Vec<PathStep> = (0..256).map(PathStep::Index).collect();
        assert!(validate_path(&steps).is_ok());
        let steps: Vec<PathStep> = (0..257).map(PathStep::Index).collect();
        assert_eq!(validate_path(&steps), Err(PathError::TooDeep));
    }
}
