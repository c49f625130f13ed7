use serde::Deserialize;

/// What `reset` does with the error tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetErrors {
    /// Errors survive a reset until the next validation run.
    #[default]
    Keep,
    /// Errors are replaced with an empty tree.
    Clear,
}

/// Options for [`FormState`](crate::FormState).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    pub reset_errors: ResetErrors,
    /// If true, `validate` marks every field touched before running the
    /// validators.
    pub touch_on_validate: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            reset_errors: ResetErrors::Keep,
            touch_on_validate: true,
        }
    }
}
