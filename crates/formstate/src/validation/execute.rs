//! Concurrent validator execution.

use futures::future::try_join_all;
use formstate_util::{is_empty_tree, Value};
use tracing::{debug, warn};

use super::validator::{ErrorTree, Validator};
use crate::deep::merge;
use crate::error::FormError;

/// Runs every validator against `data` and merges their error trees.
///
/// All validators receive the same snapshot and run concurrently. Results
/// are merged in registry order, later validators winning on shared paths.
/// Returns `Ok(None)` when nothing was reported (every result empty).
///
/// # Errors
///
/// `FormError::Validator` as soon as any validator fails. Results of the
/// other validators are discarded: a run either produces a complete error
/// tree or nothing.
pub async fn execute(data: Value, validators: &[Validator]) -> Result<Option<ErrorTree>, FormError> {
    if validators.is_empty() {
        return Ok(None);
    }
    debug!(validators = validators.len(), "running validators");

    let runs = validators.iter().enumerate().map(|(index, validator)| {
        let run = validator.call(data.clone());
        async move {
            run.await.map_err(|source| {
                warn!(index, error = %source, "validator failed");
                FormError::Validator { index, source }
            })
        }
    });
    let results = try_join_all(runs).await?;

    let merged = results
        .into_iter()
        .flatten()
        .fold(None, |acc: Option<ErrorTree>, tree| match acc {
            Some(prev) => Some(merge(&prev, &tree)),
            None => Some(tree),
        });
    let merged = merged.filter(|tree| !is_empty_tree(tree));
    debug!(has_errors = merged.is_some(), "validators finished");
    Ok(merged)
}
