//! formstate - reactive, path-addressed form state.
//!
//! A [`FormState`] keeps the current values of a form, the fields the user
//! has touched and the errors reported by validation in three synchronized
//! trees, each addressed by paths such as `addresses[0].city`.
//!
//! Layers, bottom-up:
//! - [`deep`]: copy-on-write get/set/unset and tree merges over
//!   [`Value`](formstate_util::Value).
//! - [`store`]: a value cell with synchronous subscribers.
//! - [`validation`]: the validator contract and the concurrent executor.
//! - [`bridge`]: the contract with live form controls.
//! - [`engine`]: the form itself.

pub mod bridge;
pub mod deep;
pub mod engine;
pub mod error;
pub mod options;
pub mod store;
pub mod validation;

pub use bridge::{Control, ControlBridge, ControlId, ControlKind, ControlWrite};
pub use engine::{FormBuilder, FormState};
pub use error::{BoxError, FormError};
pub use options::{FormOptions, ResetErrors};
pub use store::{Store, SubscriptionId};
pub use validation::{ErrorMessage, ErrorTree, ValidationResult, Validator, ValidatorId};

pub use formstate_path::{IntoPath, Path, PathError, PathStep};
pub use formstate_util::Value;
