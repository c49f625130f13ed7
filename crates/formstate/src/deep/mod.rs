//! Deep structural operations over value trees.
//!
//! Every operation is copy-on-write: it returns a new root, allocating fresh
//! containers only along the addressed path and sharing every untouched
//! sibling with the input. The input tree is never modified, so snapshots
//! handed out earlier stay valid.
//!
//! # Operations
//!
//! Path-addressed: [`get`], [`set`], [`unset`], [`insert`], [`swap`],
//! [`move_item`].
//!
//! Whole-tree: [`deep_clone`], [`deep_set`], [`defaults_deep`], [`merge`].

pub mod apply;
pub mod merge;
pub mod types;

pub use apply::{get, insert, move_item, set, swap, unset, MAX_ARRAY_PADDING};
pub use formstate_util::deep_clone;
pub use merge::{deep_set, defaults_deep, fill_fields, is_message_list, merge};
pub use types::DeepError;
