//! formstate-util - value tree and deep utilities for formstate
//!
//! This crate provides the persistent [`Value`] tree shared by the path codec
//! and the form engine, plus the structure-agnostic helpers over it.

pub mod is_empty;
pub mod json_clone;
pub mod json_equal;
pub mod value;

// Re-exports for convenience
pub use is_empty::{is_empty_tree, is_empty_value};
pub use json_clone::deep_clone;
pub use json_equal::deep_equal;
pub use value::{Map, Value};
