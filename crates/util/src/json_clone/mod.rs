//! Deep cloning for value trees.
//!
//! A plain `Value::clone` shares every nested container. [`deep_clone`]
//! allocates fresh containers all the way down so the copy has no identity
//! in common with the source.

mod clone;

pub use clone::deep_clone;
