//! Deep equality for value trees.

mod deep_equal;

pub use deep_equal::deep_equal;
