//! Veil Tree Traversal
//!
//! Walks arbitrary JSON trees, resolves a dot-path field mapping against
//! the current path, and dispatches matching leaf strings through a
//! [`veil_kernel::Kernel`] while preserving the tree's structure.

pub mod fields;
pub mod walk;

pub use fields::FieldMap;
pub use walk::{DEFAULT_MAX_DEPTH, TraverseOptions, traverse};
