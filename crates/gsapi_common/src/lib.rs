//! Shared foundational types for the Game Script API checker.
//!
//! This crate provides the static registry of tracked API classes, the
//! per-class [`MethodTable`], the approximate comma-arity utility shared by
//! documentation parsing and call-site scanning, and a line index for turning
//! byte offsets into line/column positions.

#![warn(missing_docs)]

pub mod arity;
pub mod method_table;
pub mod registry;
pub mod source;

pub use arity::{balanced_args, comma_arity};
pub use method_table::MethodTable;
pub use registry::{find_class, is_tracked, tracked_classes, TrackedClass};
pub use source::LineIndex;
