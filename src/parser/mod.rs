//! Scanner for BASTA annotated tree strings.
//!
//! This module provides the string-position scanning the analysis is built on:
//! * [split_children] - split a parenthesized clause into its two children
//! * [separate_metadata] - separate a node's children clause from its annotation
//! * [extract_annotation] - read the `&host` and `numTransmissions` traits
//!
//! The scanner works on string slices and never builds a tree structure;
//! subtrees are handed around as the text they span.

pub mod annotation;
pub mod scanner;

pub use annotation::extract_annotation;
pub use scanner::{NodeText, scan_node, separate_metadata, split_children};
