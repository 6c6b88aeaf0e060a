//! Branch annotation carried by every node of a BASTA tree.
//!
//! Provides [BranchAnnotation], the two traits the analysis depends on,
//! as extracted from a `[&host=...,numTransmissions=...]` block by
//! [extract_annotation](crate::parser::extract_annotation).

use crate::model::host::UNSAMPLED;

/// Annotation key holding the host identity
pub const HOST_TRAIT: &str = "&host";

/// Annotation key holding the number of transmission events along the branch
pub const TRANSMISSIONS_TRAIT: &str = "numTransmissions";

// =#========================================================================#=
// BRANCH ANNOTATION
// =#========================================================================#=
/// Host and number of transmission events on the branch above a node.
///
/// The host label borrows from the tree text it was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchAnnotation<'a> {
    /// Host label, verbatim (possibly the `Unsampled` sentinel)
    pub host: &'a str,
    /// Number of transmission events inferred along the branch
    pub event_count: u32,
}

impl<'a> BranchAnnotation<'a> {
    pub fn new(host: &'a str, event_count: u32) -> Self {
        BranchAnnotation { host, event_count }
    }

    /// Returns `true` if the branch ends in an unsampled host.
    pub fn is_unsampled(&self) -> bool {
        self.host == UNSAMPLED
    }
}
