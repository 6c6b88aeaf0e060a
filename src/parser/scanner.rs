//! Positional scanner for BASTA annotated tree strings.
//!
//! The tree grammar used here is not Newick: a node is either
//! * a leaf `label[&trait=value,...]:length`, or
//! * an internal node `(child,child)[&trait=value,...]:length`,
//!
//! and the scanner only ever needs two operations on such text:
//! splitting a parenthesized clause into its two children
//! ([split_children]) and separating a node's children clause from its own
//! trailing annotation ([separate_metadata]). Both work with a simple depth
//! counter over parentheses and square brackets, so commas and parentheses
//! inside annotation blocks are never mistaken for structure.

use crate::error::AnalysisError;
use crate::model::BranchAnnotation;
use crate::parser::annotation::extract_annotation;

// =#========================================================================#=
// NODE TEXT
// =#========================================================================#=
/// A node's text separated into its children clause and its own annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeText<'a> {
    /// Parenthesized children clause `(...)`, `None` for a leaf
    pub clause: Option<&'a str>,
    /// Everything after the clause (the whole text for a leaf)
    pub metadata: &'a str,
}

impl<'a> NodeText<'a> {
    /// Returns whether this node has no children clause.
    pub fn is_leaf(&self) -> bool {
        self.clause.is_none()
    }

    /// Extracts this node's own [BranchAnnotation] from its metadata.
    pub fn annotation(&self) -> Result<BranchAnnotation<'a>, AnalysisError> {
        extract_annotation(self.metadata)
    }
}

// ============================================================================
// Scanning (pub)
// ============================================================================
/// Splits a parenthesized clause into its two immediate children.
///
/// The split point is the first `,` at nesting depth exactly 1, where the depth
/// is incremented on `(` and `[` and decremented on `)` and `]`.
///
/// # Arguments
/// * `clause` - Text starting with `(` and ending with `)`
///
/// # Returns
/// * `Ok(Some((first, second)))` - The two children, without the outer
///   parentheses and the separating comma
/// * `Ok(None)` - No top-level comma, so there is no second child; the caller
///   treats the node as a leaf
/// * `Err(AnalysisError)` - If the clause is not enclosed in parentheses or its
///   brackets are unbalanced
///
/// # Example
/// ```
/// use basta_network::parser::split_children;
///
/// let (first, second) = split_children("((A[&x=1],B),C[&y=2,z=3])").unwrap().unwrap();
/// assert_eq!(first, "(A[&x=1],B)");
/// assert_eq!(second, "C[&y=2,z=3]");
/// ```
pub fn split_children(clause: &str) -> Result<Option<(&str, &str)>, AnalysisError> {
    if !clause.starts_with('(') || !clause.ends_with(')') {
        return Err(AnalysisError::malformed_tree(
            clause,
            "Tree does not start or end in parenthesis".to_string(),
        ));
    }

    let mut depth: i64 = 0;
    for (index, byte) in clause.bytes().enumerate() {
        match byte {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth -= 1,
            b',' if depth == 1 => {
                let first = &clause[1..index];
                let second = &clause[index + 1..clause.len() - 1];
                return Ok(Some((first, second)));
            }
            _ => {}
        }

        if depth < 0 {
            return Err(AnalysisError::malformed_tree(
                clause,
                "Unbalanced parentheses or brackets".to_string(),
            ));
        }
    }

    if depth != 0 {
        return Err(AnalysisError::malformed_tree(
            clause,
            "Unbalanced parentheses or brackets".to_string(),
        ));
    }

    Ok(None)
}

/// Separates a node's children clause from its own trailing metadata.
///
/// Scans from the end for the last `)` outside of any `[...]` block.
/// Everything up to and including it is the children clause, everything
/// after it is this node's metadata. Without such a `)` the whole text is
/// the metadata of a leaf.
///
/// # Example
/// ```
/// use basta_network::parser::separate_metadata;
///
/// let node = separate_metadata("(A[&x=1],B[&x=2])[&x=3]:0.5");
/// assert_eq!(node.clause, Some("(A[&x=1],B[&x=2])"));
/// assert_eq!(node.metadata, "[&x=3]:0.5");
///
/// let leaf = separate_metadata("A[&x=1]:1.0");
/// assert!(leaf.is_leaf());
/// ```
pub fn separate_metadata(node: &str) -> NodeText<'_> {
    let mut bracket_depth: i64 = 0;
    for (index, byte) in node.bytes().enumerate().rev() {
        match byte {
            b']' => bracket_depth += 1,
            b'[' => bracket_depth -= 1,
            b')' if bracket_depth <= 0 => {
                return NodeText {
                    clause: Some(&node[..=index]),
                    metadata: &node[index + 1..],
                };
            }
            _ => {}
        }
    }

    NodeText {
        clause: None,
        metadata: node,
    }
}

/// Separates a node and extracts its annotation in one go.
///
/// # Returns
/// The children clause (if any) together with the node's [BranchAnnotation].
pub fn scan_node(node: &str) -> Result<(Option<&str>, BranchAnnotation<'_>), AnalysisError> {
    let text = separate_metadata(node);
    let annotation = text.annotation()?;
    Ok((text.clause, annotation))
}

// =#========================================================================#=
// TESTS - SCANNER
// =#========================================================================#=
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ignores_commas_in_annotations() {
        let clause = "(A[&host=H1,numTransmissions=0]:1.0,B[&host=H2,numTransmissions=1]:1.0)";
        let (first, second) = split_children(clause).unwrap().unwrap();
        assert_eq!(first, "A[&host=H1,numTransmissions=0]:1.0");
        assert_eq!(second, "B[&host=H2,numTransmissions=1]:1.0");
    }

    #[test]
    fn test_split_single_child_is_leaf() {
        assert_eq!(
            split_children("(A[&host=H1,numTransmissions=0])").unwrap(),
            None
        );
    }

    #[test]
    fn test_split_unbalanced() {
        assert!(split_children("((A,B)").is_err());
        assert!(split_children("(A])").is_err());
    }

    #[test]
    fn test_separate_skips_parenthesis_in_metadata() {
        let node = separate_metadata("(A,B)[&note=(x)]");
        assert_eq!(node.clause, Some("(A,B)"));
        assert_eq!(node.metadata, "[&note=(x)]");
    }
}
