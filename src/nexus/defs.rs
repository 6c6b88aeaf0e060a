//! Constants for locating tree samples in BEAST2 `.trees` files.

/// First whitespace-delimited token of every tree-sample line "tree"
pub(crate) const TREE: &str = "tree";

/// Position of the tree text among the tokens of a tree-sample line,
/// as in `tree STATE_0 = (...)[&...]:0.0;`
pub(crate) const TREE_TEXT_TOKEN: usize = 3;
