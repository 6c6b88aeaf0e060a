//! Host discovery pass over one annotated tree.

use crate::error::AnalysisError;
use crate::model::HostRegistry;
use crate::parser::{scan_node, split_children};
use tracing::debug;

/// Registers every sampled host appearing in `tree` with the `registry`.
///
/// Every node is visited once, in pre-order (node, first subtree, second
/// subtree), so hosts are registered in first-seen order. The host of an
/// internal node is always read from that node's own trailing annotation.
/// The `Unsampled` sentinel is never registered, and running the pass twice
/// on the same tree adds nothing the second time.
///
/// Uses an explicit work stack, so deep trees cannot overflow the call stack.
///
/// # Arguments
/// * `tree` - Whole annotated tree text (root clause plus root annotation)
/// * `registry` - Registry to grow
///
/// # Returns
/// * `usize` - Number of newly registered hosts
/// * [AnalysisError] - If a node is malformed or lacks the host trait
pub fn discover_hosts(tree: &str, registry: &mut HostRegistry) -> Result<usize, AnalysisError> {
    let mut num_new_hosts = 0;
    let mut stack = vec![tree];

    while let Some(node) = stack.pop() {
        let (clause, annotation) = scan_node(node)?;
        if registry.register(annotation.host) {
            debug!("Host {} added to host list", annotation.host);
            num_new_hosts += 1;
        }

        let Some(clause) = clause else {
            continue;
        };
        if let Some((first, second)) = split_children(clause)? {
            // Second pushed first, so the first subtree is visited first
            stack.push(second);
            stack.push(first);
        }
    }

    Ok(num_new_hosts)
}
