//! Global transmission counters accumulated over all retained trees.

use crate::model::host::{HostIndex, HostRef, Origin};
use std::collections::HashMap;

/// Ordered pair of sampled hosts `(from, to)`.
pub type HostPair = (HostIndex, HostIndex);

// =#========================================================================#=
// TRANSMISSION COUNTERS
// =#========================================================================#=
/// Raw counts of roots, direct/indirect transmissions and origins.
///
/// All pairwise counters are sparse maps keyed on [HostPair], so every pair is
/// addressable no matter in which order, or in which tree, its hosts were
/// first discovered. Missing entries count as zero.
#[derive(Debug, Clone, Default)]
pub struct TransmissionCounters {
    /// Number of trees with a direct transmission for the pair
    direct: HashMap<HostPair, usize>,
    /// One hop count per tree with an indirect transmission for the pair
    indirect: HashMap<HostPair, Vec<u32>>,
    /// Number of trees rooted in the host
    roots: HashMap<HostRef, usize>,
    /// Number of trees in which the host had the given origin
    origins: HashMap<(HostIndex, Origin), usize>,
    /// Number of trees folded into these counters
    num_trees: usize,
}

impl TransmissionCounters {
    pub fn new() -> Self {
        TransmissionCounters::default()
    }

    // ------------------------------------------------------------------------
    // Recording
    // ------------------------------------------------------------------------
    /// Counts one more direct transmission from `pair.0` to `pair.1`.
    pub fn add_direct(&mut self, pair: HostPair) {
        *self.direct.entry(pair).or_insert(0) += 1;
    }

    /// Records an indirect transmission collapsing `hops` events.
    pub fn add_indirect(&mut self, pair: HostPair, hops: u32) {
        self.indirect.entry(pair).or_default().push(hops);
    }

    /// Counts one more tree rooted in `root`.
    pub fn add_root(&mut self, root: HostRef) {
        *self.roots.entry(root).or_insert(0) += 1;
    }

    /// Counts one more tree in which `host` had origin `origin`.
    pub fn add_origin(&mut self, host: HostIndex, origin: Origin) {
        *self.origins.entry((host, origin)).or_insert(0) += 1;
    }

    /// Counts one more folded tree.
    pub fn add_tree(&mut self) {
        self.num_trees += 1;
    }

    /// Adds all counts of `other` to these counters.
    pub fn merge(&mut self, other: TransmissionCounters) {
        for (pair, count) in other.direct {
            *self.direct.entry(pair).or_insert(0) += count;
        }
        for (pair, hops) in other.indirect {
            self.indirect.entry(pair).or_default().extend(hops);
        }
        for (root, count) in other.roots {
            *self.roots.entry(root).or_insert(0) += count;
        }
        for (key, count) in other.origins {
            *self.origins.entry(key).or_insert(0) += count;
        }
        self.num_trees += other.num_trees;
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------
    /// Number of trees with a direct transmission `from -> to`.
    pub fn direct_count(&self, from: HostIndex, to: HostIndex) -> usize {
        self.direct.get(&(from, to)).copied().unwrap_or(0)
    }

    /// Hop counts of all recorded indirect transmissions `from -> to`,
    /// one per tree.
    pub fn indirect_hops(&self, from: HostIndex, to: HostIndex) -> &[u32] {
        self.indirect
            .get(&(from, to))
            .map(|hops| hops.as_slice())
            .unwrap_or(&[])
    }

    /// Number of trees with an indirect transmission `from -> to`.
    pub fn indirect_count(&self, from: HostIndex, to: HostIndex) -> usize {
        self.indirect_hops(from, to).len()
    }

    /// Number of trees rooted in `root`.
    pub fn root_count(&self, root: HostRef) -> usize {
        self.roots.get(&root).copied().unwrap_or(0)
    }

    /// Number of trees in which `host` had origin `origin`.
    pub fn origin_count(&self, host: HostIndex, origin: Origin) -> usize {
        self.origins.get(&(host, origin)).copied().unwrap_or(0)
    }

    /// Iterates over all origins recorded for `host` with their counts.
    pub fn origins_of(&self, host: HostIndex) -> impl Iterator<Item = (Origin, usize)> + '_ {
        self.origins
            .iter()
            .filter(move |((h, _), _)| *h == host)
            .map(|((_, origin), count)| (*origin, *count))
    }

    /// Number of trees folded into these counters.
    pub fn num_trees(&self) -> usize {
        self.num_trees
    }
}

// =#========================================================================#=
// TESTS - COUNTERS
// =#========================================================================#=
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_adds_all_counts() {
        let mut left = TransmissionCounters::new();
        left.add_direct((0, 1));
        left.add_indirect((0, 2), 3);
        left.add_root(HostRef::Sampled(0));
        left.add_origin(1, Origin::Host(0));
        left.add_tree();

        let mut right = TransmissionCounters::new();
        right.add_direct((0, 1));
        right.add_indirect((0, 2), 2);
        right.add_root(HostRef::Unsampled);
        right.add_origin(1, Origin::Unsampled);
        right.add_tree();

        left.merge(right);

        assert_eq!(left.num_trees(), 2);
        assert_eq!(left.direct_count(0, 1), 2);
        assert_eq!(left.indirect_hops(0, 2), &[3, 2]);
        assert_eq!(left.root_count(HostRef::Sampled(0)), 1);
        assert_eq!(left.root_count(HostRef::Unsampled), 1);
        assert_eq!(left.origin_count(1, Origin::Host(0)), 1);
        assert_eq!(left.origins_of(1).count(), 2);
        assert_eq!(left.direct_count(1, 0), 0);
    }
}
