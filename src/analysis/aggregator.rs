//! Accumulation of per-tree statistics over a posterior tree sample.

use crate::analysis::classifier::{TreeTally, classify_tree};
use crate::analysis::discovery::discover_hosts;
use crate::error::AnalysisError;
use crate::model::{HostRegistry, TransmissionCounters};
use crate::network::TransmissionNetwork;
use rayon::prelude::*;
use tracing::{debug, info};

// =#========================================================================#=
// AGGREGATOR
// =#========================================================================#=
/// Folds classified trees into global [TransmissionCounters].
///
/// The aggregator owns the [HostRegistry] shared by all trees. Feed it the
/// retained (post-burnin) trees in sample order, then call
/// [finish()](Aggregator::finish) to turn counts into probabilities.
///
/// # Example
/// ```
/// use basta_network::analysis::Aggregator;
///
/// let mut aggregator = Aggregator::new();
/// aggregator.process_tree(
///     "(A[&host=H1,numTransmissions=0]:1.0,B[&host=H2,numTransmissions=1]:1.0)\
///      [&host=H1,numTransmissions=0]:0.0",
/// )?;
/// let network = aggregator.finish()?;
///
/// assert_eq!(network.direct_probability("H1", "H2"), Some(1.0));
/// # Ok::<(), basta_network::AnalysisError>(())
/// ```
#[derive(Debug, Default)]
pub struct Aggregator {
    registry: HostRegistry,
    counters: TransmissionCounters,
}

impl Aggregator {
    /// Creates an aggregator with an empty registry and zeroed counters.
    pub fn new() -> Self {
        Aggregator::default()
    }

    /// Discovers the hosts of one tree, classifies it and folds the result.
    ///
    /// # Errors
    /// Any [AnalysisError] of discovery or classification, tagged with the
    /// index of the tree among the trees processed so far.
    pub fn process_tree(&mut self, tree: &str) -> Result<(), AnalysisError> {
        let tree_index = self.counters.num_trees();

        let num_new_hosts =
            discover_hosts(tree, &mut self.registry).map_err(|e| e.in_tree(tree_index))?;
        if num_new_hosts > 0 {
            debug!(
                "Tree {tree_index}: {num_new_hosts} new host(s), {} in total",
                self.registry.num_hosts()
            );
        }

        let tally = classify_tree(tree, &self.registry).map_err(|e| e.in_tree(tree_index))?;
        self.fold(tally);
        Ok(())
    }

    /// Processes trees one after the other, aborting at the first error.
    pub fn process_trees<I, S>(&mut self, trees: I) -> Result<(), AnalysisError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tree in trees {
            self.process_tree(tree.as_ref())?;
        }
        Ok(())
    }

    /// Processes trees with classification spread over the rayon thread pool.
    ///
    /// Hosts are discovered sequentially in sample order first, so the host
    /// order matches [process_trees()](Aggregator::process_trees). Each rayon
    /// split then classifies its trees into private counters, and the splits
    /// are merged in sample order, giving the same counters as sequential
    /// processing.
    ///
    /// If several trees fail, which of their errors is returned is unspecified.
    pub fn process_trees_parallel<S>(&mut self, trees: &[S]) -> Result<(), AnalysisError>
    where
        S: AsRef<str> + Sync,
    {
        let offset = self.counters.num_trees();

        for (i, tree) in trees.iter().enumerate() {
            discover_hosts(tree.as_ref(), &mut self.registry).map_err(|e| e.in_tree(offset + i))?;
        }
        debug!(
            "Discovered {} hosts in {} trees",
            self.registry.num_hosts(),
            trees.len()
        );

        let registry = &self.registry;
        let counters = trees
            .par_iter()
            .enumerate()
            .map(|(i, tree)| {
                classify_tree(tree.as_ref(), registry).map_err(|e| e.in_tree(offset + i))
            })
            .try_fold(TransmissionCounters::new, |mut counters, tally| {
                fold_tally(&mut counters, tally?);
                Ok::<_, AnalysisError>(counters)
            })
            .try_reduce(TransmissionCounters::new, |mut left, right| {
                left.merge(right);
                Ok(left)
            })?;

        self.counters.merge(counters);
        Ok(())
    }

    /// Folds the statistics of one classified tree into the global counters.
    pub fn fold(&mut self, tally: TreeTally) {
        fold_tally(&mut self.counters, tally);
    }

    /// Registry of all hosts seen so far.
    pub fn registry(&self) -> &HostRegistry {
        &self.registry
    }

    /// Raw counts accumulated so far.
    pub fn counters(&self) -> &TransmissionCounters {
        &self.counters
    }

    /// Number of trees folded so far.
    pub fn num_trees(&self) -> usize {
        self.counters.num_trees()
    }

    /// Derives probabilities from the accumulated counts.
    ///
    /// # Errors
    /// `EmptySampleSet` if no tree has been folded.
    pub fn finish(self) -> Result<TransmissionNetwork, AnalysisError> {
        if self.counters.num_trees() == 0 {
            return Err(AnalysisError::empty_sample_set());
        }
        info!(
            "Summarised {} trees with {} sampled hosts",
            self.counters.num_trees(),
            self.registry.num_hosts()
        );
        Ok(TransmissionNetwork::from_counters(
            &self.registry,
            &self.counters,
        ))
    }
}

fn fold_tally(counters: &mut TransmissionCounters, tally: TreeTally) {
    counters.add_root(tally.root());
    for &pair in tally.direct_pairs() {
        counters.add_direct(pair);
    }
    for &(pair, hops) in tally.indirect_pairs() {
        counters.add_indirect(pair, hops);
    }
    for (host, origin) in tally.origins() {
        counters.add_origin(host, origin);
    }
    counters.add_tree();
}
