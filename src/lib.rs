//! basta-network is a library to summarise BASTA posterior tree samples into
//! a host-to-host transmission network.
//!
//! BASTA (BEAST2) writes a posterior sample of structured-coalescent trees in
//! which every branch is annotated with the host it evolved in and the number
//! of transmission events along it. This crate reads such a sample, classifies
//! every branch as a direct, indirect or no-op transmission and estimates, over
//! all retained trees, the probability of each host pair being linked.
//! Core functionality provided:
//! - Reading: locate the tree samples of a `.trees` file, apply burnin and
//!   optionally skip the first tree (see [crate::nexus]).
//! - Scanning: split a tree text into subtrees and annotations with a
//!   depth-counting scanner, no full Newick parse required (see [crate::parser]).
//! - Analysis: per-tree classification into a [TreeTally](analysis::TreeTally)
//!   and aggregation over the sample, optionally on the rayon thread pool
//!   (see [crate::analysis]).
//! - Output: a queryable [TransmissionNetwork] and writers for the text report
//!   and JSON (see [crate::network]).
//!
//! Limitations:
//! - Only binary trees; a node with a single child is treated as a leaf
//! - Only the `host` and `numTransmissions` traits are considered
//!
//! # Usage patterns
//! 1. [analyze_file] and [analyze_tree_strs] run a complete analysis.
//! 2. Combine [TreeSampleReaderBuilder](nexus::TreeSampleReaderBuilder) and
//!    [Aggregator](analysis::Aggregator) for full control over reading mode,
//!    burnin and parallelism.
//!
//! ## Example
//! ```no_run
//! use basta_network::{AnalysisConfig, analyze_file};
//!
//! let config = AnalysisConfig::default(); // 20% burnin
//! let network = analyze_file("outbreak.trees", &config)?;
//! println!("P(H1 -> H2) = {:?}", network.direct_probability("H1", "H2"));
//! # Ok::<(), basta_network::AnalysisError>(())
//! ```
//!
//! ## Example Manual Pipeline
//! ```no_run
//! use basta_network::analysis::Aggregator;
//! use basta_network::nexus::{Burnin, TreeSampleReaderBuilder};
//!
//! let mut reader = TreeSampleReaderBuilder::for_file("outbreak.trees")
//!     .with_skip_first()                    // Skip start tree
//!     .with_burnin(Burnin::Percentage(0.1)) // Discard first 10%
//!     .lazy()                               // Stream trees
//!     .build()?;
//!
//! let mut aggregator = Aggregator::new();
//! while let Some(tree) = reader.next_tree()? {
//!     aggregator.process_tree(&tree)?;
//! }
//! let network = aggregator.finish()?;
//! # Ok::<(), basta_network::AnalysisError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod network;
pub mod nexus;
pub mod parser;

pub use crate::config::AnalysisConfig;
pub use crate::error::{AnalysisError, AnalysisErrorType};
pub use crate::network::TransmissionNetwork;

use crate::analysis::Aggregator;
use crate::nexus::TreeSampleReaderBuilder;
use std::path::Path;
use tracing::info;

// ============================================================================
// Quick Analysis API
// ============================================================================
/// Reads a BASTA trees file and summarises its retained trees into a
/// [TransmissionNetwork].
///
/// Trees are streamed one at a time, unless `config.parallel` is set, in which
/// case all retained trees are loaded and classified on the rayon thread pool.
/// Both ways give the same network.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
/// * `config` - Burnin, skip-first and parallelism settings
///
/// # Errors
/// * `InvalidConfig` - If the configuration is rejected by [AnalysisConfig::validate]
/// * Any reading error, see [TreeSampleReaderBuilder::build]
/// * Any scanning or classification error of a retained tree
/// * `EmptySampleSet` - If burnin leaves no tree
pub fn analyze_file<P: AsRef<Path>>(
    path: P,
    config: &AnalysisConfig,
) -> Result<TransmissionNetwork, AnalysisError> {
    config.validate()?;
    info!("Reading trees from {}", path.as_ref().display());

    let mut builder = TreeSampleReaderBuilder::for_file(path).with_burnin(config.burnin());
    if config.skip_first {
        builder = builder.with_skip_first();
    }

    let mut aggregator = Aggregator::new();
    if config.parallel {
        let trees = builder.eager().build()?.into_tree_texts()?;
        aggregator.process_trees_parallel(&trees)?;
    } else {
        let mut reader = builder.lazy().build()?;
        while let Some(tree) = reader.next_tree()? {
            aggregator.process_tree(&tree)?;
        }
    }
    aggregator.finish()
}

/// Summarises already extracted tree texts (no burnin applied) into a
/// [TransmissionNetwork].
///
/// # Example
/// ```
/// use basta_network::analyze_tree_strs;
///
/// let trees = [
///     "(A[&host=H1,numTransmissions=0]:1.0,B[&host=H2,numTransmissions=1]:1.0)[&host=H1,numTransmissions=0]:0.0",
///     "(A[&host=H1,numTransmissions=0]:1.0,B[&host=H2,numTransmissions=0]:1.0)[&host=H2,numTransmissions=0]:0.0",
/// ];
/// let network = analyze_tree_strs(trees).unwrap();
/// assert_eq!(network.root_probability("H1"), Some(0.5));
/// ```
pub fn analyze_tree_strs<I, S>(trees: I) -> Result<TransmissionNetwork, AnalysisError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut aggregator = Aggregator::new();
    aggregator.process_trees(trees)?;
    aggregator.finish()
}
