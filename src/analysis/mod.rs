//! Transmission analysis of BASTA tree samples.
//!
//! For each retained tree sample:
//! 1. [discover_hosts] grows the shared [HostRegistry](crate::model::HostRegistry)
//! 2. [classify_tree] classifies every edge and returns the tree's [TreeTally]
//! 3. [Aggregator] folds the tally into global counters
//!
//! After all trees, [Aggregator::finish] turns counts into a
//! [TransmissionNetwork](crate::network::TransmissionNetwork).

pub mod aggregator;
pub mod classifier;
pub mod discovery;

pub use aggregator::Aggregator;
pub use classifier::{EdgeClass, TreeTally, classify_tree};
pub use discovery::discover_hosts;
