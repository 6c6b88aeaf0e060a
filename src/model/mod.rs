//! Data model for host transmission analysis.
//!
//! # Hosts
//! Sampled hosts are registered in a [HostRegistry] shared by all trees of a
//! posterior sample and referenced by [HostIndex]. A host seen on a branch is a
//! [HostRef]: a registered host or the `Unsampled` sentinel.
//!
//! # Per-branch data
//! Each node of a BASTA tree carries a [BranchAnnotation] with the host at the
//! lower end of its branch and the number of transmission events on it.
//!
//! # Accumulated data
//! [TransmissionCounters] collect root, direct, indirect and [Origin] counts
//! over all retained trees, keyed sparsely by [HostPair].

pub mod annotation;
pub mod counters;
pub mod host;
pub mod host_registry;

pub use annotation::BranchAnnotation;
pub use counters::{HostPair, TransmissionCounters};
pub use host::{DOUBLE_ORIGIN, HostIndex, HostRef, Origin, OriginLabel, UNSAMPLED};
pub use host_registry::HostRegistry;
