//! Inferred transmission network and its writers.
//!
//! This module provides:
//! - [TransmissionNetwork] - queryable probabilities derived from the counts
//!   of all retained trees
//! - [NetworkWriter] - for writing the network as a text report or JSON
//!
//! # Probabilities
//! Every probability is a count divided by the number of retained trees:
//! * root: trees rooted in the host
//! * direct: trees with a direct transmission `from -> to`
//! * indirect: trees with an indirect transmission `from -> to`
//! * origin: trees in which the host's immediate infector was the given label

mod writer;

pub use writer::{NetworkWriter, write_network_files};

use crate::model::{HostIndex, HostRef, HostRegistry, Origin, OriginLabel, TransmissionCounters};
use serde::Serialize;

// =#========================================================================#=
// TRANSMISSION EDGE
// =#========================================================================#=
/// A weighted, directed host pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransmissionEdge {
    pub from: String,
    pub to: String,
    pub probability: f64,
}

// =#========================================================================#=
// ORIGIN PROBABILITY
// =#========================================================================#=
/// Probability that a host's immediate infector is the given origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginProbability {
    pub origin: OriginLabel,
    pub probability: f64,
}

// =#========================================================================#=
// TRANSMISSION NETWORK
// =#========================================================================#=
/// Host-to-host transmission network estimated from a posterior tree sample.
///
/// Hosts are kept in first-seen order and all matrices are indexed
/// `[from][to]` by host position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransmissionNetwork {
    hosts: Vec<String>,
    num_trees: usize,
    root_probabilities: Vec<f64>,
    unsampled_root_probability: f64,
    direct: Vec<Vec<f64>>,
    indirect: Vec<Vec<f64>>,
    mean_hops: Vec<Vec<Option<f64>>>,
    /// Per destination host: other hosts in host order, then `Unsampled`,
    /// then `doubleOrigin`; only origins observed at least once
    origins: Vec<Vec<OriginProbability>>,
}

// ============================================================================
// Construction (crate)
// ============================================================================
impl TransmissionNetwork {
    /// Divides all counts by the number of folded trees.
    ///
    /// The caller guarantees `counters.num_trees() > 0`.
    pub(crate) fn from_counters(registry: &HostRegistry, counters: &TransmissionCounters) -> Self {
        let n = registry.num_hosts();
        let num_trees = counters.num_trees();
        let probability = |count: usize| count as f64 / num_trees as f64;

        let root_probabilities = (0..n)
            .map(|host| probability(counters.root_count(HostRef::Sampled(host))))
            .collect();

        let matrix = |count: &dyn Fn(HostIndex, HostIndex) -> usize| -> Vec<Vec<f64>> {
            (0..n)
                .map(|from| (0..n).map(|to| probability(count(from, to))).collect())
                .collect()
        };
        let direct = matrix(&|from, to| counters.direct_count(from, to));
        let indirect = matrix(&|from, to| counters.indirect_count(from, to));

        let mean_hops = (0..n)
            .map(|from| {
                (0..n)
                    .map(|to| {
                        let hops = counters.indirect_hops(from, to);
                        if hops.is_empty() {
                            None
                        } else {
                            let sum: u64 = hops.iter().map(|&h| h as u64).sum();
                            Some(sum as f64 / hops.len() as f64)
                        }
                    })
                    .collect()
            })
            .collect();

        let origins = (0..n)
            .map(|host| {
                let mut observed: Vec<(Origin, usize)> = counters.origins_of(host).collect();
                // Origin's derived order: hosts by index, then Unsampled, then DoubleOrigin
                observed.sort();
                observed
                    .into_iter()
                    .filter(|(origin, _)| *origin != Origin::Host(host))
                    .map(|(origin, count)| OriginProbability {
                        origin: match origin {
                            Origin::Host(index) => OriginLabel::Host(registry[index].to_string()),
                            Origin::Unsampled => OriginLabel::Unsampled,
                            Origin::DoubleOrigin => OriginLabel::DoubleOrigin,
                        },
                        probability: probability(count),
                    })
                    .collect()
            })
            .collect();

        TransmissionNetwork {
            hosts: registry.hosts().to_vec(),
            num_trees,
            root_probabilities,
            unsampled_root_probability: probability(counters.root_count(HostRef::Unsampled)),
            direct,
            indirect,
            mean_hops,
            origins,
        }
    }
}

// ============================================================================
// Queries (pub)
// ============================================================================
impl TransmissionNetwork {
    /// Sampled hosts in first-seen order.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn num_hosts(&self) -> usize {
        self.hosts.len()
    }

    /// Number of retained trees the probabilities are based on.
    pub fn num_trees(&self) -> usize {
        self.num_trees
    }

    /// Position of `host` in [hosts()](Self::hosts).
    pub fn host_index(&self, host: &str) -> Option<usize> {
        self.hosts.iter().position(|h| h == host)
    }

    /// Probability that `host` is the root host.
    pub fn root_probability(&self, host: &str) -> Option<f64> {
        self.host_index(host).map(|i| self.root_probabilities[i])
    }

    /// Probability that the root host is unsampled.
    pub fn unsampled_root_probability(&self) -> f64 {
        self.unsampled_root_probability
    }

    /// Probability of a direct transmission `from -> to`.
    pub fn direct_probability(&self, from: &str, to: &str) -> Option<f64> {
        self.pair(from, to).map(|(i, j)| self.direct[i][j])
    }

    /// Probability of an indirect transmission `from -> to`
    /// (through unsampled intermediaries).
    pub fn indirect_probability(&self, from: &str, to: &str) -> Option<f64> {
        self.pair(from, to).map(|(i, j)| self.indirect[i][j])
    }

    /// Probability of a direct or indirect transmission `from -> to`.
    pub fn transmission_probability(&self, from: &str, to: &str) -> Option<f64> {
        self.pair(from, to)
            .map(|(i, j)| self.direct[i][j] + self.indirect[i][j])
    }

    /// Mean number of transmission events collapsed into the indirect
    /// transmissions `from -> to`; `None` if there were none.
    pub fn mean_hops(&self, from: &str, to: &str) -> Option<f64> {
        self.pair(from, to).and_then(|(i, j)| self.mean_hops[i][j])
    }

    /// Observed origins of `host` with their probabilities.
    pub fn origin_probabilities(&self, host: &str) -> Option<&[OriginProbability]> {
        self.host_index(host).map(|i| self.origins[i].as_slice())
    }

    /// Probability that `host` had the given origin; zero if never observed.
    pub fn origin_probability(&self, host: &str, origin: &OriginLabel) -> Option<f64> {
        self.origin_probabilities(host).map(|origins| {
            origins
                .iter()
                .find(|o| &o.origin == origin)
                .map_or(0.0, |o| o.probability)
        })
    }

    /// Root probabilities, indexed by host position.
    pub fn root_probabilities(&self) -> &[f64] {
        &self.root_probabilities
    }

    /// Direct transmission probabilities, indexed `[from][to]`.
    pub fn direct_matrix(&self) -> &[Vec<f64>] {
        &self.direct
    }

    /// Indirect transmission probabilities, indexed `[from][to]`.
    pub fn indirect_matrix(&self) -> &[Vec<f64>] {
        &self.indirect
    }

    /// Direct transmissions with probability strictly above `min_value`,
    /// excluding a host to itself.
    pub fn direct_edges(&self, min_value: f64) -> Vec<TransmissionEdge> {
        self.edges(min_value, |i, j| self.direct[i][j])
    }

    /// Direct or indirect transmissions with combined probability strictly
    /// above `min_value`, excluding a host to itself.
    pub fn transmission_edges(&self, min_value: f64) -> Vec<TransmissionEdge> {
        self.edges(min_value, |i, j| self.direct[i][j] + self.indirect[i][j])
    }
}

// ============================================================================
// Helpers (private)
// ============================================================================
impl TransmissionNetwork {
    fn pair(&self, from: &str, to: &str) -> Option<(usize, usize)> {
        Some((self.host_index(from)?, self.host_index(to)?))
    }

    fn edges(&self, min_value: f64, weight: impl Fn(usize, usize) -> f64) -> Vec<TransmissionEdge> {
        let mut edges = Vec::new();
        for (i, from) in self.hosts.iter().enumerate() {
            for (j, to) in self.hosts.iter().enumerate() {
                let probability = weight(i, j);
                if i != j && probability > min_value {
                    edges.push(TransmissionEdge {
                        from: from.clone(),
                        to: to.clone(),
                        probability,
                    });
                }
            }
        }
        edges
    }
}
