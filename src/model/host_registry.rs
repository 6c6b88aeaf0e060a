//! Host registry shared by all trees of a posterior sample.
//!
//! - `HostRegistry`: Append-only storage and lookup for sampled host labels.

use crate::model::host::{HostIndex, HostRef, UNSAMPLED};
use std::collections::HashMap;
use std::fmt;

// =#========================================================================#=
// HOST REGISTRY
// =#========================================================================#=
/// Maps sampled host labels (strings) to compact indices.
///
/// The registry grows monotonically while trees are processed and never
/// shrinks, so a [HostIndex] handed out once stays valid for the whole run.
/// Hosts keep their first-seen order, which only affects the ordering of
/// reports. Labels are deduplicated automatically and the `Unsampled`
/// sentinel is never stored.
///
/// # Example
/// ```
/// use basta_network::model::HostRegistry;
///
/// let mut hosts = HostRegistry::new();
///
/// let idx_a = hosts.get_or_insert("H1");  // idx_a = 0
/// let idx_b = hosts.get_or_insert("H2");  // idx_b = 1
/// let idx_a2 = hosts.get_or_insert("H1"); // idx_a2 = 0 (deduplicated)
///
/// assert_eq!(idx_a, idx_a2);
/// assert_eq!(hosts.get_label(idx_b), Some("H2"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HostRegistry {
    /// List of unique host labels, in first-seen order
    hosts: Vec<String>,
    /// Map from label to its index
    map: HashMap<String, HostIndex>,
}

impl HostRegistry {
    /// Creates a new, empty HostRegistry.
    pub fn new() -> Self {
        HostRegistry::default()
    }

    /// Gets the index for a sampled host label, inserting it if it doesn't exist.
    ///
    /// # Arguments
    /// * `label` - The host label to look up or insert; must not be the
    ///   `Unsampled` sentinel
    ///
    /// # Returns
    /// The index associated with this host
    pub fn get_or_insert(&mut self, label: &str) -> HostIndex {
        debug_assert_ne!(label, UNSAMPLED);

        if let Some(&index) = self.map.get(label) {
            index
        } else {
            let idx = self.hosts.len();
            self.hosts.push(label.to_string());
            self.map.insert(label.to_string(), idx);
            idx
        }
    }

    /// Registers a host label unless it is the `Unsampled` sentinel
    /// or already present.
    ///
    /// # Returns
    /// `true` if the label was newly added
    pub fn register(&mut self, label: &str) -> bool {
        if label == UNSAMPLED || self.contains_host(label) {
            return false;
        }
        self.get_or_insert(label);
        true
    }

    /// Retrieves the index for a given host label.
    pub fn get_index(&self, label: &str) -> Option<HostIndex> {
        self.map.get(label).copied()
    }

    /// Resolves a host label as found in an annotation.
    ///
    /// # Returns
    /// * `Some(HostRef::Unsampled)` - for the sentinel label
    /// * `Some(HostRef::Sampled(index))` - for a registered host
    /// * `None` - if the label was never registered
    pub fn resolve(&self, label: &str) -> Option<HostRef> {
        if label == UNSAMPLED {
            Some(HostRef::Unsampled)
        } else {
            self.get_index(label).map(HostRef::Sampled)
        }
    }

    /// Retrieves the host label for a given index.
    pub fn get_label(&self, index: HostIndex) -> Option<&str> {
        self.hosts.get(index).map(|s| s.as_str())
    }

    /// Checks if a host label has been registered.
    pub fn contains_host(&self, label: &str) -> bool {
        self.map.contains_key(label)
    }

    /// Returns the number of registered hosts.
    pub fn num_hosts(&self) -> usize {
        self.hosts.len()
    }

    /// Returns whether no host has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Returns the registered host labels in first-seen order.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }
}

impl fmt::Display for HostRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "HostRegistry ({} hosts):", self.hosts.len())?;
        for (idx, label) in self.hosts.iter().enumerate() {
            writeln!(f, "  [{}] {}", idx, label)?;
        }
        Ok(())
    }
}

impl std::ops::Index<HostIndex> for HostRegistry {
    type Output = str;

    fn index(&self, index: HostIndex) -> &Self::Output {
        &self.hosts[index]
    }
}
