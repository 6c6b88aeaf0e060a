//! Host references and origin labels.
//!
//! Hosts are identified by their position in the [HostRegistry]; the
//! sentinel `Unsampled` host (untraced carriers) is never registered and is
//! represented by its own variant instead.
//!
//! [HostRegistry]: crate::model::HostRegistry

use serde::{Serialize, Serializer};

/// Trait value BASTA uses for hosts that were not sampled
pub const UNSAMPLED: &str = "Unsampled";

/// Label used for conflicting inferred infectors within one tree
pub const DOUBLE_ORIGIN: &str = "doubleOrigin";

/// Index of a sampled host in the [HostRegistry](crate::model::HostRegistry).
pub type HostIndex = usize;

// =#========================================================================#=
// HOST REFERENCE
// =#========================================================================#=
/// A host as seen on a tree branch: either a registered sampled host or the
/// `Unsampled` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HostRef {
    Sampled(HostIndex),
    Unsampled,
}

// =#========================================================================#=
// ORIGIN
// =#========================================================================#=
/// Inferred immediate infector of a host within one tree sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Origin {
    /// Directly infected by this sampled host
    Host(HostIndex),
    /// Infected through an unsampled carrier (or indirectly)
    Unsampled,
    /// Direct infections from different sampled hosts in different branches
    DoubleOrigin,
}

// =#========================================================================#=
// ORIGIN LABEL
// =#========================================================================#=
/// Origin resolved to a host name, as exposed by the final network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OriginLabel {
    Host(String),
    Unsampled,
    DoubleOrigin,
}

impl OriginLabel {
    /// Returns the label as written in reports.
    pub fn as_str(&self) -> &str {
        match self {
            OriginLabel::Host(name) => name,
            OriginLabel::Unsampled => UNSAMPLED,
            OriginLabel::DoubleOrigin => DOUBLE_ORIGIN,
        }
    }
}

impl Serialize for OriginLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
