//! Transmission classification of one annotated tree.
//!
//! The classifier walks a tree from the root, carrying the nearest ancestor
//! host (`parent`) and the number of transmission events accumulated since
//! that ancestor was left (`carry`). Every edge is classified into exactly one
//! [EdgeClass], checked in this order:
//!
//! | Class | Condition | Effect |
//! |-------|-----------|--------|
//! | [NoOp](EdgeClass::NoOp) | `events == 0` | pass `parent`, `carry` on |
//! | [IntoUnsampled](EdgeClass::IntoUnsampled) | host is `Unsampled` | `carry += events` |
//! | [OutOfUnsampled](EdgeClass::OutOfUnsampled) | parent is `Unsampled` | origin defaults to `Unsampled` |
//! | [Direct](EdgeClass::Direct) | other host, `events + carry == 1` | direct pair, origin = parent |
//! | [Indirect](EdgeClass::Indirect) | other host, `events + carry > 1` | indirect pair, origin defaults to `Unsampled` |
//! | [SelfLoop](EdgeClass::SelfLoop) | same host, `events + carry >= 2` | indirect pair `(host, host)` |
//!
//! After any of the last four classes, the children continue with
//! `parent = host` and `carry = 0`.
//!
//! Within one tree a host pair is recorded at most once, either as direct or
//! as indirect, whichever is met first in pre-order.

use crate::error::AnalysisError;
use crate::model::{BranchAnnotation, HostIndex, HostPair, HostRef, HostRegistry, Origin};
use crate::parser::{scan_node, split_children};
use std::collections::{BTreeMap, HashMap, HashSet};

// =#========================================================================#=
// EDGE CLASS
// =#========================================================================#=
/// The mutually exclusive ways an edge can be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeClass {
    /// No transmission event on the branch
    NoOp,
    /// Branch ends in an unsampled host; its events are carried on
    IntoUnsampled,
    /// First sampled host below an unsampled ancestor
    OutOfUnsampled,
    /// Exactly one event between two different sampled hosts
    Direct,
    /// Two or more events between two different sampled hosts
    Indirect,
    /// Two or more events leading from a sampled host back to itself
    SelfLoop,
}

// =#========================================================================#=
// TREE TALLY
// =#========================================================================#=
/// Statistics of one classified tree, to be folded into global counters.
#[derive(Debug, Clone)]
pub struct TreeTally {
    root: HostRef,
    direct: Vec<HostPair>,
    indirect: Vec<(HostPair, u32)>,
    origins: HashMap<HostIndex, Origin>,
    edge_classes: BTreeMap<EdgeClass, usize>,
}

impl TreeTally {
    fn new(root: HostRef) -> Self {
        TreeTally {
            root,
            direct: Vec::new(),
            indirect: Vec::new(),
            origins: HashMap::new(),
            edge_classes: BTreeMap::new(),
        }
    }

    /// Host of the root.
    pub fn root(&self) -> HostRef {
        self.root
    }

    /// Host pairs recorded as direct transmissions, in order of discovery.
    pub fn direct_pairs(&self) -> &[HostPair] {
        &self.direct
    }

    /// Host pairs recorded as indirect transmissions with their hop counts.
    pub fn indirect_pairs(&self) -> &[(HostPair, u32)] {
        &self.indirect
    }

    /// Origin of `host` in this tree, if any was inferred.
    pub fn origin_of(&self, host: HostIndex) -> Option<Origin> {
        self.origins.get(&host).copied()
    }

    /// All inferred origins of this tree.
    pub fn origins(&self) -> impl Iterator<Item = (HostIndex, Origin)> + '_ {
        self.origins.iter().map(|(host, origin)| (*host, *origin))
    }

    /// Number of edges classified as `class`.
    pub fn edge_count(&self, class: EdgeClass) -> usize {
        self.edge_classes.get(&class).copied().unwrap_or(0)
    }

    /// Number of classified edges (all non-root nodes reached).
    pub fn num_edges(&self) -> usize {
        self.edge_classes.values().sum()
    }
}

// =#========================================================================#=
// PER TREE STATE
// =#========================================================================#=
/// De-duplication sets of the tree currently being classified.
#[derive(Debug, Default)]
struct PerTreeState {
    seen_direct: HashMap<HostIndex, HashSet<HostIndex>>,
    seen_indirect: HashMap<HostIndex, HashSet<HostIndex>>,
}

impl PerTreeState {
    /// Whether the pair was already recorded in either category.
    fn is_recorded(&self, (from, to): HostPair) -> bool {
        let seen = |sets: &HashMap<HostIndex, HashSet<HostIndex>>| {
            sets.get(&from).is_some_and(|targets| targets.contains(&to))
        };
        seen(&self.seen_direct) || seen(&self.seen_indirect)
    }
}

/// Pending edge: a node with the state inherited from its ancestors.
struct Frame<'a> {
    node: &'a str,
    parent: HostRef,
    carry: u32,
}

// =#========================================================================#=
// CLASSIFIER
// =#========================================================================#=
struct Classifier<'r> {
    registry: &'r HostRegistry,
    state: PerTreeState,
    tally: TreeTally,
}

// ============================================================================
// API (pub)
// ============================================================================
/// Classifies all edges of one annotated tree.
///
/// The root's own host (possibly `Unsampled`) starts as `parent` with
/// `carry = 0`, so no event is attributed to the root's incoming branch.
/// A sampled root starts out with origin `Unsampled`.
///
/// All sampled hosts of the tree must have been registered beforehand,
/// see [discover_hosts](crate::analysis::discover_hosts).
///
/// # Arguments
/// * `tree` - Whole annotated tree text (root clause plus root annotation)
/// * `registry` - Registry containing all hosts of `tree`
///
/// # Returns
/// * [TreeTally] - The tree's root, recorded pairs and origins
/// * [AnalysisError] - If the tree is malformed, lacks traits, or contains
///   event counts that are inconsistent with the transmission model
pub fn classify_tree(tree: &str, registry: &HostRegistry) -> Result<TreeTally, AnalysisError> {
    let (clause, root_annotation) = scan_node(tree)?;
    let root = resolve_host(registry, &root_annotation, tree)?;

    let mut tally = TreeTally::new(root);
    if let HostRef::Sampled(root_index) = root {
        tally.origins.insert(root_index, Origin::Unsampled);
    }
    let mut classifier = Classifier {
        registry,
        state: PerTreeState::default(),
        tally,
    };

    let mut stack = Vec::new();
    push_children(&mut stack, clause, root, 0)?;

    while let Some(frame) = stack.pop() {
        let (clause, annotation) = scan_node(frame.node)?;
        let (parent, carry) = classifier.classify_edge(&frame, &annotation)?;
        push_children(&mut stack, clause, parent, carry)?;
    }

    Ok(classifier.tally)
}

// ============================================================================
// Edge classification (private)
// ============================================================================
impl Classifier<'_> {
    /// Classifies one edge and returns the `(parent, carry)` for its children.
    fn classify_edge(
        &mut self,
        frame: &Frame,
        annotation: &BranchAnnotation,
    ) -> Result<(HostRef, u32), AnalysisError> {
        let events = annotation.event_count;
        if events == 0 {
            self.count(EdgeClass::NoOp);
            return Ok((frame.parent, frame.carry));
        }

        let host = resolve_host(self.registry, annotation, frame.node)?;
        let HostRef::Sampled(to) = host else {
            self.count(EdgeClass::IntoUnsampled);
            return Ok((frame.parent, frame.carry.saturating_add(events)));
        };

        let HostRef::Sampled(from) = frame.parent else {
            self.count(EdgeClass::OutOfUnsampled);
            self.tally.origins.entry(to).or_insert(Origin::Unsampled);
            return Ok((host, 0));
        };

        let total = events.saturating_add(frame.carry);
        if from != to {
            match total {
                0 => {
                    return Err(AnalysisError::inconsistent_event_count(
                        frame.node,
                        "zero events between two different hosts".to_string(),
                    ));
                }
                1 => self.record_direct((from, to)),
                _ => self.record_indirect((from, to), total, EdgeClass::Indirect),
            }
        } else {
            if total < 2 {
                return Err(AnalysisError::inconsistent_event_count(
                    frame.node,
                    format!(
                        "{total} event(s) from host {} back to itself",
                        annotation.host
                    ),
                ));
            }
            self.record_indirect((from, to), total, EdgeClass::SelfLoop);
        }

        Ok((host, 0))
    }

    fn record_direct(&mut self, pair @ (from, to): HostPair) {
        self.count(EdgeClass::Direct);
        if !self.state.is_recorded(pair) {
            self.state.seen_direct.entry(from).or_default().insert(to);
            self.tally.direct.push(pair);
        }

        let origin = match self.tally.origins.get(&to) {
            Some(&existing) if existing != Origin::Host(from) && existing != Origin::Unsampled => {
                Origin::DoubleOrigin
            }
            _ => Origin::Host(from),
        };
        self.tally.origins.insert(to, origin);
    }

    fn record_indirect(&mut self, pair @ (from, to): HostPair, hops: u32, class: EdgeClass) {
        self.count(class);
        if !self.state.is_recorded(pair) {
            self.state.seen_indirect.entry(from).or_default().insert(to);
            self.tally.indirect.push((pair, hops));
        }
        self.tally.origins.entry(to).or_insert(Origin::Unsampled);
    }

    fn count(&mut self, class: EdgeClass) {
        *self.tally.edge_classes.entry(class).or_insert(0) += 1;
    }
}

// ============================================================================
// Helpers (private)
// ============================================================================
/// Pushes the two children of `clause` (if any), first child on top.
fn push_children<'a>(
    stack: &mut Vec<Frame<'a>>,
    clause: Option<&'a str>,
    parent: HostRef,
    carry: u32,
) -> Result<(), AnalysisError> {
    let Some(clause) = clause else {
        return Ok(());
    };
    if let Some((first, second)) = split_children(clause)? {
        stack.push(Frame {
            node: second,
            parent,
            carry,
        });
        stack.push(Frame {
            node: first,
            parent,
            carry,
        });
    }
    Ok(())
}

fn resolve_host(
    registry: &HostRegistry,
    annotation: &BranchAnnotation,
    node: &str,
) -> Result<HostRef, AnalysisError> {
    registry.resolve(annotation.host).ok_or_else(|| {
        AnalysisError::malformed_tree(
            node,
            format!(
                "Host {} was not registered before classification",
                annotation.host
            ),
        )
    })
}
