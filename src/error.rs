//! Error types for reading and analysing BASTA tree samples.
//!
//! This module provides [AnalysisError] and [AnalysisErrorType] for
//! representing and reporting errors that occur while scanning annotated
//! trees, classifying their transmissions and aggregating the results.
//!
//! All errors are fatal for the current run: a single malformed tree
//! invalidates the aggregate over the whole posterior sample.

use std::error::Error;
use std::fmt;

/// Default length of context (in characters) attached to an error
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// ANALYSIS ERROR TYPE
// =#========================================================================#=
/// Error types that can occur while analysing BASTA tree samples.
#[derive(PartialEq, Debug, Clone)]
pub enum AnalysisErrorType {
    IoError(String),
    UnexpectedEOF,
    /// No `tree ...` line found; likely not a BEAST2 trees file
    MissingTreesBlock,
    /// Structural grammar violation (missing parentheses or brackets, bad counts)
    MalformedTree(String),
    /// Annotation lacks the host or the event-count trait
    MissingTrait(String),
    /// Event count that the transmission model rules out
    InconsistentEventCount(String),
    /// Zero trees left after burn-in
    EmptySampleSet,
    InvalidConfig(String),
    Serialization(String),
}

// =#========================================================================#=
// ANALYSIS ERROR
// =#========================================================================#=
/// Analysis error with contextual information
/// (index of the failing tree and a snippet of the offending text).
#[derive(Debug)]
pub struct AnalysisError {
    kind: AnalysisErrorType,
    tree_index: Option<usize>,
    context: String,
}

impl AnalysisError {
    /// Create an AnalysisError from an error type and the offending text
    pub fn from_text(kind: AnalysisErrorType, text: &str) -> Self {
        Self {
            kind,
            tree_index: None,
            context: text.chars().take(DEFAULT_CONTEXT_LENGTH).collect(),
        }
    }

    /// Convenience constructor for MalformedTree
    pub fn malformed_tree(text: &str, msg: String) -> Self {
        Self::from_text(AnalysisErrorType::MalformedTree(msg), text)
    }

    /// Convenience constructor for MissingTrait
    pub fn missing_trait(text: &str, msg: String) -> Self {
        Self::from_text(AnalysisErrorType::MissingTrait(msg), text)
    }

    /// Convenience constructor for InconsistentEventCount
    pub fn inconsistent_event_count(text: &str, msg: String) -> Self {
        Self::from_text(AnalysisErrorType::InconsistentEventCount(msg), text)
    }

    /// Convenience constructor for MissingTreesBlock
    pub fn missing_trees_block() -> Self {
        Self::without_context(AnalysisErrorType::MissingTreesBlock)
    }

    /// Convenience constructor for EmptySampleSet
    pub fn empty_sample_set() -> Self {
        Self::without_context(AnalysisErrorType::EmptySampleSet)
    }

    /// Convenience constructor for InvalidConfig
    pub fn invalid_config(msg: String) -> Self {
        Self::without_context(AnalysisErrorType::InvalidConfig(msg))
    }

    /// Create an AnalysisError without text context
    pub fn without_context(kind: AnalysisErrorType) -> Self {
        Self {
            kind,
            tree_index: None,
            context: String::new(),
        }
    }

    /// Attaches the (0-based) index of the retained tree the error occurred in.
    pub fn in_tree(mut self, tree_index: usize) -> Self {
        self.tree_index = Some(tree_index);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> &AnalysisErrorType {
        &self.kind
    }

    /// Get the index of the tree the error occurred in, if known
    pub fn tree_index(&self) -> Option<usize> {
        self.tree_index
    }

    /// Get the snippet of offending text
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Main error message
        match &self.kind {
            AnalysisErrorType::IoError(msg) => write!(f, "IO error - {msg}")?,
            AnalysisErrorType::UnexpectedEOF => write!(f, "Unexpected end of file")?,
            AnalysisErrorType::MissingTreesBlock => write!(
                f,
                "No tree samples found - is this a BEAST2 trees output file?"
            )?,
            AnalysisErrorType::MalformedTree(msg) => write!(f, "Malformed tree - {msg}")?,
            AnalysisErrorType::MissingTrait(msg) => {
                write!(f, "Traits in tree are not recognised: {msg}")?
            }
            AnalysisErrorType::InconsistentEventCount(msg) => {
                write!(f, "Inconsistent number of transmission events - {msg}")?
            }
            AnalysisErrorType::EmptySampleSet => {
                write!(f, "No trees left to analyse after burnin")?
            }
            AnalysisErrorType::InvalidConfig(msg) => write!(f, "Invalid configuration - {msg}")?,
            AnalysisErrorType::Serialization(msg) => write!(f, "Serialization error - {msg}")?,
        }

        // Additional tree information
        if let Some(index) = self.tree_index {
            write!(f, " in tree {index} (after burnin)")?;
        }

        // Additional context if available
        if !self.context.is_empty() {
            write!(f, "\n  Context: {}", self.context)?;
        }

        Ok(())
    }
}

impl Error for AnalysisError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::without_context(AnalysisErrorType::IoError(err.to_string()))
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::without_context(AnalysisErrorType::Serialization(err.to_string()))
    }
}
