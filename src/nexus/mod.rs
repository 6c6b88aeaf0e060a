//! Reading tree samples from BEAST2 `.trees` (NEXUS) files.
//!
//! This module provides [TreeSampleReaderBuilder] / [TreeSampleReader] for
//! reading the tree texts of a posterior sample, with options for burnin and
//! skipping the first tree. Supports eager (load all retained trees) and lazy
//! (read on-demand) modes.
//!
//! # Quick API
//! - [`read_tree_texts`] - reads a file, returns the retained tree texts
//! - [`read_tree_texts_from_str`] - the same for in-memory content
//!
//! # Format
//! Only the tree-sample lines of the file are of interest:
//! * A tree-sample line starts with the token `tree`, as in
//!   `tree STATE_1000 = (...)[&host=H1,numTransmissions=0]:0.0;`
//! * The tree text is the fourth whitespace-delimited token of such a line
//! * The sample is the run of consecutive tree-sample lines having the same
//!   number of tokens as the first one; anything before it (TAXA block,
//!   TRANSLATE command) is ignored, and the first other line (`End;`) ends it

mod defs;
mod reader;

pub use self::reader::{
    Burnin, TreeSampleReader, TreeSampleReaderBuilder, read_tree_texts_from_str,
};

use crate::error::AnalysisError;
use std::path::Path;

// ============================================================================
// QUICK READING API (public)
// ============================================================================
/// Reads a BEAST2 trees file eagerly and returns the retained tree texts.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
/// * `burnin` - Number or fraction of initial trees to discard
///
/// # Errors
/// Returns an error if the file cannot be read or contains no tree samples.
pub fn read_tree_texts<P: AsRef<Path>>(
    path: P,
    burnin: Burnin,
) -> Result<Vec<String>, AnalysisError> {
    TreeSampleReaderBuilder::for_file(path)
        .with_burnin(burnin)
        .eager()
        .build()?
        .into_tree_texts()
}
