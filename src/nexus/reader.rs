//! Structs and logic to read the tree samples of a BEAST2 trees file.
//!
//! This module provides the [TreeSampleReaderBuilder] and [TreeSampleReader]
//! structs, which offer methods to read the tree texts of a posterior sample
//! with different configurations.

use crate::error::{AnalysisError, AnalysisErrorType};
use crate::nexus::defs::{TREE, TREE_TEXT_TOKEN};
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, Cursor, Lines};
use std::path::{Path, PathBuf};
use tracing::info;

// =#========================================================================#=
// BURNIN
// =#========================================================================#=
/// Specifies how many initial trees to skip as burnin.
///
/// Burnin is commonly used in MCMC sampling to discard initial trees
/// before the chain has converged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Burnin {
    /// Skip a fixed number of trees.
    ///
    /// # Example
    /// ```no_run
    /// use basta_network::nexus::Burnin;
    /// let burnin = Burnin::Count(1001); // Skip first 1001 trees
    /// ```
    Count(usize),

    /// Skip a fraction of total trees.
    ///
    /// The fraction must be in the range [0.0, 1.0);
    /// behaviour undefined otherwise.
    ///
    /// # Example
    /// ```no_run
    /// use basta_network::nexus::Burnin;
    /// let burnin = Burnin::Percentage(0.2); // Skip first 20% of trees
    /// ```
    Percentage(f64),

    /// Skip a whole-number percentage of total trees, computed in integer
    /// arithmetic, so 29 percent of 100 trees is exactly 29.
    ///
    /// The percentage must be below 100; behaviour undefined otherwise.
    ///
    /// # Example
    /// ```no_run
    /// use basta_network::nexus::Burnin;
    /// let burnin = Burnin::Percent(20); // Skip first 20% of trees
    /// ```
    Percent(u32),
}

impl Burnin {
    /// Calculates the absolute number of trees to skip given the total tree count.
    ///
    /// # Arguments
    /// * `num_total_trees` - Total number of trees in the file
    ///
    /// # Returns
    /// The number of trees to skip as burnin (at most `num_total_trees`)
    pub fn get_count(&self, num_total_trees: usize) -> usize {
        let count = match self {
            Burnin::Count(n) => *n,
            Burnin::Percentage(p) => (num_total_trees as f64 * p).floor() as usize,
            Burnin::Percent(p) => num_total_trees.saturating_mul(*p as usize) / 100,
        };
        count.min(num_total_trees)
    }
}

impl Default for Burnin {
    fn default() -> Self {
        Burnin::Count(0)
    }
}

// =#========================================================================#=
// READING MODE
// =#========================================================================#=
/// Mode of [TreeSampleReader]: eager or lazy.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ReadingMode {
    /// Load all retained tree texts during build
    Eager,
    /// Stream retained tree texts on request
    Lazy,
}

/// Where the trees file content comes from.
#[derive(Debug, Clone)]
enum TreeSource {
    File(PathBuf),
    Text(String),
}

impl TreeSource {
    fn open(&self) -> io::Result<Box<dyn BufRead>> {
        Ok(match self {
            TreeSource::File(path) => Box::new(BufReader::new(File::open(path)?)),
            TreeSource::Text(text) => Box::new(Cursor::new(text.clone().into_bytes())),
        })
    }
}

/// Position and size of the block of tree-sample lines.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TreeBlock {
    /// 0-based line number of the first tree-sample line
    first_line: usize,
    /// Number of whitespace-delimited tokens of every tree-sample line
    num_tokens: usize,
    /// Number of consecutive tree-sample lines
    num_trees: usize,
}

// =#========================================================================#=
// TREE SAMPLE READER BUILDER
// =#========================================================================#=
/// Builder for configuring and creating a [TreeSampleReader].
///
/// # Configuration Options
/// * **Reading mode**: Choose between eager or lazy:
///   - [`eager()`](Self::eager) - Load all retained tree texts during build (default)
///   - [`lazy()`](Self::lazy) - Read tree texts on-demand
///
/// * **Skip first**: Skip the very first tree (the start tree of some MCMC runs)
///   - [`with_skip_first()`](Self::with_skip_first)
///
/// * **Burnin**: Discard initial trees
///   - [`with_burnin()`](Self::with_burnin) - Skip a fixed count or fraction
///
/// # Example
/// ```no_run
/// use basta_network::nexus::{Burnin, TreeSampleReaderBuilder};
///
/// let mut reader = TreeSampleReaderBuilder::for_file("outbreak.trees")
///     .with_burnin(Burnin::Percentage(0.2))
///     .lazy()
///     .build()?;
///
/// while let Some(tree) = reader.next_tree()? {
///     println!("{} characters", tree.len());
/// }
/// # Ok::<(), basta_network::AnalysisError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TreeSampleReaderBuilder {
    source: TreeSource,
    mode: ReadingMode,
    burnin: Burnin,
    skip_first: bool,
}

impl TreeSampleReaderBuilder {
    /// Creates a new builder reading from a file, with default settings:
    /// - Eager mode
    /// - First tree not skipped
    /// - No burnin (all trees included)
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    pub fn for_file<P: AsRef<Path>>(path: P) -> Self {
        Self::with_source(TreeSource::File(path.as_ref().to_path_buf()))
    }

    /// Creates a new builder reading from in-memory trees file content,
    /// with the same defaults as [for_file()](Self::for_file).
    pub fn for_str<S: Into<String>>(content: S) -> Self {
        Self::with_source(TreeSource::Text(content.into()))
    }

    fn with_source(source: TreeSource) -> Self {
        TreeSampleReaderBuilder {
            source,
            mode: ReadingMode::Eager,
            burnin: Burnin::default(),
            skip_first: false,
        }
    }

    /// Configure the reader to load all retained tree texts during build.
    ///
    /// This is the **default mode**.
    pub fn eager(mut self) -> Self {
        self.mode = ReadingMode::Eager;
        self
    }

    /// Configure the reader to read tree texts one at a time
    /// as [next_tree()](TreeSampleReader::next_tree) is called.
    pub fn lazy(mut self) -> Self {
        self.mode = ReadingMode::Lazy;
        self
    }

    /// Configure burnin, i.e., discard initial trees.
    ///
    /// If both burnin and [with_skip_first()](Self::with_skip_first) are
    /// configured, the first tree is skipped, then burnin is applied to the
    /// remaining trees.
    pub fn with_burnin(mut self, burnin: Burnin) -> Self {
        self.burnin = burnin;
        self
    }

    /// Configure the reader to skip the first tree.
    pub fn with_skip_first(mut self) -> Self {
        self.skip_first = true;
        self
    }

    /// Locates the tree-sample block, applies skip-first and burnin and
    /// prepares the reader.
    ///
    /// # Errors
    /// * `IoError` - If the source cannot be read
    /// * `MissingTreesBlock` - If no tree-sample line exists
    /// * `UnexpectedEOF` - (eager mode) if the file shrank between passes
    pub fn build(self) -> Result<TreeSampleReader, AnalysisError> {
        let block = locate_tree_block(self.source.open()?)?;

        let num_first_skipped = usize::from(self.skip_first);
        let num_candidates = block.num_trees - num_first_skipped;
        let num_burnin_trees = self.burnin.get_count(num_candidates);
        let num_trees = num_candidates - num_burnin_trees;
        info!(
            "The first {num_burnin_trees} trees out of {num_candidates} will be discarded as burnin."
        );

        // Position a fresh line iterator at the first retained tree
        let mut lines = self.source.open()?.lines();
        let num_lines_to_skip = block.first_line + num_first_skipped + num_burnin_trees;
        for line in lines.by_ref().take(num_lines_to_skip) {
            line?;
        }

        let mut reader = TreeSampleReader {
            lines,
            buffered: None,
            num_total_trees: block.num_trees,
            num_burnin_trees,
            num_trees,
            num_read: 0,
        };

        if self.mode == ReadingMode::Eager {
            let mut trees = Vec::with_capacity(num_trees);
            while let Some(tree) = reader.read_next_line()? {
                trees.push(tree);
            }
            reader.buffered = Some(trees.into_iter());
        }

        Ok(reader)
    }
}

// =#========================================================================#=
// TREE SAMPLE READER
// =#========================================================================#=
/// Reader handing out the tree texts of the retained (post-burnin) samples.
///
/// Created by [TreeSampleReaderBuilder::build()].
pub struct TreeSampleReader {
    lines: Lines<Box<dyn BufRead>>,
    /// Tree texts loaded in eager mode
    buffered: Option<std::vec::IntoIter<String>>,
    num_total_trees: usize,
    num_burnin_trees: usize,
    num_trees: usize,
    /// Number of retained trees read from `lines` so far
    num_read: usize,
}

impl TreeSampleReader {
    /// Returns the next retained tree text, or `None` once all were returned.
    ///
    /// # Errors
    /// * `IoError` - If reading fails
    /// * `UnexpectedEOF` - If the file ended before all counted trees were read
    /// * `MalformedTree` - If a tree-sample line has no tree text token
    pub fn next_tree(&mut self) -> Result<Option<String>, AnalysisError> {
        match self.buffered.as_mut() {
            Some(trees) => Ok(trees.next()),
            None => self.read_next_line(),
        }
    }

    /// Returns all remaining retained tree texts.
    pub fn into_tree_texts(mut self) -> Result<Vec<String>, AnalysisError> {
        if let Some(trees) = self.buffered.take() {
            return Ok(trees.collect());
        }
        let mut trees = Vec::with_capacity(self.num_trees - self.num_read);
        while let Some(tree) = self.read_next_line()? {
            trees.push(tree);
        }
        Ok(trees)
    }

    /// Number of retained trees (after skip-first and burnin).
    pub fn num_trees(&self) -> usize {
        self.num_trees
    }

    /// Number of tree samples in the file, including skipped ones.
    pub fn num_total_trees(&self) -> usize {
        self.num_total_trees
    }

    /// Number of trees discarded as burnin.
    pub fn num_burnin_trees(&self) -> usize {
        self.num_burnin_trees
    }

    fn read_next_line(&mut self) -> Result<Option<String>, AnalysisError> {
        if self.num_read == self.num_trees {
            return Ok(None);
        }
        let line = self
            .lines
            .next()
            .ok_or_else(|| AnalysisError::without_context(AnalysisErrorType::UnexpectedEOF))??;
        self.num_read += 1;
        tree_text(&line).map(Some)
    }
}

// ============================================================================
// Quick API (pub)
// ============================================================================
/// Reads the retained tree texts from in-memory trees file content.
///
/// # Example
/// ```
/// use basta_network::nexus::{Burnin, read_tree_texts_from_str};
///
/// let content = "#NEXUS\nBegin trees;\n\
///     tree STATE_0 = (A[&host=H1,numTransmissions=0],B[&host=H1,numTransmissions=0])[&host=H1,numTransmissions=0];\n\
///     tree STATE_1 = (A[&host=H2,numTransmissions=0],B[&host=H2,numTransmissions=0])[&host=H2,numTransmissions=0];\n\
///     End;\n";
/// let trees = read_tree_texts_from_str(content, Burnin::Count(1)).unwrap();
/// assert_eq!(trees.len(), 1);
/// assert!(trees[0].contains("H2"));
/// ```
pub fn read_tree_texts_from_str(
    content: &str,
    burnin: Burnin,
) -> Result<Vec<String>, AnalysisError> {
    TreeSampleReaderBuilder::for_str(content)
        .with_burnin(burnin)
        .build()?
        .into_tree_texts()
}

// ============================================================================
// Helpers (private)
// ============================================================================
/// Finds the first tree-sample line and counts the consecutive tree-sample
/// lines with the same number of tokens.
fn locate_tree_block<R: BufRead>(reader: R) -> Result<TreeBlock, AnalysisError> {
    let mut block: Option<TreeBlock> = None;

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let num_tokens = line.split_whitespace().count();
        let is_tree_line = line.split_whitespace().next() == Some(TREE);

        match block {
            None if is_tree_line => {
                block = Some(TreeBlock {
                    first_line: line_index,
                    num_tokens,
                    num_trees: 1,
                });
            }
            None => {}
            Some(ref mut b) if is_tree_line && num_tokens == b.num_tokens => b.num_trees += 1,
            Some(_) => break,
        }
    }

    block.ok_or_else(AnalysisError::missing_trees_block)
}

/// Extracts the tree text token of a tree-sample line.
fn tree_text(line: &str) -> Result<String, AnalysisError> {
    line.split_whitespace()
        .nth(TREE_TEXT_TOKEN)
        .map(str::to_string)
        .ok_or_else(|| {
            AnalysisError::malformed_tree(line, "Tree line without tree text".to_string())
        })
}
