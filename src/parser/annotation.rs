//! Extraction of the host and transmission-count traits from annotation blocks.

use crate::error::AnalysisError;
use crate::model::BranchAnnotation;
use crate::model::annotation::{HOST_TRAIT, TRANSMISSIONS_TRAIT};

/// Extracts the [BranchAnnotation] from text containing a `[...]` block.
///
/// The block spans from the first `[` to the last `]`; text outside of it
/// (labels, branch lengths, a trailing `;`) is ignored. Its interior is split on
/// `,` into trait fragments, each split once on `=` into key and value.
/// Fragments without `=` are ignored, and for repeated keys the last one wins.
///
/// # Arguments
/// * `text` - Node metadata, e.g. `[&host=H1,numTransmissions=2]:0.75`
///
/// # Returns
/// * [BranchAnnotation] - Host label (verbatim) and event count
/// * [AnalysisError] - `MalformedTree` if there is no bracket block or the
///   event count is not a non-negative integer, `MissingTrait` if either trait
///   is absent
///
/// # Example
/// ```
/// use basta_network::parser::extract_annotation;
///
/// let annotation = extract_annotation("B[&host=H2,numTransmissions=1]:1.0").unwrap();
/// assert_eq!(annotation.host, "H2");
/// assert_eq!(annotation.event_count, 1);
/// ```
pub fn extract_annotation(text: &str) -> Result<BranchAnnotation<'_>, AnalysisError> {
    let start = text.find('[').ok_or_else(|| {
        AnalysisError::malformed_tree(text, "Missing '[' of annotation block".to_string())
    })?;
    let end = match text.rfind(']') {
        Some(end) if end > start => end,
        _ => {
            return Err(AnalysisError::malformed_tree(
                text,
                "Missing ']' of annotation block".to_string(),
            ));
        }
    };

    let mut host = None;
    let mut event_count = None;
    for fragment in text[start + 1..end].split(',') {
        let Some((key, value)) = fragment.split_once('=') else {
            continue;
        };
        match key {
            HOST_TRAIT => host = Some(value),
            TRANSMISSIONS_TRAIT => {
                let count = value.trim().parse::<u32>().map_err(|_| {
                    AnalysisError::malformed_tree(
                        text,
                        format!("Invalid number of transmissions '{value}'"),
                    )
                })?;
                event_count = Some(count);
            }
            _ => {}
        }
    }

    match (host, event_count) {
        (Some(host), Some(event_count)) => Ok(BranchAnnotation::new(host, event_count)),
        _ => Err(AnalysisError::missing_trait(
            text,
            format!(
                "could not find {HOST_TRAIT} or {TRANSMISSIONS_TRAIT} \
                 (number of transmission events along branch)"
            ),
        )),
    }
}
