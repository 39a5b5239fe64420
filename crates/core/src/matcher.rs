//! Pairing of one annotation set against another.
//!
//! `match_annotations` indexes the reference set and classifies every probe
//! annotation as matched or mismatched. Only the probe side is classified,
//! so `match(A, B)` and `match(B, A)` can disagree.

use tracing::trace;

use crate::annotation::{Annotation, validate_annotations};
use crate::error::Result;
use crate::geometry::similarity;
use crate::index::AnnotationIndex;
use crate::params::check_threshold;

/// Partition of a probe set, each side in probe input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchOutcome<'a> {
    pub matches: Vec<&'a Annotation>,
    pub mismatches: Vec<&'a Annotation>,
}

impl MatchOutcome<'_> {
    /// True if every probe annotation found a partner.
    pub fn is_agreement(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Classifies each annotation of `probe` against `reference`.
///
/// A probe annotation matches if some reference annotation carries the same
/// label and its box has `similarity > threshold` (strict) with the probe's
/// box. Both sets must be object-detection annotations.
pub fn match_annotations<'a>(
    reference: &[Annotation],
    probe: &'a [Annotation],
    threshold: f64,
) -> Result<MatchOutcome<'a>> {
    check_threshold("threshold", threshold)?;
    validate_annotations(reference, "reference", true)?;
    validate_annotations(probe, "probe", true)?;

    if probe.is_empty() {
        return Ok(MatchOutcome::default());
    }
    if reference.is_empty() {
        return Ok(MatchOutcome {
            matches: Vec::new(),
            mismatches: probe.iter().collect(),
        });
    }

    let index = AnnotationIndex::build(reference)?;
    let mut outcome = MatchOutcome {
        matches: Vec::with_capacity(probe.len()),
        mismatches: Vec::new(),
    };

    for (i, p) in probe.iter().enumerate() {
        // Validated above
        let Some(bbox) = p.bounding_box else {
            outcome.mismatches.push(p);
            continue;
        };
        let partner = index
            .query(&bbox)
            .into_iter()
            .find(|c| c.label() == p.label.as_str() && similarity(&bbox, *c) > threshold);
        match partner {
            Some(c) => {
                trace!(probe = i, reference = c.id, label = %p.label, "matched");
                outcome.matches.push(p);
            }
            None => {
                trace!(probe = i, label = %p.label, "unmatched");
                outcome.mismatches.push(p);
            }
        }
    }

    Ok(outcome)
}
