//! Object-detection consensus.
//!
//! Only the two or three most recent contributions are consulted. The most
//! recent one is the reference; the one before it must agree with it, and if
//! it doesn't, the third most recent gets to break the tie.

use tracing::debug;

use super::is_submission_ordered;
use crate::annotation::{Contribution, Status, validate_annotations};
use crate::error::Result;
use crate::matcher::match_annotations;
use crate::params::{ConsensusParams, check_threshold};

/// Derives a status from the most recent contributions' bounding boxes.
///
/// `contributions` must be ordered by submission time, most recent last.
/// Supplying them in any other order silently changes the outcome; debug
/// builds assert the ordering. Contributions older than the third most
/// recent are neither consulted nor validated.
pub fn decide_object_detection_status(
    contributions: &[Contribution],
    params: &ConsensusParams,
) -> Result<Status> {
    debug_assert!(
        is_submission_ordered(contributions),
        "contributions must be sorted by submission time, most recent last"
    );
    let threshold = check_threshold("similarityThreshold", params.similarity_threshold)?;

    let n = contributions.len();
    if n < 2 {
        debug!(contributions = n, "too few contributions for consensus");
        return Ok(Status::TagPending);
    }

    let consulted = n.saturating_sub(3);
    for (i, contribution) in contributions.iter().enumerate().skip(consulted) {
        validate_annotations(
            &contribution.annotations,
            &format!("contributions[{i}].annotations"),
            true,
        )?;
    }

    let reference = &contributions[n - 1];
    let second = &contributions[n - 2];
    let primary = match_annotations(&reference.annotations, &second.annotations, threshold)?;
    debug!(
        reference = %reference.contribution_id,
        probe = %second.contribution_id,
        matches = primary.matches.len(),
        mismatches = primary.mismatches.len(),
        "primary comparison"
    );
    if primary.is_agreement() {
        return Ok(Status::ReadyForTraining);
    }

    let Some(third) = n.checked_sub(3).map(|i| &contributions[i]) else {
        debug!("no tie-breaking contribution available");
        return Ok(Status::InConflict);
    };
    let secondary = match_annotations(&reference.annotations, &third.annotations, threshold)?;
    debug!(
        reference = %reference.contribution_id,
        probe = %third.contribution_id,
        matches = secondary.matches.len(),
        mismatches = secondary.mismatches.len(),
        "tie-break comparison"
    );
    if secondary.is_agreement() {
        Ok(Status::ReadyForTraining)
    } else {
        Ok(Status::InConflict)
    }
}
