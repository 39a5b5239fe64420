//! Single-label consensus.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::annotation::{Contribution, Status, validate_annotations};
use crate::error::Result;

/// Derives a status from the distinct labels across all contributions.
///
/// No labels at all leaves the image pending, a single label everyone agrees
/// on makes it ready, and any disagreement is a conflict. Bounding boxes are
/// ignored.
pub fn decide_classification_status(contributions: &[Contribution]) -> Result<Status> {
    let mut labels = FxHashSet::default();
    for (i, contribution) in contributions.iter().enumerate() {
        validate_annotations(
            &contribution.annotations,
            &format!("contributions[{i}].annotations"),
            false,
        )?;
        labels.extend(contribution.annotations.iter().map(|a| a.label.as_str()));
    }

    let status = match labels.len() {
        0 => Status::TagPending,
        1 => Status::ReadyForTraining,
        _ => Status::InConflict,
    };
    debug!(
        contributions = contributions.len(),
        distinct_labels = labels.len(),
        %status,
        "classification consensus"
    );
    Ok(status)
}
