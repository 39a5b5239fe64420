//! Consensus rules deriving an image's status from its contributions.
//!
//! - `detection` - bounding-box agreement between the most recent contributions
//! - `classification` - distinct-label count across all contributions
//!
//! Both rules are pure functions of their input: recomputing against the
//! same contribution list always yields the same status.

mod classification;
mod detection;

pub use classification::decide_classification_status;
pub use detection::decide_object_detection_status;

use crate::annotation::{Contribution, Status, TaskKind};
use crate::error::Result;
use crate::params::ConsensusParams;

/// Applies the rule for `task_kind`.
///
/// `contributions` must be ordered by submission time, most recent last.
pub fn decide_status(
    task_kind: TaskKind,
    contributions: &[Contribution],
    params: &ConsensusParams,
) -> Result<Status> {
    match task_kind {
        TaskKind::ObjectDetection => decide_object_detection_status(contributions, params),
        TaskKind::ImageClassification => decide_classification_status(contributions),
    }
}

/// True if `contributions` are non-decreasing in submission time.
pub fn is_submission_ordered(contributions: &[Contribution]) -> bool {
    contributions
        .windows(2)
        .all(|w| w[0].submitted_at <= w[1].submitted_at)
}
