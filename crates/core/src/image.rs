//! Append-only contribution log for one image.
//!
//! An `Image` owns its contributions and keeps them in submission order.
//! Its status is never stored: `Image::status` recomputes it from the log
//! every time, so the persisted value can always be checked against the
//! engine's output.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::annotation::{Contribution, Status, TaskKind};
use crate::consensus::decide_status;
use crate::error::{Result, ValidationError};
use crate::params::ConsensusParams;

/// Serialized form of an image and its contributions, in storage order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub image_id: String,
    pub project_id: String,
    pub task_kind: TaskKind,
    #[serde(default)]
    pub contributions: Vec<Contribution>,
}

/// An image together with every contribution ever submitted for it.
#[derive(Clone, Debug)]
pub struct Image {
    image_id: String,
    project_id: String,
    task_kind: TaskKind,
    /// Sorted by submission time; equal timestamps keep arrival order
    contributions: Vec<Contribution>,
    ids: FxHashSet<String>,
}

impl Image {
    pub fn new(
        image_id: impl Into<String>,
        project_id: impl Into<String>,
        task_kind: TaskKind,
    ) -> Self {
        Self {
            image_id: image_id.into(),
            project_id: project_id.into(),
            task_kind,
            contributions: Vec::new(),
            ids: FxHashSet::default(),
        }
    }

    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn task_kind(&self) -> TaskKind {
        self.task_kind
    }

    /// Records a new contribution.
    ///
    /// Rejects contributions for another image and ids that were already
    /// recorded. The contribution is placed after every contribution
    /// submitted at or before its own timestamp.
    pub fn append(&mut self, contribution: Contribution) -> Result<()> {
        if contribution.image_id != self.image_id {
            return Err(ValidationError::ImageMismatch {
                field: "contribution.imageId".to_string(),
                expected: self.image_id.clone(),
                got: contribution.image_id,
            });
        }
        if self.ids.contains(&contribution.contribution_id) {
            return Err(ValidationError::DuplicateContribution {
                field: "contribution.contributionId".to_string(),
                id: contribution.contribution_id,
            });
        }

        let at = self
            .contributions
            .partition_point(|c| c.submitted_at <= contribution.submitted_at);
        self.ids.insert(contribution.contribution_id.clone());
        self.contributions.insert(at, contribution);
        Ok(())
    }

    /// Contributions in submission order, most recent last.
    pub fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }

    pub fn get(&self, contribution_id: &str) -> Option<&Contribution> {
        self.contributions
            .iter()
            .find(|c| c.contribution_id == contribution_id)
    }

    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    /// Recomputes the status from the current log.
    pub fn status(&self, params: &ConsensusParams) -> Result<Status> {
        decide_status(self.task_kind, &self.contributions, params)
    }

    pub fn to_record(&self) -> ImageRecord {
        ImageRecord {
            image_id: self.image_id.clone(),
            project_id: self.project_id.clone(),
            task_kind: self.task_kind,
            contributions: self.contributions.clone(),
        }
    }
}

impl TryFrom<ImageRecord> for Image {
    type Error = ValidationError;

    /// Replays the stored contributions through `append`, which restores
    /// submission order whatever order storage returned them in.
    fn try_from(record: ImageRecord) -> Result<Self> {
        let mut image = Image::new(record.image_id, record.project_id, record.task_kind);
        for (i, contribution) in record.contributions.into_iter().enumerate() {
            image.append(contribution).map_err(|e| at_index(e, i))?;
        }
        Ok(image)
    }
}

/// Rewrites a `contribution.*` field path to `contributions[i].*`.
fn at_index(err: ValidationError, i: usize) -> ValidationError {
    let reindex = |field: String| {
        field.replacen("contribution.", &format!("contributions[{i}]."), 1)
    };
    match err {
        ValidationError::ImageMismatch {
            field,
            expected,
            got,
        } => ValidationError::ImageMismatch {
            field: reindex(field),
            expected,
            got,
        },
        ValidationError::DuplicateContribution { field, id } => {
            ValidationError::DuplicateContribution {
                field: reindex(field),
                id,
            }
        }
        other => other,
    }
}
