//! Annotation data model.
//!
//! Contains the records a tagger submits (`Annotation`, `Contribution`),
//! the project-level `TaskKind` and the derived image `Status`, together
//! with the input validation the engine applies before computing anything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::{Result, ValidationError};
use crate::geometry::HasBBox;

/// Axis-aligned box in image-pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Checks that every component is finite and both dimensions are non-negative.
    pub fn validate(&self, field: &str) -> Result<()> {
        for (name, value) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite {
                    field: format!("{field}.{name}"),
                    value,
                });
            }
        }
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value < 0.0 {
                return Err(ValidationError::Negative {
                    field: format!("{field}.{name}"),
                    value,
                });
            }
        }
        Ok(())
    }
}

impl HasBBox for BoundingBox {
    fn x0(&self) -> f64 {
        self.x
    }

    fn y0(&self) -> f64 {
        self.y
    }

    fn x1(&self) -> f64 {
        self.x + self.width
    }

    fn y1(&self) -> f64 {
        self.y + self.height
    }
}

/// One labelled region (object detection) or one label (classification).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub label: SmolStr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl Annotation {
    /// Creates an object-detection annotation.
    pub fn with_box(label: impl Into<SmolStr>, bounding_box: BoundingBox) -> Self {
        Self {
            label: label.into(),
            bounding_box: Some(bounding_box),
        }
    }

    /// Creates a classification annotation.
    pub fn label_only(label: impl Into<SmolStr>) -> Self {
        Self {
            label: label.into(),
            bounding_box: None,
        }
    }

    /// Validates the label and, when `require_box` is set, the bounding box.
    pub fn validate(&self, field: &str, require_box: bool) -> Result<()> {
        if self.label.is_empty() {
            return Err(ValidationError::EmptyLabel {
                field: format!("{field}.label"),
            });
        }
        match &self.bounding_box {
            Some(bbox) => bbox.validate(&format!("{field}.boundingBox")),
            None if require_box => Err(ValidationError::MissingBoundingBox {
                field: format!("{field}.boundingBox"),
            }),
            None => Ok(()),
        }
    }
}

/// Validates every annotation of a set, naming failures `{field}[i]`.
pub(crate) fn validate_annotations(
    annotations: &[Annotation],
    field: &str,
    require_box: bool,
) -> Result<()> {
    annotations
        .iter()
        .enumerate()
        .try_for_each(|(i, a)| a.validate(&format!("{field}[{i}]"), require_box))
}

/// One tagger's full annotation set for one image. Never edited once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub contribution_id: String,
    pub image_id: String,
    pub contributor_id: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    pub submitted_at: DateTime<Utc>,
}

impl Contribution {
    pub fn new(
        contribution_id: impl Into<String>,
        image_id: impl Into<String>,
        contributor_id: impl Into<String>,
        annotations: Vec<Annotation>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            contribution_id: contribution_id.into(),
            image_id: image_id.into(),
            contributor_id: contributor_id.into(),
            annotations,
            submitted_at,
        }
    }
}

/// What a project asks its taggers to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    ObjectDetection,
    ImageClassification,
}

/// Training readiness of an image, derived from its contributions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    TagPending,
    ReadyForTraining,
    InConflict,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TagPending => "tag-pending",
            Self::ReadyForTraining => "ready-for-training",
            Self::InConflict => "in-conflict",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
