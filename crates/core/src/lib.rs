//! concur - Multi-contributor annotation consensus.
//!
//! Decides whether independent taggers' annotations of one image agree well
//! enough to use the image for training, need more tagging, or conflict.

pub mod agreement;
pub mod annotation;
pub mod batch;
pub mod consensus;
pub mod error;
pub mod geometry;
pub mod image;
pub mod index;
pub mod matcher;
pub mod params;

pub use agreement::{RegionAgreement, compare_regions};
pub use annotation::{Annotation, BoundingBox, Contribution, Status, TaskKind};
pub use batch::{ImageStatus, recompute_statuses};
pub use consensus::{decide_classification_status, decide_object_detection_status, decide_status};
pub use error::{Result, ValidationError};
pub use image::{Image, ImageRecord};
pub use matcher::{MatchOutcome, match_annotations};
pub use params::{ConsensusParams, RegionParams};
