//! Parallel status recomputation across images.
//!
//! Images are independent of each other, so each one is recomputed on the
//! rayon pool against its own immutable log.

use rayon::prelude::*;
use tracing::debug;

use crate::annotation::Status;
use crate::error::Result;
use crate::image::Image;
use crate::params::ConsensusParams;

/// Status of one image, or the reason its input was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageStatus {
    pub image_id: String,
    pub status: Result<Status>,
}

/// Recomputes every image's status. Results follow the order of `images`.
pub fn recompute_statuses(images: &[Image], params: &ConsensusParams) -> Vec<ImageStatus> {
    debug!(images = images.len(), "recomputing statuses");
    images
        .par_iter()
        .map(|image| ImageStatus {
            image_id: image.image_id().to_string(),
            status: image.status(params),
        })
        .collect()
}
