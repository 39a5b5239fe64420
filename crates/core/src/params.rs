//! Matching parameters.
//!
//! Each consumer of the matcher carries its own threshold. There is no
//! crate-wide default: the consensus engine and region analysis are tuned
//! independently.

use serde::Deserialize;

use crate::error::{Result, ValidationError};

/// Validates a similarity threshold, naming failures after `field`.
pub(crate) fn check_threshold(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite {
            field: field.to_string(),
            value,
        });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::ThresholdOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Parameters for the object-detection consensus rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConsensusParams {
    /// Two boxes pair up only if their similarity is strictly greater than this.
    pub similarity_threshold: f64,
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.55,
        }
    }
}

impl ConsensusParams {
    pub fn new(similarity_threshold: f64) -> Result<Self> {
        check_threshold("similarityThreshold", similarity_threshold)?;
        Ok(Self {
            similarity_threshold,
        })
    }
}

/// Parameters for general-purpose region comparison.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegionParams {
    /// Two boxes pair up only if their similarity is strictly greater than this.
    pub similarity_threshold: f64,
}

impl Default for RegionParams {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.75,
        }
    }
}

impl RegionParams {
    pub fn new(similarity_threshold: f64) -> Result<Self> {
        check_threshold("similarityThreshold", similarity_threshold)?;
        Ok(Self {
            similarity_threshold,
        })
    }
}
