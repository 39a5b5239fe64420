//! Symmetric comparison of two annotation sets.
//!
//! Unlike the consensus rule, which only classifies the older contribution
//! against the newer one, this runs the matcher in both directions and
//! reports what each side is missing.

use serde::Serialize;

use crate::annotation::Annotation;
use crate::error::Result;
use crate::matcher::match_annotations;
use crate::params::RegionParams;

/// Outcome of comparing `left` and `right` both ways.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAgreement<'a> {
    /// Left annotations with a partner on the right.
    pub left_matched: usize,
    /// Right annotations with a partner on the left.
    pub right_matched: usize,
    pub left_unmatched: Vec<&'a Annotation>,
    pub right_unmatched: Vec<&'a Annotation>,
}

impl RegionAgreement<'_> {
    /// True if every annotation on both sides found a partner.
    pub fn is_unanimous(&self) -> bool {
        self.left_unmatched.is_empty() && self.right_unmatched.is_empty()
    }

    /// Share of annotations, over both sides, that found a partner.
    ///
    /// Two empty sets agree completely.
    pub fn agreement_ratio(&self) -> f64 {
        let matched = self.left_matched + self.right_matched;
        let total = matched + self.left_unmatched.len() + self.right_unmatched.len();
        if total == 0 {
            1.0
        } else {
            matched as f64 / total as f64
        }
    }
}

/// Compares two object-detection annotation sets in both directions.
pub fn compare_regions<'a>(
    left: &'a [Annotation],
    right: &'a [Annotation],
    params: &RegionParams,
) -> Result<RegionAgreement<'a>> {
    let threshold = params.similarity_threshold;
    let right_side = match_annotations(left, right, threshold)?;
    let left_side = match_annotations(right, left, threshold)?;
    Ok(RegionAgreement {
        left_matched: left_side.matches.len(),
        right_matched: right_side.matches.len(),
        left_unmatched: left_side.mismatches,
        right_unmatched: right_side.mismatches,
    })
}
