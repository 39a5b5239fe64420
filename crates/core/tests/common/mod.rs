//! Fixture builders shared by the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use concur_core::{Annotation, BoundingBox, Contribution};

pub const IMAGE_ID: &str = "img-1";

pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
}

pub fn boxed(label: &str, x: f64, y: f64, w: f64, h: f64) -> Annotation {
    Annotation::with_box(label, BoundingBox::new(x, y, w, h))
}

/// Contribution `c{seq}` by tagger `t{seq}`, submitted `seq` seconds in.
pub fn contribution(seq: i64, annotations: Vec<Annotation>) -> Contribution {
    Contribution::new(
        format!("c{seq}"),
        IMAGE_ID,
        format!("t{seq}"),
        annotations,
        at(seq),
    )
}

/// Builds contributions in submission order, one per annotation set.
pub fn history(sets: Vec<Vec<Annotation>>) -> Vec<Contribution> {
    sets.into_iter()
        .enumerate()
        .map(|(i, set)| contribution(i as i64, set))
        .collect()
}
