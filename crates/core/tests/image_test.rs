//! Tests for the append-only contribution log and its status projection.

mod common;

use common::{IMAGE_ID, at, boxed, contribution};
use concur_core::{
    Annotation, Contribution, ConsensusParams, Image, ImageRecord, Status, TaskKind,
    ValidationError,
};

fn cat() -> Annotation {
    boxed("cat", 10.0, 10.0, 100.0, 100.0)
}

fn new_image() -> Image {
    Image::new(IMAGE_ID, "proj-1", TaskKind::ObjectDetection)
}

#[test]
fn test_new_image_is_pending() {
    let image = new_image();
    assert!(image.is_empty());
    assert_eq!(
        image.status(&ConsensusParams::default()).unwrap(),
        Status::TagPending
    );
}

#[test]
fn test_status_follows_appends() {
    let params = ConsensusParams::default();
    let mut image = new_image();

    image.append(contribution(0, vec![cat()])).unwrap();
    assert_eq!(image.status(&params).unwrap(), Status::TagPending);

    image
        .append(contribution(1, vec![boxed("cat", 10.0, 10.0, 100.0, 30.0)]))
        .unwrap();
    assert_eq!(image.status(&params).unwrap(), Status::InConflict);

    image.append(contribution(2, vec![cat()])).unwrap();
    assert_eq!(image.status(&params).unwrap(), Status::ReadyForTraining);
    assert_eq!(image.len(), 3);
}

#[test]
fn test_out_of_order_appends_are_sorted() {
    let mut image = new_image();
    image.append(contribution(5, vec![cat()])).unwrap();
    image.append(contribution(1, vec![cat()])).unwrap();
    image.append(contribution(3, vec![cat()])).unwrap();
    let ids: Vec<&str> = image
        .contributions()
        .iter()
        .map(|c| c.contribution_id.as_str())
        .collect();
    assert_eq!(ids, vec!["c1", "c3", "c5"]);
}

#[test]
fn test_equal_timestamps_keep_arrival_order() {
    let mut image = new_image();
    for id in ["a", "b", "c"] {
        image
            .append(Contribution::new(id, IMAGE_ID, "t", vec![cat()], at(7)))
            .unwrap();
    }
    let ids: Vec<&str> = image
        .contributions()
        .iter()
        .map(|c| c.contribution_id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_duplicate_contribution_is_rejected() {
    let mut image = new_image();
    image.append(contribution(0, vec![cat()])).unwrap();
    let err = image.append(contribution(0, vec![cat()])).unwrap_err();
    assert!(matches!(err, ValidationError::DuplicateContribution { .. }));
    assert_eq!(image.len(), 1);
}

#[test]
fn test_foreign_contribution_is_rejected() {
    let mut image = new_image();
    let stray = Contribution::new("c9", "img-2", "t9", vec![cat()], at(9));
    let err = image.append(stray).unwrap_err();
    assert_eq!(err.field(), "contribution.imageId");
    assert!(image.is_empty());
}

#[test]
fn test_lookup_by_id() {
    let mut image = new_image();
    image.append(contribution(4, vec![cat()])).unwrap();
    assert_eq!(image.get("c4").map(|c| c.contributor_id.as_str()), Some("t4"));
    assert!(image.get("c5").is_none());
}

#[test]
fn test_record_replay_restores_submission_order() {
    let record = ImageRecord {
        image_id: IMAGE_ID.to_string(),
        project_id: "proj-1".to_string(),
        task_kind: TaskKind::ImageClassification,
        contributions: vec![
            contribution(2, vec![Annotation::label_only("dog")]),
            contribution(0, vec![Annotation::label_only("dog")]),
        ],
    };
    let image = Image::try_from(record).unwrap();
    assert_eq!(image.contributions()[0].contribution_id, "c0");
    assert_eq!(image.task_kind(), TaskKind::ImageClassification);
    assert_eq!(
        image.status(&ConsensusParams::default()).unwrap(),
        Status::ReadyForTraining
    );
    assert_eq!(image.to_record().contributions.len(), 2);
}

#[test]
fn test_record_replay_reports_offending_index() {
    let record = ImageRecord {
        image_id: IMAGE_ID.to_string(),
        project_id: "proj-1".to_string(),
        task_kind: TaskKind::ObjectDetection,
        contributions: vec![contribution(0, vec![]), contribution(0, vec![])],
    };
    let err = Image::try_from(record).unwrap_err();
    assert_eq!(err.field(), "contributions[1].contributionId");
}

#[test]
fn test_record_parses_service_json() {
    let json = r#"{
        "imageId": "img-1",
        "projectId": "proj-1",
        "taskKind": "object-detection",
        "contributions": [
            {
                "contributionId": "c1",
                "imageId": "img-1",
                "contributorId": "alice",
                "submittedAt": "2024-03-01T10:00:00Z",
                "annotations": [
                    {"label": "cat", "boundingBox": {"x": 10, "y": 10, "width": 100, "height": 100}}
                ]
            },
            {
                "contributionId": "c2",
                "imageId": "img-1",
                "contributorId": "bob",
                "submittedAt": "2024-03-01T11:00:00Z",
                "annotations": [
                    {"label": "cat", "boundingBox": {"x": 10, "y": 10, "width": 100, "height": 100}}
                ]
            }
        ]
    }"#;
    let record: ImageRecord = serde_json::from_str(json).unwrap();
    let image = Image::try_from(record).unwrap();
    assert_eq!(
        image.status(&ConsensusParams::default()).unwrap(),
        Status::ReadyForTraining
    );
}

#[test]
fn test_status_serializes_kebab_case() {
    assert_eq!(
        serde_json::to_string(&Status::InConflict).unwrap(),
        "\"in-conflict\""
    );
    let parsed: Status = serde_json::from_str("\"tag-pending\"").unwrap();
    assert_eq!(parsed, Status::TagPending);
}
