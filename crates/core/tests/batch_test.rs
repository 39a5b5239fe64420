//! Tests for parallel recomputation across images.

mod common;

use common::{at, boxed};
use concur_core::{
    Annotation, Contribution, ConsensusParams, Image, Status, TaskKind, recompute_statuses,
};

fn image_with(id: &str, kind: TaskKind, sets: Vec<Vec<Annotation>>) -> Image {
    let mut image = Image::new(id, "proj", kind);
    for (i, set) in sets.into_iter().enumerate() {
        let contribution = Contribution::new(format!("{id}-c{i}"), id, "t", set, at(i as i64));
        image.append(contribution).unwrap();
    }
    image
}

#[test]
fn test_results_follow_input_order() {
    let cat = || boxed("cat", 10.0, 10.0, 100.0, 100.0);
    let mut images = Vec::new();
    for i in 0..64 {
        let image = match i % 3 {
            0 => image_with(&format!("img-{i}"), TaskKind::ObjectDetection, vec![vec![cat()]]),
            1 => image_with(
                &format!("img-{i}"),
                TaskKind::ObjectDetection,
                vec![vec![cat()], vec![cat()]],
            ),
            _ => image_with(
                &format!("img-{i}"),
                TaskKind::ImageClassification,
                vec![
                    vec![Annotation::label_only("dog")],
                    vec![Annotation::label_only("cat")],
                ],
            ),
        };
        images.push(image);
    }

    let results = recompute_statuses(&images, &ConsensusParams::default());
    assert_eq!(results.len(), images.len());
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.image_id, format!("img-{i}"));
        let expected = match i % 3 {
            0 => Status::TagPending,
            1 => Status::ReadyForTraining,
            _ => Status::InConflict,
        };
        assert_eq!(result.status, Ok(expected));
    }
}

#[test]
fn test_one_malformed_image_does_not_affect_others() {
    let good = image_with(
        "good",
        TaskKind::ObjectDetection,
        vec![
            vec![boxed("cat", 0.0, 0.0, 10.0, 10.0)],
            vec![boxed("cat", 0.0, 0.0, 10.0, 10.0)],
        ],
    );
    let bad = image_with(
        "bad",
        TaskKind::ObjectDetection,
        vec![vec![Annotation::label_only("cat")], vec![]],
    );
    let results = recompute_statuses(&[bad, good], &ConsensusParams::default());
    assert!(results[0].status.is_err());
    assert_eq!(results[1].status, Ok(Status::ReadyForTraining));
}
