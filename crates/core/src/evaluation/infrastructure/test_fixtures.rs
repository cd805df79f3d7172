//! Evaluations shared by the printer tests.

use crate::config::options::Options;
use crate::evaluation::evaluate_use_case::{Evaluation, FrameEvaluation};
use crate::evaluation::evaluation_options::EvaluationOptions;
use crate::grouping::domain::classification::Classification;
use crate::grouping::domain::id_group::IdGroup;
use crate::grouping::domain::observation::Observation;
use crate::shared::person::Person;
use crate::shared::pose::Pose;
use crate::shared::timestamp::Timestamp;

fn classification(time: f64, groups: &[&[&str]]) -> Classification {
    let groups: Vec<IdGroup> = groups.iter().map(|g| g.iter().copied().collect()).collect();
    Classification::new(Timestamp::new(time), groups).unwrap()
}

pub fn frame(
    time: f64,
    persons: Vec<Person>,
    found: &[&[&str]],
    truth: &[&[&str]],
    threshold: f64,
) -> FrameEvaluation {
    let detected = classification(time, found);
    let ground_truth = classification(time, truth);
    let confusion_matrix = detected.create_confusion_matrix(&ground_truth, threshold);
    FrameEvaluation {
        observation: Observation::from_persons(time, persons),
        classification: detected,
        ground_truth,
        confusion_matrix,
    }
}

/// Frame 1 matches (`a b c` found for `a b | c`), frame 2 misses the pair
/// `a b` (two false negatives). Detector options: stride 1, mdl 5.
pub fn evaluation(options: EvaluationOptions) -> Evaluation {
    let threshold = options.threshold;
    let frames = vec![
        frame(
            1.0,
            vec![
                Person::new("a", Pose::at(0.0, 0.0)),
                Person::new("b", Pose::at(2.0, 0.0)),
                Person::new("c", Pose::at(10.0, 0.0)),
            ],
            &[&["a", "b", "c"]],
            &[&["a", "b"], &["c"]],
            threshold,
        ),
        frame(
            2.0,
            vec![
                Person::new("a", Pose::facing(0.0, 0.0, 0.0)),
                Person::new("b", Pose::at(2.0, 0.0)),
            ],
            &[&["a"], &["b"]],
            &[&["a", "b"]],
            threshold,
        ),
    ];
    let detector_options = Options::new().with("stride", "1").with("mdl", "5");
    Evaluation::from_frames(frames, detector_options, options)
}
