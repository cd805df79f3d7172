use std::io::Write;

use crate::evaluation::error::EvaluationError;
use crate::evaluation::evaluate_use_case::{Evaluation, FrameEvaluation};
use crate::evaluation::evaluation_printer::EvaluationPrinter;
use crate::grouping::domain::confusion_matrix::ConfusionMatrix;
use crate::grouping::domain::group::Group;
use crate::shared::error::DataError;
use crate::shared::person::{Person, Stride};

const HEADER: [&str; 15] = [
    "timestamp",
    "pid",
    "x",
    "y",
    "rad",
    "gt.group.size",
    "cl.group.size",
    "tp",
    "fp",
    "tn",
    "fn",
    "cl.group.distance.cost",
    "cl.group.visibility.cost",
    "mdl",
    "stride",
];

/// One tab-separated row per person and frame.
///
/// The confusion counts are taken over the other persons of the frame:
/// sharing the detected group versus sharing the annotated one. Both costs
/// are measured against the center of the person's annotated group.
/// Annotated ids missing from a frame are ignored.
/// Requires `stride` and `mdl` in the detector options.
#[derive(Clone, Copy, Debug, Default)]
pub struct TsvParticipantsPrinter;

impl EvaluationPrinter for TsvParticipantsPrinter {
    fn print(&self, evaluation: &Evaluation, out: &mut dyn Write) -> Result<(), EvaluationError> {
        let stride: Stride = evaluation.detector_options().get_value("stride")?;
        let mdl: f64 = evaluation.detector_options().get_value("mdl")?;

        writeln!(out, "{}", HEADER.join("\t"))?;
        for frame in evaluation.frames() {
            print_frame(frame, stride, mdl, out)?;
        }
        Ok(())
    }
}

fn print_frame(
    frame: &FrameEvaluation,
    stride: Stride,
    mdl: f64,
    out: &mut dyn Write,
) -> Result<(), EvaluationError> {
    let observation = &frame.observation;
    let annotated = frame.ground_truth.find_groups(observation);
    let detected = frame.classification.find_groups(observation);

    for person in observation.group.persons().values() {
        let gt_group = group_of(person, &annotated, frame)?;
        let cl_group = group_of(person, &detected, frame)?;
        let counts = person_counts(person, &observation.group, cl_group, gt_group);
        let center = gt_group.calculate_center(stride)?;
        let distance = person.distance_cost(&center, stride);
        let visibility: f64 = cl_group
            .persons()
            .values()
            .map(|other| person.visibility_cost(&center, other))
            .sum();
        let rotation = person.rotation().map(|r| r.to_string()).unwrap_or_default();
        let position = person.position();

        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{rotation}\t{}\t{}\t{}\t{}\t{}\t{}\t{distance}\t{visibility}\t{mdl}\t{stride}\t",
            frame.classification.timestamp(),
            person.id,
            position.x,
            position.y,
            gt_group.len(),
            cl_group.len(),
            counts.true_positive,
            counts.false_positive,
            counts.true_negative,
            counts.false_negative,
        )?;
    }
    Ok(())
}

fn group_of<'a>(
    person: &Person,
    groups: &'a [Group],
    frame: &FrameEvaluation,
) -> Result<&'a Group, DataError> {
    groups
        .iter()
        .find(|g| g.contains(&person.id))
        .ok_or_else(|| DataError::PersonNotFound {
            id: person.id.clone(),
            timestamp: frame.observation.timestamp,
        })
}

/// Pairwise agreement of `person` with everyone else in `everyone`.
fn person_counts(
    person: &Person,
    everyone: &Group,
    detected: &Group,
    annotated: &Group,
) -> ConfusionMatrix {
    let mut counts = ConfusionMatrix::default();
    for id in everyone.persons().keys().filter(|id| **id != person.id) {
        match (detected.contains(id), annotated.contains(id)) {
            (true, true) => counts.true_positive += 1,
            (true, false) => counts.false_positive += 1,
            (false, false) => counts.true_negative += 1,
            (false, true) => counts.false_negative += 1,
        }
    }
    counts
}
