use crate::config::options::Options;
use crate::dataset::ground_truth::GroundTruth;
use crate::detection::domain::group_detector::GroupDetector;
use crate::grouping::domain::classification::Classification;
use crate::grouping::domain::confusion_matrix::ConfusionMatrix;
use crate::grouping::domain::observation::Observation;

use super::evaluation_logger::EvaluationLogger;
use super::evaluation_options::EvaluationOptions;
use super::frame_executor::{FrameExecutor, FrameResult};

/// Outcome of one evaluated frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameEvaluation {
    /// The observation as the detector saw it, after rotation modification.
    pub observation: Observation,
    pub classification: Classification,
    pub ground_truth: Classification,
    pub confusion_matrix: ConfusionMatrix,
}

/// Runs a detector over a dataset and scores every frame against the
/// ground truth.
#[derive(Clone, Debug)]
pub struct Evaluation {
    frames: Vec<FrameEvaluation>,
    skipped: usize,
    failed: usize,
    detector_options: Options,
    options: EvaluationOptions,
}

impl Evaluation {
    /// Evaluates every observation that has a ground truth at its timestamp.
    ///
    /// Observations without ground truth are skipped. Frames whose rotation
    /// modification or detection fails are logged and left out.
    pub fn run(
        observations: &[Observation],
        ground_truth: &GroundTruth,
        detector: &dyn GroupDetector,
        options: &EvaluationOptions,
        executor: &dyn FrameExecutor,
        logger: &mut dyn EvaluationLogger,
    ) -> Self {
        let pending: Vec<(&Observation, &Classification)> = observations
            .iter()
            .filter_map(|o| ground_truth.find_classification(o.timestamp).map(|gt| (o, gt)))
            .collect();
        let skipped = observations.len() - pending.len();
        if skipped > 0 {
            log::warn!("{skipped} observations have no ground truth and are not evaluated");
        }
        logger.info(&format!("Evaluating {} frames", pending.len()));

        let task = |index: usize| -> FrameResult {
            let (observation, truth) = pending[index];
            evaluate_frame(observation, truth, detector, options)
        };
        let results = executor.execute(pending.len(), &task, logger);

        let mut frames = Vec::with_capacity(results.len());
        let mut failed = 0;
        for (result, (observation, _)) in results.into_iter().zip(&pending) {
            match result {
                Ok(frame) => {
                    logger.frame_size(frame.observation.len());
                    frames.push(frame);
                }
                Err(e) => {
                    log::warn!("Frame at {} failed: {e}", observation.timestamp);
                    failed += 1;
                }
            }
        }
        logger.summary();

        Self {
            frames,
            skipped,
            failed,
            detector_options: detector.options().clone(),
            options: options.clone(),
        }
    }

    /// Wraps already evaluated frames.
    pub fn from_frames(
        frames: Vec<FrameEvaluation>,
        detector_options: Options,
        options: EvaluationOptions,
    ) -> Self {
        Self {
            frames,
            skipped: 0,
            failed: 0,
            detector_options,
            options,
        }
    }

    pub fn frames(&self) -> &[FrameEvaluation] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Observations left out for lack of ground truth.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Frames left out because they could not be evaluated.
    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn detector_options(&self) -> &Options {
        &self.detector_options
    }

    pub fn options(&self) -> &EvaluationOptions {
        &self.options
    }

    pub fn confusion_matrices(&self) -> Vec<ConfusionMatrix> {
        self.frames.iter().map(|f| f.confusion_matrix).collect()
    }

    /// Counts summed over all frames.
    pub fn total(&self) -> ConfusionMatrix {
        self.frames.iter().map(|f| f.confusion_matrix).sum()
    }

    pub fn mean_precision(&self) -> f64 {
        ConfusionMatrix::mean_precision(&self.confusion_matrices())
    }

    pub fn mean_recall(&self) -> f64 {
        ConfusionMatrix::mean_recall(&self.confusion_matrices())
    }

    pub fn mean_f1_score(&self) -> f64 {
        ConfusionMatrix::mean_f1_score(&self.confusion_matrices())
    }
}

fn evaluate_frame(
    observation: &Observation,
    ground_truth: &Classification,
    detector: &dyn GroupDetector,
    options: &EvaluationOptions,
) -> FrameResult {
    let observation = options.rotations.apply(observation, ground_truth);
    let classification = detector.detect(&observation)?;
    let confusion_matrix = classification.create_confusion_matrix(ground_truth, options.threshold);
    log::debug!(
        "Frame at {}: {} groups found, {confusion_matrix}",
        observation.timestamp,
        classification.id_groups().len()
    );
    Ok(FrameEvaluation {
        observation,
        classification,
        ground_truth: ground_truth.clone(),
        confusion_matrix,
    })
}
