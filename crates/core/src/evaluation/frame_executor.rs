use super::error::EvaluationError;
use super::evaluate_use_case::FrameEvaluation;
use super::evaluation_logger::EvaluationLogger;

pub type FrameResult = Result<FrameEvaluation, EvaluationError>;

/// Evaluates the frame with the given index.
pub type FrameTask<'a> = dyn Fn(usize) -> FrameResult + Sync + 'a;

/// Abstracts how the frames of an evaluation are scheduled.
///
/// This is a port. Infrastructure provides concrete implementations
/// (sequential, threaded). Results are returned in frame order whatever the
/// execution order was.
pub trait FrameExecutor: Send + Sync {
    fn execute(
        &self,
        frame_count: usize,
        task: &FrameTask<'_>,
        logger: &mut dyn EvaluationLogger,
    ) -> Vec<FrameResult>;
}
