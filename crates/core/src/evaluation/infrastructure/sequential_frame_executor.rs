use std::time::Instant;

use crate::evaluation::evaluation_logger::EvaluationLogger;
use crate::evaluation::frame_executor::{FrameExecutor, FrameResult, FrameTask};

/// Evaluates frames one after another on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialFrameExecutor;

impl FrameExecutor for SequentialFrameExecutor {
    fn execute(
        &self,
        frame_count: usize,
        task: &FrameTask<'_>,
        logger: &mut dyn EvaluationLogger,
    ) -> Vec<FrameResult> {
        (0..frame_count)
            .map(|index| {
                let start = Instant::now();
                let result = task(index);
                let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
                logger.frame_evaluated(index + 1, frame_count, elapsed_ms);
                result
            })
            .collect()
    }
}
