use std::thread;
use std::time::Instant;

use crate::evaluation::evaluation_logger::EvaluationLogger;
use crate::evaluation::frame_executor::{FrameExecutor, FrameResult, FrameTask};

/// Evaluates frames on a pool of scoped worker threads.
///
/// Layout: `indices → workers [task] → main [log/reorder]`
///
/// Workers pull frame indices from a shared queue, so a slow frame does not
/// hold back the others. Logging stays on the calling thread.
pub struct ThreadedFrameExecutor {
    threads: usize,
}

impl ThreadedFrameExecutor {
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl Default for ThreadedFrameExecutor {
    fn default() -> Self {
        Self::new(thread::available_parallelism().map_or(1, |n| n.get()))
    }
}

impl FrameExecutor for ThreadedFrameExecutor {
    fn execute(
        &self,
        frame_count: usize,
        task: &FrameTask<'_>,
        logger: &mut dyn EvaluationLogger,
    ) -> Vec<FrameResult> {
        let (index_tx, index_rx) = crossbeam_channel::bounded::<usize>(frame_count);
        for index in 0..frame_count {
            // Cannot fail: the channel holds every index and a receiver is alive.
            let _ = index_tx.send(index);
        }
        drop(index_tx);

        let (result_tx, result_rx) = crossbeam_channel::unbounded::<(usize, FrameResult, f64)>();
        let mut slots: Vec<Option<FrameResult>> = (0..frame_count).map(|_| None).collect();

        thread::scope(|scope| {
            for _ in 0..self.threads.min(frame_count) {
                let index_rx = index_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    for index in index_rx {
                        let start = Instant::now();
                        let result = task(index);
                        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
                        if result_tx.send((index, result, elapsed_ms)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(result_tx);

            for (done, (index, result, elapsed_ms)) in result_rx.iter().enumerate() {
                logger.frame_evaluated(done + 1, frame_count, elapsed_ms);
                slots[index] = Some(result);
            }
        });

        slots.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::error::EvaluationError;
    use crate::evaluation::evaluate_use_case::FrameEvaluation;
    use crate::evaluation::evaluation_logger::LogEvaluationLogger;
    use crate::grouping::domain::observation::Observation;
    use crate::shared::error::DataError;
    use rstest::rstest;
    use std::time::Duration;

    fn task(index: usize) -> FrameResult {
        // Early frames finish last.
        thread::sleep(Duration::from_millis((20 - index.min(20)) as u64));
        if index % 7 == 3 {
            return Err(EvaluationError::Data(DataError::EmptyGroup));
        }
        Ok(FrameEvaluation {
            observation: Observation::from_persons(index as f64, vec![]),
            ..FrameEvaluation::default()
        })
    }

    #[rstest]
    #[case::single_thread(1)]
    #[case::some_threads(4)]
    #[case::more_threads_than_frames(64)]
    fn test_results_are_in_frame_order(#[case] threads: usize) {
        let mut logger = LogEvaluationLogger::default();
        let results = ThreadedFrameExecutor::new(threads).execute(25, &task, &mut logger);
        assert_eq!(results.len(), 25);
        for (index, result) in results.iter().enumerate() {
            match result {
                Ok(frame) => assert_eq!(frame.observation.timestamp.time(), index as f64),
                Err(_) => assert_eq!(index % 7, 3),
            }
        }
        assert_eq!(logger.durations_ms().len(), 25);
    }

    #[test]
    fn test_no_frames() {
        let results = ThreadedFrameExecutor::new(4).execute(
            0,
            &|_| -> FrameResult { panic!("no frame to evaluate") },
            &mut LogEvaluationLogger::default(),
        );
        assert!(results.is_empty());
    }

    #[test]
    fn test_zero_threads_means_one() {
        assert_eq!(ThreadedFrameExecutor::new(0).threads(), 1);
    }
}
