use std::time::Instant;

use crate::shared::constants::PROGRESS_INTERVAL;

/// Observer of a running evaluation.
///
/// Executors report every finished frame; the use case reports frame sizes
/// and messages. Implementations decide what reaches the user.
pub trait EvaluationLogger: Send {
    /// A frame finished after `duration_ms`; `done` of `total` frames are
    /// finished now, in completion order.
    fn frame_evaluated(&mut self, done: usize, total: usize, duration_ms: f64);

    /// Number of persons in an evaluated frame.
    fn frame_size(&mut self, persons: usize);

    fn info(&mut self, message: &str);

    /// Called once when the evaluation ends.
    fn summary(&self) {}
}

/// Ignores everything.
pub struct NullEvaluationLogger;

impl EvaluationLogger for NullEvaluationLogger {
    fn frame_evaluated(&mut self, _done: usize, _total: usize, _duration_ms: f64) {}
    fn frame_size(&mut self, _persons: usize) {}
    fn info(&mut self, _message: &str) {}
}

/// Logs progress every `report_every` frames through the `log` crate and
/// a duration and frame size digest at the end.
pub struct LogEvaluationLogger {
    report_every: usize,
    durations_ms: Vec<f64>,
    frame_sizes: Vec<usize>,
    expected_frames: usize,
    started: Instant,
}

impl LogEvaluationLogger {
    pub fn new(report_every: usize) -> Self {
        Self {
            report_every: report_every.max(1),
            durations_ms: Vec::new(),
            frame_sizes: Vec::new(),
            expected_frames: 0,
            started: Instant::now(),
        }
    }

    /// Frame durations in completion order.
    pub fn durations_ms(&self) -> &[f64] {
        &self.durations_ms
    }

    pub fn frame_sizes(&self) -> &[usize] {
        &self.frame_sizes
    }

    /// The end-of-run digest, `None` before the first frame.
    pub fn summary_string(&self) -> Option<String> {
        if self.durations_ms.is_empty() {
            return None;
        }
        let mut text = format!(
            "Evaluated {}/{} frames in {:.1}s\n  per frame: mean {:.2}ms, slowest {:.2}ms",
            self.durations_ms.len(),
            self.expected_frames,
            self.started.elapsed().as_secs_f64(),
            self.durations_ms.iter().sum::<f64>() / self.durations_ms.len() as f64,
            self.durations_ms.iter().copied().fold(0.0, f64::max),
        );
        if let Some(largest) = self.frame_sizes.iter().max() {
            let persons: usize = self.frame_sizes.iter().sum();
            text.push_str(&format!(
                "\n  persons per frame: mean {:.1}, largest {largest}",
                persons as f64 / self.frame_sizes.len() as f64
            ));
        }
        Some(text)
    }
}

impl Default for LogEvaluationLogger {
    fn default() -> Self {
        Self::new(PROGRESS_INTERVAL)
    }
}

impl EvaluationLogger for LogEvaluationLogger {
    fn frame_evaluated(&mut self, done: usize, total: usize, duration_ms: f64) {
        self.durations_ms.push(duration_ms);
        self.expected_frames = total;
        if done % self.report_every == 0 || done == total {
            log::info!(
                "Evaluated frame {done}/{total} ({:.1}%)",
                done as f64 * 100.0 / total.max(1) as f64
            );
        }
    }

    fn frame_size(&mut self, persons: usize) {
        self.frame_sizes.push(persons);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("{text}");
        }
    }
}
