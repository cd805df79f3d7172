use std::io::Write;

use crate::evaluation::error::EvaluationError;
use crate::evaluation::evaluate_use_case::Evaluation;
use crate::evaluation::evaluation_printer::EvaluationPrinter;

const HEADER: [&str; 8] = [
    "id",
    "timestamp",
    "annotation",
    "classification",
    "tp",
    "fp",
    "tn",
    "fn",
];

/// One tab-separated row per frame with both partitions and the
/// confusion counts. Every field, the last included, ends with a tab.
#[derive(Clone, Copy, Debug, Default)]
pub struct TsvPrinter;

impl EvaluationPrinter for TsvPrinter {
    fn print(&self, evaluation: &Evaluation, out: &mut dyn Write) -> Result<(), EvaluationError> {
        for column in HEADER {
            write!(out, "{column}\t")?;
        }
        writeln!(out)?;

        for (index, frame) in evaluation.frames().iter().enumerate() {
            let m = &frame.confusion_matrix;
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t",
                index + 1,
                frame.classification.timestamp(),
                frame.ground_truth,
                frame.classification,
                m.true_positive,
                m.false_positive,
                m.true_negative,
                m.false_negative
            )?;
        }
        Ok(())
    }
}
