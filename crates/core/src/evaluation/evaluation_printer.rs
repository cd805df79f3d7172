use std::io::Write;

use super::error::EvaluationError;
use super::evaluate_use_case::Evaluation;

/// Domain interface for reporting an evaluation.
pub trait EvaluationPrinter {
    fn print(&self, evaluation: &Evaluation, out: &mut dyn Write) -> Result<(), EvaluationError>;
}
