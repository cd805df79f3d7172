use std::io::Write;

use crate::evaluation::error::EvaluationError;
use crate::evaluation::evaluate_use_case::Evaluation;
use crate::evaluation::evaluation_options::EvaluationOptions;
use crate::evaluation::evaluation_printer::EvaluationPrinter;
use crate::grouping::domain::classification::Classification;

/// Human-readable report: found and true groups per frame, then the
/// averaged scores.
///
/// ```text
/// Frame: 1/2
///    FOUND:--  a b |
///    GT   :--  a b | c |
/// Average Precision: -- 1.00000000
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MatlabPrinter {
    /// Also list frames without false positives and false negatives.
    print_perfect_matches: bool,
    /// Also list singleton groups.
    print_all_persons: bool,
    print_confusion_matrix: bool,
}

impl MatlabPrinter {
    pub fn new(options: &EvaluationOptions) -> Self {
        Self {
            print_perfect_matches: options.print_perfect_matches,
            print_all_persons: options.print_all_persons,
            print_confusion_matrix: options.print_confusion_matrix,
        }
    }

    fn group_line(&self, classification: &Classification) -> String {
        let mut line = String::new();
        for group in classification.id_groups() {
            if group.len() <= 1 && !self.print_all_persons {
                continue;
            }
            for id in group.persons() {
                line.push(' ');
                line.push_str(id.as_str());
            }
            line.push_str(" |");
        }
        line
    }
}

impl EvaluationPrinter for MatlabPrinter {
    fn print(&self, evaluation: &Evaluation, out: &mut dyn Write) -> Result<(), EvaluationError> {
        let total = evaluation.len();
        for (index, frame) in evaluation.frames().iter().enumerate() {
            let matrix = &frame.confusion_matrix;
            if !self.print_perfect_matches && matrix.is_perfect_match() {
                continue;
            }
            writeln!(out, "Frame: {}/{total}", index + 1)?;
            writeln!(out, "   FOUND:-- {}", self.group_line(&frame.classification))?;
            writeln!(out, "   GT   :-- {}", self.group_line(&frame.ground_truth))?;
            if self.print_confusion_matrix {
                writeln!(out, "     TP: {}", matrix.true_positive)?;
                writeln!(out, "     FP: {}", matrix.false_positive)?;
                writeln!(out, "     TN: {}", matrix.true_negative)?;
                writeln!(out, "     FN: {}", matrix.false_negative)?;
                writeln!(out)?;
            }
        }
        writeln!(out, "Average Precision: -- {:.8}", evaluation.mean_precision())?;
        writeln!(out, "Average Recall: -- {:.8}", evaluation.mean_recall())?;
        writeln!(out, "Average F1 score: -- {:.8}", evaluation.mean_f1_score())?;
        Ok(())
    }
}
