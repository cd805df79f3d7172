use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Group-level confusion counts of one frame.
///
/// Ratios whose denominator is zero fall back to 1.0: no predictions made
/// means no wrong predictions, no positives means none were missed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

impl ConfusionMatrix {
    pub fn new(
        true_positive: usize,
        false_positive: usize,
        true_negative: usize,
        false_negative: usize,
    ) -> Self {
        Self {
            true_positive,
            false_positive,
            true_negative,
            false_negative,
        }
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    pub fn specificity(&self) -> f64 {
        ratio(self.true_negative, self.true_negative + self.false_positive)
    }

    pub fn negative_predictive_value(&self) -> f64 {
        ratio(self.true_negative, self.true_negative + self.false_negative)
    }

    pub fn f1_score(&self) -> f64 {
        Self::f1(self.precision(), self.recall())
    }

    /// Recall + specificity - 1.
    pub fn informedness(&self) -> f64 {
        self.recall() + self.specificity() - 1.0
    }

    /// Precision + negative predictive value - 1.
    pub fn markedness(&self) -> f64 {
        self.precision() + self.negative_predictive_value() - 1.0
    }

    pub fn is_perfect_match(&self) -> bool {
        self.false_positive == 0 && self.false_negative == 0
    }

    /// Harmonic mean of precision and recall, 0 when both are 0.
    pub fn f1(precision: f64, recall: f64) -> f64 {
        let sum = precision + recall;
        if sum == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / sum
        }
    }

    /// Mean of the per-frame precisions (1.0 for no frames).
    pub fn mean_precision(matrices: &[ConfusionMatrix]) -> f64 {
        mean(matrices, ConfusionMatrix::precision)
    }

    /// Mean of the per-frame recalls (1.0 for no frames).
    pub fn mean_recall(matrices: &[ConfusionMatrix]) -> f64 {
        mean(matrices, ConfusionMatrix::recall)
    }

    /// F1 of the mean precision and mean recall, not the mean of F1 scores.
    pub fn mean_f1_score(matrices: &[ConfusionMatrix]) -> f64 {
        Self::f1(Self::mean_precision(matrices), Self::mean_recall(matrices))
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        1.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn mean(matrices: &[ConfusionMatrix], metric: fn(&ConfusionMatrix) -> f64) -> f64 {
    if matrices.is_empty() {
        return 1.0;
    }
    matrices.iter().map(metric).sum::<f64>() / matrices.len() as f64
}

impl Add for ConfusionMatrix {
    type Output = ConfusionMatrix;

    fn add(self, rhs: ConfusionMatrix) -> ConfusionMatrix {
        ConfusionMatrix::new(
            self.true_positive + rhs.true_positive,
            self.false_positive + rhs.false_positive,
            self.true_negative + rhs.true_negative,
            self.false_negative + rhs.false_negative,
        )
    }
}

impl Sum for ConfusionMatrix {
    fn sum<I: Iterator<Item = ConfusionMatrix>>(iter: I) -> Self {
        iter.fold(ConfusionMatrix::default(), Add::add)
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ \"true-positive\": {}, \"false-positive\": {}, \"true-negative\": {}, \"false-negative\": {} }}",
            self.true_positive, self.false_positive, self.true_negative, self.false_negative
        )
    }
}
