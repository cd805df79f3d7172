use crate::config::error::ConfigError;
use crate::config::options::{Min, OneOf, Options, Validator};
use crate::shared::constants::DEFAULT_MATCH_THRESHOLD;

use super::rotation_modifier::RotationModification;

pub const PRINTER_NAMES: [&str; 3] = ["matlab", "tsv", "tsv_participants"];

/// Settings of one evaluation run, read from the `--evaluation` options.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationOptions {
    /// Minimum group intersection for a true positive.
    pub threshold: f64,
    pub rotations: RotationModification,
    pub printer: String,
    pub print_perfect_matches: bool,
    pub print_all_persons: bool,
    pub print_confusion_matrix: bool,
}

impl EvaluationOptions {
    pub fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let threshold = if options.has_option("threshold") {
            options.get_validated("threshold", &Min(0.0))?
        } else {
            DEFAULT_MATCH_THRESHOLD
        };
        let printer: String =
            options.get_value_or("evaluation_printer", PRINTER_NAMES[0].to_string())?;
        OneOf(PRINTER_NAMES.map(String::from).to_vec()).check("evaluation_printer", &printer)?;

        Ok(Self {
            threshold,
            rotations: RotationModification::from_options(options)?,
            printer,
            print_perfect_matches: options.get_value_or("print_perfect_matches", true)?,
            print_all_persons: options.get_value_or("print_all_persons", false)?,
            print_confusion_matrix: options.get_value_or("print_confusion_matrix", false)?,
        })
    }
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
            rotations: RotationModification::Keep,
            printer: PRINTER_NAMES[0].to_string(),
            print_perfect_matches: true,
            print_all_persons: false,
            print_confusion_matrix: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_are_default() {
        let parsed = EvaluationOptions::from_options(&Options::new()).unwrap();
        assert_eq!(parsed, EvaluationOptions::default());
    }

    #[test]
    fn test_all_options() {
        let options: Options = "threshold=0.5@modify_rotations=remove@evaluation_printer=tsv\
                                @print_perfect_matches=false@print_all_persons=true\
                                @print_confusion_matrix=true"
            .parse()
            .unwrap();
        let parsed = EvaluationOptions::from_options(&options).unwrap();
        assert_eq!(
            parsed,
            EvaluationOptions {
                threshold: 0.5,
                rotations: RotationModification::Remove,
                printer: "tsv".to_string(),
                print_perfect_matches: false,
                print_all_persons: true,
                print_confusion_matrix: true,
            }
        );
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        let options = Options::new().with("threshold", "-0.1");
        assert!(matches!(
            EvaluationOptions::from_options(&options),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_unknown_printer_is_rejected() {
        let options = Options::new().with("evaluation_printer", "csv");
        assert!(matches!(
            EvaluationOptions::from_options(&options),
            Err(ConfigError::NotOneOf { .. })
        ));
    }

    #[test]
    fn test_malformed_flag_is_rejected() {
        let options = Options::new().with("print_all_persons", "yes");
        assert!(matches!(
            EvaluationOptions::from_options(&options),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
