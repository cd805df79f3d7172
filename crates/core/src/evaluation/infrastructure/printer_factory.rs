use crate::config::error::ConfigError;
use crate::evaluation::evaluation_options::{EvaluationOptions, PRINTER_NAMES};
use crate::evaluation::evaluation_printer::EvaluationPrinter;

use super::matlab_printer::MatlabPrinter;
use super::tsv_participants_printer::TsvParticipantsPrinter;
use super::tsv_printer::TsvPrinter;

/// Creates the printer named by `options.printer`.
pub fn create_printer(
    options: &EvaluationOptions,
) -> Result<Box<dyn EvaluationPrinter>, ConfigError> {
    log::info!("Using {} evaluation printer", options.printer);
    match options.printer.as_str() {
        "matlab" => Ok(Box::new(MatlabPrinter::new(options))),
        "tsv" => Ok(Box::new(TsvPrinter)),
        "tsv_participants" => Ok(Box::new(TsvParticipantsPrinter)),
        name => Err(ConfigError::UnknownPrinter {
            name: name.to_string(),
            known: PRINTER_NAMES.map(String::from).to_vec(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::infrastructure::test_fixtures::evaluation;
    use rstest::rstest;

    #[rstest]
    #[case::matlab("matlab", "Frame: 1/2")]
    #[case::tsv("tsv", "id\ttimestamp")]
    #[case::tsv_participants("tsv_participants", "timestamp\tpid")]
    fn test_create_known_printer(#[case] name: &str, #[case] prefix: &str) {
        let options = EvaluationOptions {
            printer: name.to_string(),
            ..EvaluationOptions::default()
        };
        let printer = create_printer(&options).unwrap();
        let mut out = Vec::new();
        printer.print(&evaluation(options), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with(prefix));
    }

    #[test]
    fn test_unknown_printer_lists_known_ones() {
        let options = EvaluationOptions {
            printer: "csv".to_string(),
            ..EvaluationOptions::default()
        };
        let err = create_printer(&options).err().unwrap();
        assert_eq!(
            err.to_string(),
            "unknown evaluation printer 'csv', use one of: matlab, tsv, tsv_participants"
        );
    }
}
