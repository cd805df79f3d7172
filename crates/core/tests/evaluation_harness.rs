use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use rstest::rstest;
use tempfile::TempDir;

use fformation_core::config::options::Options;
use fformation_core::dataset::directory::Dataset;
use fformation_core::detection::domain::group_detector::GroupDetector;
use fformation_core::detection::infrastructure::detector_registry::DetectorRegistry;
use fformation_core::evaluation::evaluate_use_case::Evaluation;
use fformation_core::evaluation::evaluation_logger::NullEvaluationLogger;
use fformation_core::evaluation::evaluation_options::EvaluationOptions;
use fformation_core::evaluation::frame_executor::FrameExecutor;
use fformation_core::evaluation::infrastructure::printer_factory::create_printer;
use fformation_core::evaluation::infrastructure::sequential_frame_executor::SequentialFrameExecutor;
use fformation_core::evaluation::infrastructure::threaded_frame_executor::ThreadedFrameExecutor;
use fformation_core::grouping::domain::confusion_matrix::ConfusionMatrix;

const FEATURES: &str = r#"{
    "timestamp": [1, 2, 3],
    "features": [
        [["A", 0, 0], ["B", 1, 0], ["C", 5, 5]],
        [[1, 0, 0, 0.5], [2, 1, 0], [3, 5, 5]],
        [["A", 0, 0], ["B", 1, 0]]
    ]
}"#;

const GROUND_TRUTH: &str = r#"{
    "GTgroups": [[["A", "B"]], [[1, 2, 3]]],
    "GTtimestamp": [1, 2]
}"#;

const SETTINGS: &str = r#"{
    "params": {
        "covmat": [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
        "empty": 0.5,
        "radius": 1,
        "nsamples": 20,
        "quant": 1
    },
    "mdl": 1,
    "stride": 0.5
}"#;

fn write_dataset(dir: &Path) {
    fs::write(dir.join("features.json"), FEATURES).unwrap();
    fs::write(dir.join("groundtruth.json"), GROUND_TRUTH).unwrap();
    fs::write(dir.join("settings.json"), SETTINGS).unwrap();
}

fn open_dataset() -> (TempDir, Dataset) {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path());
    let dataset = Dataset::open(dir.path()).unwrap();
    (dir, dataset)
}

fn detector(dataset: &Dataset, config: &str) -> Box<dyn GroupDetector> {
    let (name, mut options) = DetectorRegistry::parse_config(config).unwrap();
    for option in dataset.settings.detector_options().iter() {
        options.insert(option.clone());
    }
    DetectorRegistry::with_defaults().create(&name, &options).unwrap()
}

fn evaluate(
    dataset: &Dataset,
    detector: &dyn GroupDetector,
    options: &EvaluationOptions,
    executor: &dyn FrameExecutor,
) -> Evaluation {
    Evaluation::run(
        &dataset.features.observations,
        &dataset.ground_truth,
        detector,
        options,
        executor,
        &mut NullEvaluationLogger,
    )
}

#[test]
fn test_grow_detector_on_dataset() {
    let (_dir, dataset) = open_dataset();
    let detector = detector(&dataset, "grow");
    let evaluation = evaluate(
        &dataset,
        detector.as_ref(),
        &EvaluationOptions::default(),
        &SequentialFrameExecutor,
    );

    assert_eq!(evaluation.skipped(), 1);
    assert_eq!(evaluation.failed(), 0);
    assert_eq!(
        evaluation.confusion_matrices(),
        vec![ConfusionMatrix::new(1, 0, 1, 0), ConfusionMatrix::new(1, 0, 0, 1)]
    );
    assert_relative_eq!(evaluation.mean_precision(), 1.0);
    assert_relative_eq!(evaluation.mean_recall(), 0.75);
}

#[test]
fn test_settings_do_not_override_explicit_options() {
    let (_dir, dataset) = open_dataset();
    let detector = detector(&dataset, "grow@mdl=100");
    assert_eq!(detector.options().get_value::<f64>("mdl").unwrap(), 100.0);
    assert_eq!(detector.options().get_value::<f64>("stride").unwrap(), 0.5);

    let evaluation = evaluate(
        &dataset,
        detector.as_ref(),
        &EvaluationOptions::default(),
        &SequentialFrameExecutor,
    );
    // everyone ends up in one group
    assert_eq!(evaluation.frames()[1].classification.id_groups().len(), 1);
}

#[rstest]
#[case::one("one")]
#[case::none("none")]
#[case::grow("grow")]
#[case::shrink("shrink")]
#[case::shrink2("shrink2")]
fn test_threaded_matches_sequential(#[case] config: &str) {
    let (_dir, dataset) = open_dataset();
    let detector = detector(&dataset, config);
    let options = EvaluationOptions::from_options(
        &"modify_rotations=random@modify_proportion=0.5@seed=3".parse::<Options>().unwrap(),
    )
    .unwrap();

    let sequential = evaluate(&dataset, detector.as_ref(), &options, &SequentialFrameExecutor);
    let threaded = evaluate(
        &dataset,
        detector.as_ref(),
        &options,
        &ThreadedFrameExecutor::new(3),
    );
    assert_eq!(sequential.frames(), threaded.frames());
}

#[rstest]
#[case::matlab("matlab", 6)]
#[case::tsv("tsv", 3)]
#[case::tsv_participants("tsv_participants", 7)]
fn test_printers(#[case] printer: &str, #[case] lines: usize) {
    let (_dir, dataset) = open_dataset();
    let detector = detector(&dataset, "grow");
    let options = EvaluationOptions {
        printer: printer.to_string(),
        print_perfect_matches: false,
        ..EvaluationOptions::default()
    };
    let evaluation = evaluate(&dataset, detector.as_ref(), &options, &SequentialFrameExecutor);

    let mut out = Vec::new();
    create_printer(&options)
        .unwrap()
        .print(&evaluation, &mut out)
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), lines);
}
