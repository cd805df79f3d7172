use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use fformation_core::config::options::{Options, DEFAULT_SEPARATOR};
use fformation_core::dataset::directory::Dataset;
use fformation_core::detection::infrastructure::detector_registry::DetectorRegistry;
use fformation_core::evaluation::evaluate_use_case::Evaluation;
use fformation_core::evaluation::evaluation_logger::LogEvaluationLogger;
use fformation_core::evaluation::evaluation_options::EvaluationOptions;
use fformation_core::evaluation::frame_executor::FrameExecutor;
use fformation_core::evaluation::infrastructure::printer_factory::create_printer;
use fformation_core::evaluation::infrastructure::sequential_frame_executor::SequentialFrameExecutor;
use fformation_core::evaluation::infrastructure::threaded_frame_executor::ThreadedFrameExecutor;

const LIST_DETECTORS: &str = "list";

/// Evaluates F-formation group detectors against an annotated dataset.
#[derive(Parser)]
#[command(name = "fformation-eval")]
struct Cli {
    /// Dataset directory with features.json, groundtruth.json and settings.json.
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Detector configuration, e.g. grow@mdl=10000. "list" prints the
    /// available detectors.
    #[arg(short, long, default_value = LIST_DETECTORS)]
    classificator: String,

    /// Evaluation options, '@'-separated.
    #[arg(
        short,
        long,
        default_value = "threshold=0.6666@modify_rotations=keep@modify_proportion=0.75@seed=0"
    )]
    evaluation: String,

    /// Worker threads for detection (1 = sequential).
    #[arg(long, default_value = "1")]
    threads: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let registry = DetectorRegistry::with_defaults();

    if cli.classificator == LIST_DETECTORS {
        println!("Available detectors: {}", registry.names().join(", "));
        return Ok(());
    }
    validate(&cli)?;

    let evaluation_options =
        EvaluationOptions::from_options(&Options::parse(&cli.evaluation, DEFAULT_SEPARATOR)?)?;
    let printer = create_printer(&evaluation_options)?;

    let dataset_dir = cli
        .dataset
        .as_ref()
        .ok_or("--dataset is required to run an evaluation")?;
    let dataset = Dataset::open(dataset_dir)?;

    let (name, mut detector_options) = DetectorRegistry::parse_config(&cli.classificator)?;
    for option in dataset.settings.detector_options().iter() {
        detector_options.insert(option.clone());
    }
    let detector = registry.create(&name, &detector_options)?;

    let executor = build_executor(cli.threads);
    let mut logger = LogEvaluationLogger::default();
    let evaluation = Evaluation::run(
        &dataset.features.observations,
        &dataset.ground_truth,
        detector.as_ref(),
        &evaluation_options,
        executor.as_ref(),
        &mut logger,
    );
    log::info!(
        "Evaluated {} frames ({} without ground truth, {} failed)",
        evaluation.len(),
        evaluation.skipped(),
        evaluation.failed()
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    printer.print(&evaluation, &mut out)?;
    out.flush()?;
    Ok(())
}

fn build_executor(threads: usize) -> Box<dyn FrameExecutor> {
    if threads > 1 {
        log::info!("Evaluating on {threads} threads");
        Box::new(ThreadedFrameExecutor::new(threads))
    } else {
        Box::new(SequentialFrameExecutor)
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = &cli.dataset {
        if !dir.is_dir() {
            return Err(format!("Dataset directory not found: {}", dir.display()).into());
        }
    }
    if cli.threads == 0 {
        return Err("Threads must be at least 1".into());
    }
    Ok(())
}
