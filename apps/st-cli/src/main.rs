use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use st_app::{
    AppConfig, AppError, AppResult, ArtifactWriter, EstimateSummary, LoadedDataset,
    OutcomeSummary, Pipeline, UserRequest, load_config,
};
use st_core::PlantParameters;
use st_results::AnalysisReport;
use tracing_subscriber::EnvFilter;

mod prompt;

use prompt::{Prompter, parse_method};

#[derive(Parser)]
#[command(name = "steptune")]
#[command(about = "steptune - FOPDT identification and open-loop PID tuning", long_about = None)]
struct Cli {
    /// Configuration YAML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory for figures, response series and report.json
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify K, theta and tau from a step-test dataset
    Estimate {
        /// Dataset file (.json, .yaml/.yml or .csv)
        dataset: PathBuf,
    },
    /// Identify, tune with Ziegler-Nichols and Cohen-Coon, simulate and plot
    Run {
        /// Dataset file (.json, .yaml/.yml or .csv)
        dataset: PathBuf,
        /// Skip the interactive user-parameter run
        #[arg(long)]
        no_prompt: bool,
    },
    /// Tune and simulate user-supplied plant parameters
    #[command(allow_negative_numbers = true)]
    Tune {
        /// Dataset file; identified for the plant lag and plotted against the response
        dataset: PathBuf,
        /// Tuning rule: zn (Ziegler-Nichols) or co (Cohen-Coon)
        #[arg(long)]
        method: String,
        /// Plant gain
        #[arg(long)]
        k: f64,
        /// Time constant in seconds
        #[arg(long)]
        tau: f64,
        /// Dead time in seconds
        #[arg(long)]
        theta: f64,
        /// Setpoint recorded with the run
        #[arg(long, default_value_t = 1.0)]
        setpoint: f64,
    },
}

fn main() -> AppResult<()> {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), cli.output_dir)?;

    let result = match cli.command {
        Commands::Estimate { dataset } => cmd_estimate(config, &dataset),
        Commands::Run { dataset, no_prompt } => cmd_run(config, &dataset, no_prompt),
        Commands::Tune {
            dataset,
            method,
            k,
            tau,
            theta,
            setpoint,
        } => cmd_tune(config, &dataset, &method, k, tau, theta, setpoint),
    };

    match result {
        Err(AppError::InvalidChoice(message)) => {
            println!("✗ {message}");
            Ok(())
        }
        other => other,
    }
}

fn resolve_config(path: Option<&Path>, output_dir: Option<PathBuf>) -> AppResult<AppConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

fn cmd_estimate(config: AppConfig, dataset: &Path) -> AppResult<()> {
    let pipeline = Pipeline::new(config);
    let loaded = pipeline.load(dataset)?;
    let estimate = pipeline.identify(&loaded.trace)?;
    println!("{}", EstimateSummary(&estimate));
    Ok(())
}

fn cmd_run(config: AppConfig, dataset: &Path, no_prompt: bool) -> AppResult<()> {
    println!("Analyzing dataset: {}", dataset.display());

    let pipeline = Pipeline::new(config);
    let loaded = pipeline.load(dataset)?;
    let (mut report, outcomes) = pipeline.analyze(&loaded)?;
    println!("\n{}", EstimateSummary(&report.estimate));

    let writer = ArtifactWriter::new(
        &pipeline.config().output_dir,
        pipeline.config().figures.clone(),
    )?;
    writer.write_trace(&loaded.trace)?;
    for outcome in &outcomes {
        println!("\n{}", OutcomeSummary(outcome));
        writer.write_outcome(&loaded.trace, outcome)?;
    }
    writer.write_report(&report)?;
    println!("\n✓ Artifacts written to {}", writer.output_dir().display());

    if no_prompt {
        return Ok(());
    }

    let stdin = io::stdin();
    let request = Prompter::new(stdin.lock(), io::stdout()).ask_user_request()?;
    let identified = report.estimate.plant;
    run_user(
        &pipeline,
        &writer,
        &loaded,
        &identified,
        &mut report,
        &request,
    )
}

fn cmd_tune(
    config: AppConfig,
    dataset: &Path,
    method: &str,
    k: f64,
    tau: f64,
    theta: f64,
    setpoint: f64,
) -> AppResult<()> {
    let method = parse_method(method)?;
    let pipeline = Pipeline::new(config);
    let loaded = pipeline.load(dataset)?;
    let estimate = pipeline.identify(&loaded.trace)?;
    println!("{}", EstimateSummary(&estimate));

    let writer = ArtifactWriter::new(
        &pipeline.config().output_dir,
        pipeline.config().figures.clone(),
    )?;
    let identified = estimate.plant;
    let mut report = AnalysisReport::new(loaded.info.clone(), estimate);
    let request = UserRequest {
        method,
        k,
        tau,
        theta,
        setpoint,
    };
    run_user(
        &pipeline,
        &writer,
        &loaded,
        &identified,
        &mut report,
        &request,
    )
}

fn run_user(
    pipeline: &Pipeline,
    writer: &ArtifactWriter,
    loaded: &LoadedDataset,
    identified: &PlantParameters,
    report: &mut AnalysisReport,
    request: &UserRequest,
) -> AppResult<()> {
    let outcome = pipeline.tune_user(request, identified)?;
    println!("\n{}", OutcomeSummary(&outcome));

    writer.write_outcome(&loaded.trace, &outcome)?;
    report.runs.push(outcome.to_run());
    writer.write_report(report)?;
    println!("\n✓ User-parameter run written to {}", writer.output_dir().display());
    Ok(())
}
