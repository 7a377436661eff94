use crate::cli::args::{BatchArgs, Cli, Commands};
use crate::config::ProcessorConfig;
use crate::error::{ProcessingError, Result};
use crate::processors::{BatchCleaner, CleaningOutcome, TracingSink};
use crate::readers::LineReader;
use crate::reporting::BatchReport;
use crate::utils::constants::DEFAULT_REJECTION_SAMPLES;
use crate::utils::filename::{default_report_filename, extract_batch_date};
use crate::utils::progress::ProgressReporter;
use chrono::{Local, NaiveDate};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Process {
            batch,
            min_duration,
            min_speed,
            max_speed,
            output,
            json,
        } => {
            let mut config = load_config(&batch)?;
            if let Some(minutes) = min_duration {
                config.min_duration_minutes = minutes;
            }
            if let Some(speed) = min_speed {
                config.min_speed_kph = speed;
            }
            if max_speed.is_some() {
                config.max_speed_kph = max_speed;
            }
            let config = config.validated()?;

            let batch_date = batch_date_of(&batch.input);
            println!("Processing journeys...");
            println!("Input file: {}", batch.input.display());
            println!("Time zone: {}, Workers: {}", config.timezone, config.max_workers);

            let outcome =
                clean_batch(&batch, &config, DEFAULT_REJECTION_SAMPLES, cli.quiet).await?;

            let report = BatchReport::build(
                batch_date,
                &config.timezone,
                outcome.report,
                &outcome.records,
                config.duration_range(),
                config.speed_range(),
            );
            println!("\n{}", report.render());

            let output_file = output.or_else(|| {
                json.then(|| {
                    default_report_filename(batch_date.unwrap_or_else(|| Local::now().date_naive()))
                })
            });

            if let Some(path) = output_file {
                report.write_json(&path)?;
                println!("Report written to {}", path.display());
            }

            println!("Processing complete!");
        }

        Commands::Validate { batch, samples } => {
            let config = load_config(&batch)?.validated()?;

            println!("Validating journeys...");
            println!("Input file: {}", batch.input.display());

            let outcome = clean_batch(&batch, &config, samples, cli.quiet).await?;
            println!("\n{}", outcome.report.summary());

            if outcome.report.rejected() == 0 {
                println!("✅ All lines passed validation checks");
            } else {
                println!("⚠️  Found {} rejected lines", outcome.report.rejected());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| ProcessingError::Config(format!("Failed to initialise logging: {}", e)))
}

/// Config file and environment first, then command-line flags on top.
fn load_config(batch: &BatchArgs) -> Result<ProcessorConfig> {
    let mut config = ProcessorConfig::load(batch.config.as_deref())?;

    if let Some(ref timezone) = batch.timezone {
        config.timezone = timezone.clone();
    }
    if let Some(max_workers) = batch.max_workers {
        config.max_workers = max_workers;
    }

    Ok(config)
}

fn batch_date_of(path: &Path) -> Option<NaiveDate> {
    match extract_batch_date(path) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(error = %e, "Batch date unavailable");
            None
        }
    }
}

/// Read and clean the whole file off the async runtime.
async fn clean_batch(
    batch: &BatchArgs,
    config: &ProcessorConfig,
    samples: usize,
    quiet: bool,
) -> Result<CleaningOutcome> {
    let reader = LineReader::new()
        .with_skip_header(batch.skip_header)
        .with_mmap(batch.mmap);
    let cleaner = BatchCleaner::new(config.record_cleaner()?)
        .with_max_workers(config.max_workers)
        .with_max_samples(samples);
    let input = batch.input.clone();

    tokio::task::spawn_blocking(move || -> Result<CleaningOutcome> {
        let spinner = ProgressReporter::new_spinner("Reading batch file...", quiet);
        let lines = reader.read_lines(&input)?;
        spinner.finish_with_message(&format!("Read {} lines", lines.len()));
        tracing::info!(lines = lines.len(), "Read batch file");

        let progress = ProgressReporter::new(lines.len() as u64, "Cleaning journeys...", quiet);
        let outcome = cleaner.clean_lines(&lines, &TracingSink, Some(&progress))?;

        tracing::info!(
            valid = outcome.report.valid_records,
            rejected = outcome.report.rejected(),
            "Cleaning finished"
        );
        Ok(outcome)
    })
    .await?
}
