use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "journey-processor")]
#[command(about = "Daily vehicle-journey batch processor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide progress spinners")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

/// Options shared by every command that reads a batch file.
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[arg(short, long, help = "Input batch file of journey lines")]
    pub input: PathBuf,

    #[arg(long, help = "Configuration file (TOML, JSON, YAML, ...)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "IANA time zone for timestamps [default: UTC]")]
    pub timezone: Option<String>,

    #[arg(long, help = "Worker threads for cleaning [default: CPU count]")]
    pub max_workers: Option<usize>,

    #[arg(long, default_value = "false", help = "Skip the first non-blank line")]
    pub skip_header: bool,

    #[arg(long, default_value = "false", help = "Read the file through a memory map")]
    pub mmap: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a batch file and run the journey queries
    Process {
        #[command(flatten)]
        batch: BatchArgs,

        #[arg(long, help = "Minimum journey duration in minutes [default: 90]")]
        min_duration: Option<f64>,

        #[arg(long, help = "Minimum average speed in km/h [default: 0]")]
        min_speed: Option<f64>,

        #[arg(long, help = "Maximum average speed in km/h [default: unbounded]")]
        max_speed: Option<f64>,

        #[arg(
            short,
            long,
            help = "Write the JSON report here [default with --json: output/journey-report-{YYMMDD}.json]"
        )]
        output: Option<PathBuf>,

        #[arg(long, default_value = "false", help = "Write the JSON report")]
        json: bool,
    },

    /// Clean a batch file and report rejected lines without running queries
    Validate {
        #[command(flatten)]
        batch: BatchArgs,

        #[arg(long, default_value = "10", help = "Rejected lines to show")]
        samples: usize,
    },
}
