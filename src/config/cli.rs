use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long = "log_json", help = "Emit logs as JSON lines on stderr")]
    pub log_json: bool,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "upload_tracks")]
#[command(about = "Upload GPS track CSV files to the TollGuru API")]
pub struct UploadArgs {
    #[arg(long = "to_process", help = "Folder holding the GPS track CSV files")]
    pub to_process: PathBuf,

    #[arg(long = "output_dir", help = "Folder where the JSON responses are stored")]
    pub output_dir: PathBuf,

    #[arg(long, help = "Maximum uploads in flight [default: min(32, cpus + 4)]")]
    pub concurrency: Option<usize>,

    #[arg(long = "timeout_secs", help = "Per-request timeout in seconds")]
    pub timeout_secs: Option<u64>,

    #[arg(long, help = "TOML settings file [default: ./toll-etl.toml if present]")]
    pub settings: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "extract_tolls")]
#[command(about = "Extract toll crossings from TollGuru JSON responses into one CSV")]
pub struct ExtractArgs {
    #[arg(long = "to_process", help = "Folder holding the JSON responses")]
    pub to_process: PathBuf,

    #[arg(long = "output_dir", help = "Folder where transformed_data.csv is written")]
    pub output_dir: PathBuf,

    #[arg(long = "skip_invalid", help = "Log and skip unparsable JSON files instead of aborting")]
    pub skip_invalid: bool,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "verify")]
#[command(about = "List GPS tracks that have no JSON response yet")]
pub struct VerifyArgs {
    #[arg(long = "to_process", help = "Folder holding the GPS track CSV files")]
    pub to_process: PathBuf,

    #[arg(long = "output_dir", help = "Folder holding the JSON responses")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "toll-etl")]
#[command(about = "Batch toll computation for GPS tracks via the TollGuru API")]
pub struct TollEtlCli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Upload every CSV track and store the raw JSON responses
    Upload(UploadArgs),
    /// Flatten stored JSON responses into transformed_data.csv
    Extract(ExtractArgs),
    /// Check that every CSV track has a stored JSON response
    Verify(VerifyArgs),
}

impl Command {
    pub fn log_args(&self) -> &LogArgs {
        match self {
            Command::Upload(args) => &args.log,
            Command::Extract(args) => &args.log,
            Command::Verify(args) => &args.log,
        }
    }
}

fn validate_dirs(to_process: &std::path::Path, output_dir: &std::path::Path) -> Result<()> {
    validate_path("to_process", &to_process.to_string_lossy())?;
    validate_path("output_dir", &output_dir.to_string_lossy())
}

impl Validate for UploadArgs {
    fn validate(&self) -> Result<()> {
        validate_dirs(&self.to_process, &self.output_dir)?;
        if let Some(concurrency) = self.concurrency {
            validate_positive_number("concurrency", concurrency, 1)?;
        }
        Ok(())
    }
}

impl Validate for ExtractArgs {
    fn validate(&self) -> Result<()> {
        validate_dirs(&self.to_process, &self.output_dir)
    }
}

impl Validate for VerifyArgs {
    fn validate(&self) -> Result<()> {
        validate_dirs(&self.to_process, &self.output_dir)
    }
}
