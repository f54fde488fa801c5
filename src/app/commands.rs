use crate::adapters::storage::LocalStorage;
use crate::app::pipelines::{ExtractPipeline, UploadPipeline};
use crate::config::cli::{ExtractArgs, LogArgs, UploadArgs, VerifyArgs};
use crate::config::settings::{self, Settings};
use crate::config::ApiConfig;
use crate::core::etl::EtlEngine;
use crate::core::Storage;
use crate::domain::model::{RESPONSE_SUFFIX, TRACK_SUFFIX};
use crate::domain::services::missing_responses;
use crate::utils::error::{EtlError, Result};
use crate::utils::logger;
use crate::utils::validation::Validate;

pub fn init_logging(log: &LogArgs) {
    if log.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(log.verbose);
    }
}

/// Resolves configuration before touching any file, then runs the upload job.
pub async fn upload(args: &UploadArgs) -> Result<String> {
    args.validate()?;

    let settings = Settings::discover(args.settings.as_deref())?;
    let env_file = settings::discover_env_file()?;
    let config = ApiConfig::from_env(settings, env_file)?
        .with_concurrency(args.concurrency)
        .with_timeout(args.timeout_secs);
    config.validate()?;
    tracing::debug!(
        "Upload config: url={}, map_provider={}, vehicle_type={}, concurrency={}",
        config.api_url,
        config.map_provider,
        config.vehicle_type,
        config.concurrency
    );

    let pipeline = UploadPipeline::new(
        LocalStorage::new(&args.to_process),
        LocalStorage::new(&args.output_dir),
        &config,
    )?;
    EtlEngine::new(pipeline).run().await
}

pub async fn extract(args: &ExtractArgs) -> Result<String> {
    args.validate()?;

    let pipeline = ExtractPipeline::new(LocalStorage::new(&args.to_process), &args.output_dir)
        .skip_invalid(args.skip_invalid);
    EtlEngine::new(pipeline).run().await
}

pub async fn verify(args: &VerifyArgs) -> Result<String> {
    args.validate()?;

    let tracks = LocalStorage::new(&args.to_process)
        .list_files(TRACK_SUFFIX)
        .await?;
    let responses = LocalStorage::new(&args.output_dir)
        .list_files(RESPONSE_SUFFIX)
        .await?;

    let missing = missing_responses(&tracks, &responses);
    if !missing.is_empty() {
        return Err(EtlError::IncompleteResponsesError { missing });
    }

    Ok(format!("All {} tracks have a response", tracks.len()))
}

/// Logs `error`, prints the friendly form to stderr and exits with the severity's code.
pub fn exit_with_error(error: EtlError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());

    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());

    std::process::exit(error.severity().exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn verify_args(tracks: &TempDir, responses: &TempDir) -> VerifyArgs {
        VerifyArgs {
            to_process: tracks.path().to_path_buf(),
            output_dir: responses.path().to_path_buf(),
            log: LogArgs {
                verbose: false,
                log_json: false,
            },
        }
    }

    #[tokio::test]
    async fn test_verify_reports_missing_responses() {
        let tracks = TempDir::new().unwrap();
        let responses = TempDir::new().unwrap();
        std::fs::write(tracks.path().join("a.csv"), "x").unwrap();
        std::fs::write(tracks.path().join("b.csv"), "x").unwrap();
        std::fs::write(responses.path().join("a.json"), "{}").unwrap();

        let err = verify(&verify_args(&tracks, &responses)).await.unwrap_err();

        match err {
            EtlError::IncompleteResponsesError { missing } => assert_eq!(missing, vec!["b.csv"]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_verify_passes_when_complete() {
        let tracks = TempDir::new().unwrap();
        let responses = TempDir::new().unwrap();
        std::fs::write(tracks.path().join("a.csv"), "x").unwrap();
        std::fs::write(responses.path().join("a.json"), "{}").unwrap();

        let message = verify(&verify_args(&tracks, &responses)).await.unwrap();
        assert_eq!(message, "All 1 tracks have a response");
    }

    #[tokio::test]
    async fn test_extract_missing_input_directory_is_error() {
        let output = TempDir::new().unwrap();
        let args = ExtractArgs {
            to_process: PathBuf::from("/definitely/not/a/dir"),
            output_dir: output.path().to_path_buf(),
            skip_invalid: false,
            log: LogArgs {
                verbose: false,
                log_json: false,
            },
        };

        assert!(matches!(extract(&args).await, Err(EtlError::IoError(_))));
    }
}
