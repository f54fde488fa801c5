use crate::adapters::http::TollApiClient;
use crate::core::{ConfigProvider, Pipeline, Storage, TrackFile};
use crate::domain::model::{UploadOutcome, UploadReport, UploadStatus, TRACK_SUFFIX};
use crate::utils::error::{EtlError, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// Uploads every track under `source` and writes each response body into `sink`.
pub struct UploadPipeline<S: Storage + Clone + 'static> {
    source: S,
    sink: S,
    client: TollApiClient,
    concurrency: usize,
}

impl<S: Storage + Clone + 'static> UploadPipeline<S> {
    pub fn new<C: ConfigProvider>(source: S, sink: S, config: &C) -> Result<Self> {
        Ok(Self {
            source,
            sink,
            client: TollApiClient::new(config)?,
            concurrency: config.concurrency().max(1),
        })
    }
}

async fn upload_one<S: Storage>(
    source: &S,
    sink: &S,
    client: &TollApiClient,
    track: &TrackFile,
) -> Result<UploadStatus> {
    let csv = source.read_file(&track.file_name).await?;
    tracing::debug!("Uploading {} ({} bytes)", track.file_name, csv.len());

    let response = client.upload_track(csv).await?;
    sink.write_file(&track.response_file_name(), &response.body).await?;

    if response.is_success() {
        Ok(UploadStatus::Saved {
            status: response.status,
        })
    } else {
        Ok(UploadStatus::Rejected {
            status: response.status,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage + Clone + 'static> Pipeline for UploadPipeline<S> {
    type Input = TrackFile;
    type Output = UploadReport;

    fn name(&self) -> &str {
        "upload"
    }

    async fn extract(&self) -> Result<Vec<TrackFile>> {
        self.sink.create_root().await?;

        let names = self.source.list_files(TRACK_SUFFIX).await?;
        tracing::info!(
            "Found {} track files in {}",
            names.len(),
            self.source.location()
        );
        Ok(names.into_iter().map(TrackFile::new).collect())
    }

    async fn transform(&self, tracks: Vec<TrackFile>) -> Result<UploadReport> {
        let started = Instant::now();
        let permits = Arc::new(Semaphore::new(self.concurrency));
        tracing::info!(
            "Uploading {} tracks to {} with {} workers",
            tracks.len(),
            self.client.endpoint(),
            self.concurrency
        );

        let mut handles = Vec::with_capacity(tracks.len());
        for track in tracks {
            let permits = Arc::clone(&permits);
            let source = self.source.clone();
            let sink = self.sink.clone();
            let client = self.client.clone();
            let task_track = track.clone();

            let handle = tokio::spawn(async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return UploadStatus::Failed {
                            error: e.to_string(),
                        }
                    }
                };

                match upload_one(&source, &sink, &client, &task_track).await {
                    Ok(status) => status,
                    Err(e) => UploadStatus::Failed {
                        error: e.to_string(),
                    },
                }
            });
            handles.push((track, handle));
        }

        // Every task is awaited; one failure never cancels its siblings.
        let mut outcomes = Vec::with_capacity(handles.len());
        for (track, handle) in handles {
            let status = handle.await.unwrap_or_else(|e| UploadStatus::Failed {
                error: format!("upload task aborted: {}", e),
            });

            match &status {
                UploadStatus::Saved { status } => tracing::info!(
                    "✅ {} -> {} ({})",
                    track.file_name,
                    track.response_file_name(),
                    status
                ),
                UploadStatus::Rejected { status } => tracing::warn!(
                    "⚠️ {} rejected with status {}, response kept in {}",
                    track.file_name,
                    status,
                    track.response_file_name()
                ),
                UploadStatus::Failed { error } => {
                    tracing::error!("❌ {} failed: {}", track.file_name, error)
                }
            }
            outcomes.push(UploadOutcome { track, status });
        }

        Ok(UploadReport {
            outcomes,
            elapsed: started.elapsed(),
        })
    }

    async fn load(&self, report: UploadReport) -> Result<String> {
        let failed = report.failed_files();
        tracing::info!(
            "📊 Upload summary: {} of {} succeeded, {} failed, took {:?}",
            report.succeeded(),
            report.total(),
            failed.len(),
            report.elapsed
        );

        if !failed.is_empty() {
            return Err(EtlError::UploadBatchError {
                failed,
                total: report.total(),
            });
        }

        Ok(self.sink.location())
    }
}
