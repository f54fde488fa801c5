use crate::core::{Pipeline, ResponseDocument, Storage, TransformResult};
use crate::domain::model::{ExtractSummary, OUTPUT_FILE_NAME, OUTPUT_HEADER, RESPONSE_SUFFIX};
use crate::domain::services::rows_for_document;
use crate::utils::error::{EtlError, Result};
use std::path::PathBuf;

/// A response file as read from disk, parsed or not.
#[derive(Debug, Clone)]
pub enum LoadedDocument {
    Parsed(ResponseDocument),
    Invalid { file_name: String },
}

/// Flattens every response document under `source` into `<output_dir>/transformed_data.csv`.
pub struct ExtractPipeline<S: Storage> {
    source: S,
    output_dir: PathBuf,
    skip_invalid: bool,
}

impl<S: Storage> ExtractPipeline<S> {
    pub fn new(source: S, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            output_dir: output_dir.into(),
            skip_invalid: false,
        }
    }

    /// Log and skip unparsable documents instead of aborting the run.
    pub fn skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(OUTPUT_FILE_NAME)
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for ExtractPipeline<S> {
    type Input = LoadedDocument;
    type Output = TransformResult;

    fn name(&self) -> &str {
        "extract"
    }

    async fn extract(&self) -> Result<Vec<LoadedDocument>> {
        let names = self.source.list_files(RESPONSE_SUFFIX).await?;
        tracing::info!(
            "Found {} response files in {}",
            names.len(),
            self.source.location()
        );

        let mut documents = Vec::with_capacity(names.len());
        for file_name in names {
            let raw = self.source.read_file(&file_name).await?;
            match serde_json::from_slice(&raw) {
                Ok(body) => {
                    documents.push(LoadedDocument::Parsed(ResponseDocument { file_name, body }))
                }
                Err(source) if self.skip_invalid => {
                    tracing::warn!("⚠️ Skipping {}: {}", file_name, source);
                    documents.push(LoadedDocument::Invalid { file_name });
                }
                Err(source) => {
                    return Err(EtlError::InvalidDocument {
                        file: file_name,
                        source,
                    })
                }
            }
        }

        Ok(documents)
    }

    async fn transform(&self, data: Vec<LoadedDocument>) -> Result<TransformResult> {
        let mut rows = Vec::new();
        let mut summary = ExtractSummary::default();

        for document in data {
            match document {
                LoadedDocument::Parsed(doc) => {
                    summary.documents += 1;
                    let doc_rows = rows_for_document(&doc);
                    if doc_rows.is_empty() {
                        tracing::debug!("{} has no toll crossings", doc.file_name);
                        summary.documents_without_tolls += 1;
                    } else {
                        tracing::debug!("{}: {} toll crossings", doc.file_name, doc_rows.len());
                    }
                    rows.extend(doc_rows);
                }
                LoadedDocument::Invalid { file_name } => {
                    summary.invalid_documents.push(file_name);
                }
            }
        }

        summary.rows = rows.len();
        Ok(TransformResult { rows, summary })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        std::fs::create_dir_all(&self.output_dir)?;
        let output_path = self.output_path();

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(&output_path)?;
            writer.write_record(OUTPUT_HEADER)?;
            for row in &result.rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }

        let summary = &result.summary;
        tracing::info!(
            "📊 Extract summary: {} documents, {} without tolls, {} invalid, {} rows",
            summary.documents,
            summary.documents_without_tolls,
            summary.invalid_documents.len(),
            summary.rows
        );
        if !summary.invalid_documents.is_empty() {
            tracing::warn!(
                "Skipped invalid documents: {}",
                summary.invalid_documents.join(", ")
            );
        }

        Ok(output_path.display().to_string())
    }
}
