use serde::Serialize;
use std::time::Duration;

pub const TRACK_SUFFIX: &str = ".csv";
pub const RESPONSE_SUFFIX: &str = ".json";
pub const OUTPUT_FILE_NAME: &str = "transformed_data.csv";

/// Column order of `transformed_data.csv`.
pub const OUTPUT_HEADER: [&str; 12] = [
    "unit",
    "trip_id",
    "toll_loc_id_start",
    "toll_loc_id_end",
    "toll_loc_name_start",
    "toll_loc_name_end",
    "toll_system_type",
    "entry_time",
    "exit_time",
    "tag_cost",
    "cash_cost",
    "license_plate_cost",
];

/// A CSV GPS trace for one trip, waiting to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackFile {
    pub file_name: String,
}

impl TrackFile {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// `trip1.csv` -> `trip1.json`. Only the trailing suffix is replaced.
    pub fn response_file_name(&self) -> String {
        response_name_for(&self.file_name)
    }
}

pub fn response_name_for(track_file_name: &str) -> String {
    let stem = track_file_name
        .strip_suffix(TRACK_SUFFIX)
        .unwrap_or(track_file_name);
    format!("{}{}", stem, RESPONSE_SUFFIX)
}

/// A raw response body as persisted by the uploader, keyed by its file name.
#[derive(Debug, Clone)]
pub struct ResponseDocument {
    pub file_name: String,
    pub body: serde_json::Value,
}

/// One flattened toll crossing. Field order matches [`OUTPUT_HEADER`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TollRow {
    pub unit: String,
    pub trip_id: String,
    pub toll_loc_id_start: String,
    pub toll_loc_id_end: String,
    pub toll_loc_name_start: String,
    pub toll_loc_name_end: String,
    pub toll_system_type: String,
    pub entry_time: String,
    pub exit_time: String,
    pub tag_cost: String,
    pub cash_cost: String,
    pub license_plate_cost: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    /// 2xx response, body persisted.
    Saved { status: u16 },
    /// Non-2xx response, body persisted anyway.
    Rejected { status: u16 },
    /// Transport or I/O failure, nothing persisted.
    Failed { error: String },
}

#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub track: TrackFile,
    pub status: UploadStatus,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, UploadStatus::Saved { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploadReport {
    pub outcomes: Vec<UploadOutcome>,
    pub elapsed: Duration,
}

impl UploadReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Track file names whose upload did not end in a 2xx response, sorted.
    pub fn failed_files(&self) -> Vec<String> {
        let mut failed: Vec<String> = self
            .outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.track.file_name.clone())
            .collect();
        failed.sort();
        failed
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtractSummary {
    pub documents: usize,
    pub documents_without_tolls: usize,
    pub invalid_documents: Vec<String>,
    pub rows: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub rows: Vec<TollRow>,
    pub summary: ExtractSummary,
}
