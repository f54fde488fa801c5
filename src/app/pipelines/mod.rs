pub mod extract_pipeline;
pub mod upload_pipeline;

pub use extract_pipeline::{ExtractPipeline, LoadedDocument};
pub use upload_pipeline::UploadPipeline;
