pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{LocalStorage, TollApiClient};
pub use app::pipelines::{ExtractPipeline, UploadPipeline};
pub use config::{settings::Settings, ApiConfig};
pub use core::etl::EtlEngine;
pub use utils::error::{EtlError, Result};
