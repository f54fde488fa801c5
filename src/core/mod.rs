pub mod etl;

pub use crate::domain::model::{ResponseDocument, TollRow, TrackFile, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
