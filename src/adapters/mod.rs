// Adapters layer: concrete implementations for external systems.

pub mod http;
pub mod storage;

pub use http::{TollApiClient, TollApiResponse};
pub use storage::LocalStorage;
