use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

pub const UPLOAD_PATH: &str = "/toll/v2/gps-tracks-csv-upload";

/// Status and raw body of one upload. The body is kept as bytes so it can be persisted verbatim.
#[derive(Debug, Clone)]
pub struct TollApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TollApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Thin wrapper over `reqwest::Client` for the GPS track upload endpoint.
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct TollApiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    map_provider: String,
    vehicle_type: String,
}

impl TollApiClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: format!("{}{}", config.api_url().trim_end_matches('/'), UPLOAD_PATH),
            api_key: config.api_key().to_string(),
            map_provider: config.map_provider().to_string(),
            vehicle_type: config.vehicle_type().to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POSTs one CSV track. Any HTTP status is returned as a response; only transport failures are errors.
    pub async fn upload_track(&self, csv: Vec<u8>) -> Result<TollApiResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[
                ("mapProvider", self.map_provider.as_str()),
                ("vehicleType", self.vehicle_type.as_str()),
            ])
            .header("x-api-key", &self.api_key)
            .header(CONTENT_TYPE, "text/csv")
            .body(csv)
            .send()
            .await?;

        let status = response.status().as_u16();
        tracing::debug!("Tolling API responded with status {}", status);

        let body = response.bytes().await?.to_vec();
        Ok(TollApiResponse { status, body })
    }
}
