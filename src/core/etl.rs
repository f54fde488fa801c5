use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let name = self.pipeline.name();
        let started = Instant::now();
        tracing::info!("Starting {} job", name);

        tracing::debug!("{}: extract", name);
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("{}: found {} input files", name, raw_data.len());

        tracing::debug!("{}: transform", name);
        let transformed = self.pipeline.transform(raw_data).await?;

        tracing::debug!("{}: load", name);
        let output_path = self.pipeline.load(transformed).await?;

        tracing::info!(
            "{} job finished in {:?}, output: {}",
            name,
            started.elapsed(),
            output_path
        );
        Ok(output_path)
    }
}
