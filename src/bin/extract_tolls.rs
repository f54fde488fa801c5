use clap::Parser;
use toll_etl::app::commands;
use toll_etl::config::cli::ExtractArgs;

#[tokio::main]
async fn main() {
    let args = ExtractArgs::parse();
    commands::init_logging(&args.log);

    tracing::info!("🚀 Extracting tolls from {}", args.to_process.display());

    match commands::extract(&args).await {
        Ok(output_path) => {
            tracing::info!("✅ Extraction completed");
            println!("Processing completed. Results saved to {}", output_path);
        }
        Err(e) => commands::exit_with_error(e),
    }
}
