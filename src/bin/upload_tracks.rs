use clap::Parser;
use toll_etl::app::commands;
use toll_etl::config::cli::UploadArgs;

#[tokio::main]
async fn main() {
    let args = UploadArgs::parse();
    commands::init_logging(&args.log);

    tracing::info!("🚀 Uploading GPS tracks from {}", args.to_process.display());

    match commands::upload(&args).await {
        Ok(output_dir) => {
            tracing::info!("✅ Responses saved to {}", output_dir);
            println!("Responses saved to {}", output_dir);
        }
        Err(e) => commands::exit_with_error(e),
    }
}
