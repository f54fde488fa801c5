use clap::Parser;
use toll_etl::app::commands;
use toll_etl::config::cli::{Command, TollEtlCli};

#[tokio::main]
async fn main() {
    let cli = TollEtlCli::parse();
    commands::init_logging(cli.command.log_args());

    tracing::info!("Starting toll-etl");
    tracing::debug!("CLI args: {:?}", cli);

    let result = match &cli.command {
        Command::Upload(args) => commands::upload(args).await,
        Command::Extract(args) => commands::extract(args).await,
        Command::Verify(args) => commands::verify(args).await,
    };

    match result {
        Ok(message) => {
            tracing::info!("✅ Done: {}", message);
            println!("{}", message);
        }
        Err(e) => commands::exit_with_error(e),
    }
}
