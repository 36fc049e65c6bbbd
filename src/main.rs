use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use tracing::error;
use xdc_deploy::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    dotenv().ok();

    let (ctx, command) = Cli::parse().into_parts();

    // Logs go to stderr, stdout only carries the deployment report
    tracing_subscriber::fmt()
        .pretty()
        .with_writer(std::io::stderr)
        .init();

    match command.run(&ctx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
