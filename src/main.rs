use clap::Parser;
use scene_upload::cli::{run, Cli};
use scene_upload::publish::UploadOutcome;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout is reserved for the single result line.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("CLI arguments parsed, invoking run");

    let outcome = match run(cli).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "CLI exited with error");
            UploadOutcome::failure(format!("{e:#}"))
        }
    };
    println!("{outcome}");
    std::process::exit(outcome.exit_code());
}
