mod advisor;
mod cli;
mod cluster;
mod config;
mod triage;
mod types;

use clap::Parser;
use tracing::error;

use advisor::CompletionClient;
use cli::Cli;
use cluster::KubeClusterReader;
use config::Settings;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    let client = cluster::connect(&settings).await?;
    let reader = KubeClusterReader::new(client);
    let advisor = CompletionClient::new(&settings);

    let mut stdout = std::io::stdout().lock();
    triage::run(&reader, &advisor, triage::NAMESPACE, &mut stdout).await?;
    Ok(())
}
