use clap::Parser;
use karaoke_bot::cli::Cli;
use tracing::info;
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting karaoke-bot v{}", env!("CARGO_PKG_VERSION"));

    cli.run().await?;

    Ok(())
}
