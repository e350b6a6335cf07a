use clap::Parser;
use fcprep_cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let summary = fcprep_cli::run(&cli)?;
    tracing::info!(
        read = summary.read,
        written = summary.written,
        "dataset conversion finished"
    );
    Ok(())
}
