use anyhow::{Context, Result};
use clap::Parser;
use training_summary::cli::Cli;
use training_summary::SummaryRequest;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("training_summary=info".parse()?),
        )
        .init();

    let request = SummaryRequest::from(Cli::parse());
    let saved = training_summary::run(&request).context("failed to build training summary")?;

    println!("Saved: {}", saved.display());
    Ok(())
}
