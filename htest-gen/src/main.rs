//! CLI entrypoint for `htest-gen`.

mod cli;

use std::io::IsTerminal;

use clap::Parser;
use htest_gen::config;
use htest_gen::{GenError, GenerateRequest, generate};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();
    run().map_err(color_eyre::eyre::Report::from)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr = std::io::stderr();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(stderr.is_terminal())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), GenError> {
    let args = Args::parse();
    info!(version = env!("CARGO_PKG_VERSION"), "htest-gen test registration generator");

    let settings = config::load(args.config.as_deref(), &args.overrides())?;
    info!(profile = settings.profile.as_str(), "using marker profile");
    let request = GenerateRequest {
        source_dir: settings.source_dir.clone(),
        namespace_override: settings.namespace_override().map(str::to_owned),
        vocabulary: settings.resolved_vocabulary(),
    };

    let summary = generate(&request)?;
    info!(
        discovered = summary.discovered,
        updated = summary.updated.len(),
        unchanged = summary.unchanged.len(),
        skipped_empty = summary.skipped_empty,
        "generation complete"
    );
    Ok(())
}
