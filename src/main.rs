mod cli;
mod config;
mod devices;
mod engine;
mod models;
mod util;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.with_writer(std::io::stderr)
		.init();

	match run() {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("error: {e:#}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> anyhow::Result<()> {
	let cli = cli::Cli::parse();
	let cfg = config::Config::resolve(&cli).context("resolving configuration")?;
	cfg.validate().context("invalid configuration")?;
	engine::run(&cfg).context("import failed")?;
	Ok(())
}
