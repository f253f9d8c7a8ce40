use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use api_key_preflight::catalog;
use api_key_preflight::config::Config;
use api_key_preflight::environment::Environment;
use api_key_preflight::report;

// The checks run one after the other, so there's no use for a multithreaded runtime.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Log records go to stderr, keeping stdout for the report.
    // `RUST_LOG=debug` shows what the env file parser and the catalog queries are doing.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Exits with a usage message on bad arguments. None are required.
    let config = Config::parse();

    let connector = catalog::default_connector();

    let stdout = std::io::stdout();
    let summary = report::run(
        &config,
        Environment::from_process(),
        connector.as_deref(),
        &mut stdout.lock(),
    )
    .await
    .context("preflight checks could not run")?;

    Ok(ExitCode::from(summary.exit_code()))
}
