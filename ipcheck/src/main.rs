use anyhow::{Context, bail};
use ipcheck::config::FixtureConfig;
use ipcheck::runner;
use log::info;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ipcheck.yaml".into())
        .into();

    let config = FixtureConfig::load(path).context("Failed to load fixtures")?;
    let report = runner::run(&config)?;

    info!(
        "{} of {} checksum cases passed",
        report.passed(),
        report.outcomes.len()
    );

    if !report.all_passed() {
        let failed: Vec<_> = report.failed().map(|o| o.name.as_str()).collect();
        bail!("Checksum cases failed: {}", failed.join(", "));
    }

    Ok(())
}
