//! nice-select replay - Main Entry Point
//!
//! Usage: `nice-select-replay <markup.html> <scenario.json>`

mod scenario;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use scenario::{Replay, Scenario};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(markup_path), Some(scenario_path)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: nice-select-replay <markup.html> <scenario.json>");
    };

    let html = std::fs::read_to_string(&markup_path)
        .with_context(|| format!("reading {markup_path}"))?;
    let markup = nice_html::parse_host(&html, nice_select::TAG_NAME)
        .with_context(|| format!("parsing {markup_path}"))?;

    let json = std::fs::read_to_string(&scenario_path)
        .with_context(|| format!("reading {scenario_path}"))?;
    let scenario = Scenario::from_json(&json)?;

    tracing::info!(actions = scenario.actions.len(), "starting replay");
    let mut replay = Replay::new(&markup);
    let report = replay.run(&scenario)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
