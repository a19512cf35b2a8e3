// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config_examples::config::Config;
use config_examples::kubernetes::create_client;
use config_examples::runner::{select_variants, ScenarioRunner};
use config_examples::scenarios::{discover_all, find_config_files, log_found_templates};

/// Render scenario templates, install them into a cluster and wait for them to become ready
#[derive(Parser, Debug)]
#[command(name = "config-examples", version, about, long_about = None)]
struct Cli {
    /// Variants to run: `folder`, `folder/scenario` or `folder/scenario/variant`
    #[arg(value_name = "SELECTOR")]
    selectors: Vec<String>,

    /// Additional selector, may be repeated
    #[arg(long = "scenario", value_name = "SELECTOR")]
    scenarios: Vec<String>,

    /// Dot-path override applied to the primary document, e.g. `spec.rekor.enabled=false`
    #[arg(long = "set", value_name = "PATH=VALUE")]
    overrides: Vec<String>,

    /// Render and check templates without touching a cluster
    #[arg(long)]
    dry_run: bool,

    /// Print the selected variants and the YAML files under the scenarios root, then exit
    #[arg(long)]
    list: bool,

    /// Root directory holding the scenarios (overrides SCENARIOS_DIR)
    #[arg(long)]
    scenarios_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("config_examples=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(dir) = cli.scenarios_dir {
        config.scenarios_dir = dir;
    }
    config.dry_run |= cli.dry_run;
    info!(
        "Configuration loaded: scenarios_dir={}, dry_run={}, concurrency={}",
        config.scenarios_dir.display(),
        config.dry_run,
        config.concurrency
    );

    let variants = discover_all(&config.scenarios_dir).context("Failed to discover scenarios")?;
    log_found_templates(&variants, &config.scenarios_dir);

    let selectors: Vec<String> = cli.selectors.into_iter().chain(cli.scenarios).collect();
    let selected = select_variants(variants, &selectors)
        .with_context(|| format!("Nothing to run in {}", config.scenarios_dir.display()))?;

    if cli.list {
        for variant in &selected {
            println!("{}", variant);
        }
        for file in find_config_files(&config.scenarios_dir)? {
            println!("  {}", file.display());
        }
        return Ok(());
    }

    let client = if config.dry_run {
        None
    } else {
        Some(create_client().await?)
    };

    let runner = ScenarioRunner::new(config, client).with_overrides(cli.overrides);
    let reports = runner.run(&selected).await;

    for report in &reports {
        println!("{}", report);
    }

    let failed = reports.iter().filter(|r| !r.is_success()).count();
    if failed > 0 {
        bail!("{} of {} scenario variant(s) failed", failed, reports.len());
    }

    info!("All {} scenario variant(s) passed", reports.len());
    Ok(())
}
