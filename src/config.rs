// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Harness configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Root holding `{folder}/{scenario}/` directories
    pub scenarios_dir: PathBuf,
    /// Substituted for `{{INSTANCE_NAME}}`
    pub instance_name: String,
    /// Skip every cluster call, still render templates and check structure
    pub dry_run: bool,
    pub verify_timeout: Duration,
    pub poll_interval: Duration,
    /// Maximum number of scenario variants running at the same time
    pub concurrency: usize,
    pub keep_namespaces: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scenarios_dir = lookup("SCENARIOS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(defaults::SCENARIOS_DIR));
        let instance_name =
            lookup("INSTANCE_NAME").unwrap_or_else(|| defaults::INSTANCE_NAME.to_string());
        let dry_run = lookup("DRY_RUN").is_some_and(|v| is_truthy(&v));
        let keep_namespaces = lookup("KEEP_NAMESPACES").is_some_and(|v| is_truthy(&v));

        let verify_timeout = Duration::from_secs(parse_or(
            &lookup,
            "VERIFY_TIMEOUT_SECS",
            defaults::VERIFY_TIMEOUT_SECS,
        )?);
        let poll_interval = Duration::from_secs(parse_or(
            &lookup,
            "POLL_INTERVAL_SECS",
            defaults::POLL_INTERVAL_SECS,
        )?);
        let concurrency: usize = parse_or(&lookup, "SCENARIO_CONCURRENCY", defaults::CONCURRENCY)?;

        Ok(Config {
            scenarios_dir,
            instance_name,
            dry_run,
            verify_timeout,
            poll_interval,
            concurrency: concurrency.max(1),
            keep_namespaces,
        })
    }
}

/// `DRY_RUN=true` and `DRY_RUN=1` both enable the toggle
fn is_truthy(value: &str) -> bool {
    value == "true" || value == "1"
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} environment variable is not valid: {}", key, raw)),
        None => Ok(default),
    }
}
