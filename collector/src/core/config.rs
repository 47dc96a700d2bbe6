//! Application configuration

use anyhow::{Context, Result, ensure};

use crate::utils::string::split_list;

use super::cli::CliConfig;
use super::constants::{DEFAULT_INTERVAL_SECS, ENV_ENDPOINT, ENV_PASSWORD, ENV_USERNAME};

/// Validated runtime configuration for one collection run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: String,
    pub username: String,
    pub password: String,
    pub interval_secs: u64,
    pub rt_paths: Vec<String>,
    pub hist_paths: Vec<String>,
    pub kpi_paths: Vec<String>,
    pub capacity: bool,
    pub insecure: bool,
    pub debug: bool,
}

impl AppConfig {
    /// Build and validate the configuration from CLI/env input.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let endpoint = cli
            .endpoint
            .clone()
            .with_context(|| format!("missing appliance endpoint (--endpoint or {ENV_ENDPOINT})"))?;
        let username = cli
            .username
            .clone()
            .with_context(|| format!("missing API username (--username or {ENV_USERNAME})"))?;
        let password = cli
            .password
            .clone()
            .with_context(|| format!("missing API password (--password or {ENV_PASSWORD})"))?;

        let interval_secs = cli.interval.unwrap_or(DEFAULT_INTERVAL_SECS);
        ensure!(interval_secs > 0, "sampling interval must be at least 1 second");

        let rt_paths = split_list(cli.rt_paths.as_deref().unwrap_or_default());
        let hist_paths = split_list(cli.hist_paths.as_deref().unwrap_or_default());
        let kpi_paths = split_list(cli.kpi_paths.as_deref().unwrap_or_default());

        ensure!(
            cli.capacity || !rt_paths.is_empty() || !hist_paths.is_empty() || !kpi_paths.is_empty(),
            "nothing to collect: supply --rt-paths, --hist-paths, --kpi-paths, or --capacity"
        );

        Ok(Self {
            endpoint,
            username,
            password,
            interval_secs,
            rt_paths,
            hist_paths,
            kpi_paths,
            capacity: cli.capacity,
            insecure: cli.insecure,
            debug: cli.debug,
        })
    }
}
