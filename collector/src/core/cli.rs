use clap::Parser;

use super::constants::{
    APP_NAME, ENV_CAPACITY, ENV_DEBUG, ENV_ENDPOINT, ENV_HIST_PATHS, ENV_INSECURE, ENV_INTERVAL,
    ENV_KPI_PATHS, ENV_PASSWORD, ENV_RT_PATHS, ENV_USERNAME,
};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version, about = "Storage appliance metrics collector", long_about = None)]
pub struct Cli {
    /// Appliance IP or FQDN
    #[arg(long, short = 'e', env = ENV_ENDPOINT)]
    pub endpoint: Option<String>,

    /// API username
    #[arg(long, short = 'u', env = ENV_USERNAME)]
    pub username: Option<String>,

    /// API password
    #[arg(long, env = ENV_PASSWORD)]
    pub password: Option<String>,

    /// Sampling interval in seconds for real-time queries
    #[arg(long, short = 'i', env = ENV_INTERVAL)]
    pub interval: Option<u64>,

    /// Comma-separated real-time metric path templates
    #[arg(long, env = ENV_RT_PATHS)]
    pub rt_paths: Option<String>,

    /// Comma-separated historical metric path templates
    #[arg(long, env = ENV_HIST_PATHS)]
    pub hist_paths: Option<String>,

    /// Comma-separated historical KPI metric paths
    #[arg(long, env = ENV_KPI_PATHS)]
    pub kpi_paths: Option<String>,

    /// Emit capacity statistics for pools and storage resources
    #[arg(long, env = ENV_CAPACITY)]
    pub capacity: bool,

    /// Skip TLS certificate verification
    #[arg(long, env = ENV_INSECURE)]
    pub insecure: bool,

    /// Enable debug logging
    #[arg(long, env = ENV_DEBUG)]
    pub debug: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub endpoint: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub interval: Option<u64>,
    pub rt_paths: Option<String>,
    pub hist_paths: Option<String>,
    pub kpi_paths: Option<String>,
    pub capacity: bool,
    pub insecure: bool,
    pub debug: bool,
}

/// Parse CLI arguments into a config
pub fn parse() -> CliConfig {
    let cli = Cli::parse();
    CliConfig {
        endpoint: cli.endpoint,
        username: cli.username,
        password: cli.password,
        interval: cli.interval,
        rt_paths: cli.rt_paths,
        hist_paths: cli.hist_paths,
        kpi_paths: cli.kpi_paths,
        capacity: cli.capacity,
        insecure: cli.insecure,
        debug: cli.debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_asserts() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            APP_NAME,
            "--endpoint",
            "10.0.0.1",
            "--username",
            "monitor",
            "--password",
            "secret",
            "--rt-paths",
            "sp.*.cpu.summary.busyTicks",
            "--capacity",
        ]);
        assert_eq!(cli.endpoint.as_deref(), Some("10.0.0.1"));
        assert!(cli.capacity);
        assert!(!cli.debug);
        assert_eq!(cli.interval, None);
    }
}
