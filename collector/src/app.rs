//! Core application
//!
//! One collection run: establish the appliance session, execute the
//! configured KPI, capacity, historical, and real-time queries, and stream
//! the resulting records to stdout as line protocol. Logs go to stderr so
//! the data stream stays clean. A failing path is reported and skipped;
//! only session establishment is fatal.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::appliance::Session;
use crate::core::cli;
use crate::core::config::AppConfig;
use crate::core::constants::ENV_LOG;
use crate::domain::{
    MetricPath, SampleNode, TimeSeriesRecord, capacity, flatten, kpi, lineproto,
};
use crate::utils::time::{now_nanos, parse_iso_nanos};

pub struct CoreApp;

impl CoreApp {
    /// Run one collection pass with CLI argument parsing.
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();

        let cli_config = cli::parse();
        Self::init_logging(cli_config.debug);

        tracing::debug!("Collector starting");
        let config = AppConfig::load(&cli_config)?;

        let session = Session::connect(
            &config.endpoint,
            &config.username,
            &config.password,
            config.insecure,
        )
        .await
        .context("failed to establish appliance session")?;

        let instance = session
            .system_name()
            .await
            .context("failed to read appliance identity")?;
        tracing::debug!(%instance, "Connected to appliance");

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let mut failures = 0usize;

        for path in &config.kpi_paths {
            if let Err(error) = Self::collect_kpi(&session, &instance, path, &mut out).await {
                tracing::error!(%path, error = %error, "KPI query failed");
                failures += 1;
            }
        }

        if config.capacity {
            if let Err(error) = Self::collect_capacity(&session, &instance, &mut out).await {
                tracing::error!(error = %error, "Capacity snapshot failed");
                failures += 1;
            }
        }

        for path in &config.hist_paths {
            if let Err(error) = Self::collect_historical(&session, &instance, path, &mut out).await
            {
                tracing::error!(%path, error = %error, "Historical query failed");
                failures += 1;
            }
        }

        if !config.rt_paths.is_empty() {
            match Self::collect_realtime(
                &session,
                &instance,
                &config.rt_paths,
                config.interval_secs,
                &mut out,
            )
            .await
            {
                Ok(path_failures) => failures += path_failures,
                Err(error) => {
                    tracing::error!(error = %error, "Real-time query failed");
                    failures += 1;
                }
            }
        }

        out.flush()?;

        if let Err(error) = session.logout().await {
            tracing::debug!(error = %error, "Logout failed");
        }

        if failures > 0 {
            tracing::warn!(failures, "Collection completed with failures");
        } else {
            tracing::debug!("Collection completed");
        }
        Ok(())
    }

    fn init_logging(debug: bool) {
        let default_filter = if debug { "debug" } else { "error" };

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| default_filter.to_string());

        tracing_subscriber::fmt()
            .with_target(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    async fn collect_kpi<W: Write>(
        session: &Session,
        instance: &str,
        path: &str,
        out: &mut W,
    ) -> Result<()> {
        // Validate the template before touching the network.
        MetricPath::parse(path)?;

        let timestamp_ns = now_nanos();
        for entry in session.kpi_values(path).await? {
            let parsed = match MetricPath::parse(&entry.path) {
                Ok(parsed) => parsed,
                Err(error) => {
                    tracing::warn!(path = %entry.path, error = %error, "Skipping KPI entry");
                    continue;
                }
            };
            let Some(value) = entry.latest() else {
                tracing::warn!(path = %entry.path, id = %entry.id, "KPI entry has no sample");
                continue;
            };

            let record =
                kpi::kpi_record(&parsed, &entry.id, &entry.name, value, instance, timestamp_ns);
            Self::write_records(out, &[record])?;
        }
        Ok(())
    }

    async fn collect_capacity<W: Write>(
        session: &Session,
        instance: &str,
        out: &mut W,
    ) -> Result<()> {
        let timestamp_ns = now_nanos();

        for pool in session.pools().await? {
            let records = capacity::pool_records(&pool, instance, timestamp_ns);
            Self::write_records(out, &records)?;
        }
        for resource in session.storage_resources().await? {
            let records = capacity::storage_resource_records(&resource, instance, timestamp_ns);
            Self::write_records(out, &records)?;
        }
        Ok(())
    }

    async fn collect_historical<W: Write>(
        session: &Session,
        instance: &str,
        path: &str,
        out: &mut W,
    ) -> Result<()> {
        let parsed = MetricPath::parse(path)?;

        let value = session.metric_value(path).await?;
        let timestamp_ns = Self::sample_timestamp(&value.timestamp);

        let tree = SampleNode::from(&value.values);
        Self::emit_tree(&parsed, &tree, instance, timestamp_ns, out)
    }

    /// Register one real-time query for all paths, wait out a single
    /// sampling interval, then flatten every returned result. Returns the
    /// number of paths that failed individually.
    async fn collect_realtime<W: Write>(
        session: &Session,
        instance: &str,
        paths: &[String],
        interval_secs: u64,
        out: &mut W,
    ) -> Result<usize> {
        let mut failures = 0usize;

        let mut valid = Vec::new();
        for path in paths {
            match MetricPath::parse(path) {
                Ok(_) => valid.push(path.clone()),
                Err(error) => {
                    tracing::error!(%path, error = %error, "Invalid real-time path");
                    failures += 1;
                }
            }
        }
        if valid.is_empty() {
            return Ok(failures);
        }

        let query = session.realtime_query(&valid, interval_secs).await?;
        tracing::debug!(
            query_id = query.id,
            interval = query.interval,
            "Waiting one sampling interval"
        );
        tokio::time::sleep(Duration::from_secs(query.interval)).await;

        for result in session.realtime_result(query.id).await? {
            let parsed = match MetricPath::parse(&result.path) {
                Ok(parsed) => parsed,
                Err(error) => {
                    tracing::error!(path = %result.path, error = %error, "Invalid result path");
                    failures += 1;
                    continue;
                }
            };
            let timestamp_ns = Self::sample_timestamp(&result.timestamp);
            let tree = SampleNode::from(&result.values);
            Self::emit_tree(&parsed, &tree, instance, timestamp_ns, out)?;
        }

        Ok(failures)
    }

    fn emit_tree<W: Write>(
        path: &MetricPath,
        tree: &SampleNode,
        instance: &str,
        timestamp_ns: i64,
        out: &mut W,
    ) -> Result<()> {
        let outcome = flatten(path, tree, instance, timestamp_ns);

        for issue in &outcome.issues {
            tracing::warn!(path = path.raw(), issue = %issue, "Skipped malformed sample");
        }
        tracing::debug!(
            path = path.raw(),
            records = outcome.records.len(),
            "Flattened sample tree"
        );

        Self::write_records(out, &outcome.records)?;
        Ok(())
    }

    fn write_records<W: Write>(out: &mut W, records: &[TimeSeriesRecord]) -> io::Result<()> {
        for record in records {
            out.write_all(lineproto::encode(record).as_bytes())?;
        }
        Ok(())
    }

    fn sample_timestamp(raw: &str) -> i64 {
        parse_iso_nanos(raw).unwrap_or_else(|| {
            tracing::warn!(timestamp = raw, "Invalid sample timestamp, using wall clock");
            now_nanos()
        })
    }
}
