//! Storage appliance metrics collector
//!
//! Polls an appliance's metrics REST API and re-emits the nested sample
//! trees it returns as flat time-series records in InfluxDB line protocol
//! on stdout.

pub mod app;
pub mod appliance;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::CoreApp;
