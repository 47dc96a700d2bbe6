//! Application-wide constants

// =============================================================================
// Application Identity
// =============================================================================

/// Application name (binary name, user agent, log filter target)
pub const APP_NAME: &str = "arraymetrics";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for the appliance IP or FQDN
pub const ENV_ENDPOINT: &str = "ARRAYMETRICS_ENDPOINT";

/// Environment variable for the API username
pub const ENV_USERNAME: &str = "ARRAYMETRICS_USERNAME";

/// Environment variable for the API password
pub const ENV_PASSWORD: &str = "ARRAYMETRICS_PASSWORD";

/// Environment variable for the real-time sampling interval (seconds)
pub const ENV_INTERVAL: &str = "ARRAYMETRICS_INTERVAL";

/// Environment variable for real-time metric path templates
pub const ENV_RT_PATHS: &str = "ARRAYMETRICS_RT_PATHS";

/// Environment variable for historical metric path templates
pub const ENV_HIST_PATHS: &str = "ARRAYMETRICS_HIST_PATHS";

/// Environment variable for historical KPI metric paths
pub const ENV_KPI_PATHS: &str = "ARRAYMETRICS_KPI_PATHS";

/// Environment variable for the capacity snapshot toggle
pub const ENV_CAPACITY: &str = "ARRAYMETRICS_CAPACITY";

/// Environment variable for skipping TLS certificate verification
pub const ENV_INSECURE: &str = "ARRAYMETRICS_INSECURE";

/// Environment variable for debug logging
pub const ENV_DEBUG: &str = "ARRAYMETRICS_DEBUG";

/// Environment variable for the log level/filter
pub const ENV_LOG: &str = "ARRAYMETRICS_LOG";

// =============================================================================
// Defaults
// =============================================================================

/// Default real-time sampling interval in seconds
pub const DEFAULT_INTERVAL_SECS: u64 = 30;

/// Per-request timeout for appliance API calls in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
