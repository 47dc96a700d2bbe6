//! Appliance REST session
//!
//! The appliance authenticates with basic credentials on a first GET,
//! answers with a CSRF token and session cookies, and expects the token
//! back on every mutating request. All payloads are JSON.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::core::constants::REQUEST_TIMEOUT_SECS;

use super::error::ApplianceError;
use super::types::{
    BasicSystemInfo, Collection, Instance, KpiValue, MetricQueryResult, MetricRealTimeQuery,
    MetricValue, Pool, StorageResource,
};

const HEADER_REST_CLIENT: &str = "X-EMC-REST-CLIENT";
const HEADER_CSRF_TOKEN: &str = "EMC-CSRF-TOKEN";

const LOGIN_PATH: &str = "/api/types/loginSessionInfo/instances";
const LOGOUT_PATH: &str = "/api/types/loginSessionInfo/action/logout";
const SYSTEM_INFO_PATH: &str = "/api/types/basicSystemInfo/instances";
const POOL_PATH: &str = "/api/types/pool/instances";
const STORAGE_RESOURCE_PATH: &str = "/api/types/storageResource/instances";
const KPI_VALUE_PATH: &str = "/api/types/kpiValue/instances";
const METRIC_VALUE_PATH: &str = "/api/types/metricValue/instances";
const REALTIME_QUERY_PATH: &str = "/api/types/metricRealTimeQuery/instances";
const QUERY_RESULT_PATH: &str = "/api/types/metricQueryResult/instances";

/// Prefix a bare host with https and strip any trailing slash.
fn normalize_base_url(endpoint: &str) -> String {
    let url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{endpoint}")
    };
    url.trim_end_matches('/').to_string()
}

/// Appliance `eq` filter expression.
fn eq_filter(field: &str, value: &str) -> String {
    format!("{field} eq \"{value}\"")
}

/// An authenticated appliance session.
pub struct Session {
    client: Client,
    base_url: String,
    csrf_token: String,
}

impl Session {
    /// Authenticate against the appliance. Failure here is fatal to the
    /// whole run; the caller does not retry.
    pub async fn connect(
        endpoint: &str,
        username: &str,
        password: &str,
        insecure: bool,
    ) -> Result<Self, ApplianceError> {
        let client = Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(insecure)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(format!("arraymetrics/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = normalize_base_url(endpoint);

        let response = client
            .get(format!("{base_url}{LOGIN_PATH}"))
            .basic_auth(username, Some(password))
            .header(HEADER_REST_CLIENT, "true")
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let csrf_token = response
            .headers()
            .get(HEADER_CSRF_TOKEN)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or(ApplianceError::MissingCsrfToken)?;

        tracing::debug!(%base_url, "Appliance session established");

        Ok(Self {
            client,
            base_url,
            csrf_token,
        })
    }

    /// Appliance display name, used as the `instance` tag on every record.
    pub async fn system_name(&self) -> Result<String, ApplianceError> {
        let info: Collection<BasicSystemInfo> = self
            .get_json(SYSTEM_INFO_PATH, &[("fields", "name".to_string())])
            .await?;
        info.entries
            .into_iter()
            .next()
            .map(|entry| entry.content.name)
            .ok_or(ApplianceError::EmptyResponse)
    }

    /// Capacity snapshot of all pools.
    pub async fn pools(&self) -> Result<Vec<Pool>, ApplianceError> {
        let fields = "id,name,sizeFree,sizeTotal,sizeUsed,sizeSubscribed";
        let pools: Collection<Pool> = self
            .get_json(POOL_PATH, &[("fields", fields.to_string())])
            .await?;
        Ok(pools.entries.into_iter().map(|e| e.content).collect())
    }

    /// Capacity snapshot of all storage resources.
    pub async fn storage_resources(&self) -> Result<Vec<StorageResource>, ApplianceError> {
        let fields = "id,name,sizeAllocated,sizeTotal,sizeUsed";
        let resources: Collection<StorageResource> = self
            .get_json(STORAGE_RESOURCE_PATH, &[("fields", fields.to_string())])
            .await?;
        Ok(resources.entries.into_iter().map(|e| e.content).collect())
    }

    /// Historical KPI series for one path, one entry per instance id.
    pub async fn kpi_values(&self, path: &str) -> Result<Vec<KpiValue>, ApplianceError> {
        let values: Collection<KpiValue> = self
            .get_json(KPI_VALUE_PATH, &[("filter", eq_filter("path", path))])
            .await?;
        Ok(values.entries.into_iter().map(|e| e.content).collect())
    }

    /// Most recent historical sample tree for one path.
    pub async fn metric_value(&self, path: &str) -> Result<MetricValue, ApplianceError> {
        let values: Collection<MetricValue> = self
            .get_json(METRIC_VALUE_PATH, &[("filter", eq_filter("path", path))])
            .await?;
        values
            .entries
            .into_iter()
            .next()
            .map(|entry| entry.content)
            .ok_or(ApplianceError::EmptyResponse)
    }

    /// Register a real-time query for a set of paths. The appliance starts
    /// sampling on registration; results are ready after one interval.
    pub async fn realtime_query(
        &self,
        paths: &[String],
        interval_secs: u64,
    ) -> Result<MetricRealTimeQuery, ApplianceError> {
        let response = self
            .client
            .post(format!("{}{REALTIME_QUERY_PATH}", self.base_url))
            .header(HEADER_REST_CLIENT, "true")
            .header(HEADER_CSRF_TOKEN, &self.csrf_token)
            .json(&json!({ "paths": paths, "interval": interval_secs }))
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let created: Instance<MetricRealTimeQuery> = response.json().await?;
        Ok(created.content)
    }

    /// Fetch the sampled results of a registered real-time query.
    pub async fn realtime_result(
        &self,
        query_id: i64,
    ) -> Result<Vec<MetricQueryResult>, ApplianceError> {
        let results: Collection<MetricQueryResult> = self
            .get_json(
                QUERY_RESULT_PATH,
                &[("filter", eq_filter("queryId", &query_id.to_string()))],
            )
            .await?;
        Ok(results.entries.into_iter().map(|e| e.content).collect())
    }

    /// Close the session on the appliance. Best-effort: the caller only
    /// logs a failure.
    pub async fn logout(&self) -> Result<(), ApplianceError> {
        let response = self
            .client
            .post(format!("{}{LOGOUT_PATH}", self.base_url))
            .header(HEADER_REST_CLIENT, "true")
            .header(HEADER_CSRF_TOKEN, &self.csrf_token)
            .json(&json!({ "localCleanupOnly": true }))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        api_path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApplianceError> {
        let response = self
            .client
            .get(format!("{}{api_path}", self.base_url))
            .header(HEADER_REST_CLIENT, "true")
            .query(query)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn ensure_success(response: Response) -> Result<Response, ApplianceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApplianceError::api(status.as_u16(), body))
    }
}
