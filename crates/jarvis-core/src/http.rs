//! Auxiliary plain request/response reads.
//!
//! The backend exposes two read-only endpoints outside the event
//! channel: a health probe and a performance report. Both are polled on
//! a fixed timer and replace the local copy wholesale on success; a
//! failed fetch leaves prior data in place and is surfaced as a
//! store-local error, never an exception.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub supreme_mode: bool,
    #[serde(default)]
    pub modules_loaded: u64,
    #[serde(default)]
    pub version: String,
}

/// `GET /api/system/performance` response. The report shape varies by
/// backend configuration, so it stays a raw JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport(pub Value);

pub async fn fetch_health(client: &reqwest::Client, base_url: &str) -> Result<HealthReport> {
    let url = format!("{base_url}/health");
    let report = client
        .get(&url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("health check failed: {url}"))?
        .json::<HealthReport>()
        .await
        .context("health response was not valid JSON")?;
    Ok(report)
}

pub async fn fetch_performance(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<PerformanceReport> {
    let url = format!("{base_url}/api/system/performance");
    let report = client
        .get(&url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("performance fetch failed: {url}"))?
        .json::<Value>()
        .await
        .context("performance response was not valid JSON")?;
    Ok(PerformanceReport(report))
}
