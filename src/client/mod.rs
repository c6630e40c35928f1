/// HTTP client for the PulseGuard analysis service.
///
/// Uses the synchronous `ureq` client; callers run requests on a worker
/// thread so the render loop never blocks on the network. Three requests
/// exist, matching the service's wire contract:
///
/// - **Analyze**: `POST /predict` with a multipart CSV upload.
/// - **Probe**: `POST /predict` with a small JSON transaction.
/// - **Recent**: `GET /anomalies`.
///
/// Nothing is retried; every failure is returned to the caller once.
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::models::AnalysisResult;

mod multipart;

pub(crate) use multipart::MultipartForm;

#[cfg(test)]
mod tests;

/// Base URL used when neither `--url` nor `PULSEGUARD_URL` is given.
pub(crate) const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub(crate) struct AnalysisClient {
    base_url: String,
    timeout: Duration,
}

impl AnalysisClient {
    pub(crate) fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload a CSV file for analysis and return the parsed result.
    ///
    /// The file content is sent opaquely — no local CSV parsing — as the
    /// `file` field of a `multipart/form-data` body.
    pub(crate) fn analyze(&self, path: &Path) -> Result<AnalysisResult> {
        let form = build_upload_form(path)?;
        let content_type = form.content_type();

        let resp = match ureq::post(&self.url("/predict"))
            .timeout(self.timeout)
            .set("Content-Type", &content_type)
            .send_bytes(&form.finish())
        {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                bail!("analysis service returned HTTP {code}: {body}");
            }
            Err(e) => {
                return Err(e).context("could not reach the analysis service");
            }
        };

        resp.into_json()
            .context("failed to parse analysis response")
    }

    /// Send a synthetic single-transaction probe and return the raw JSON.
    pub(crate) fn probe_transaction(&self) -> Result<Value> {
        let body = serde_json::json!({ "amount": 250, "category": "Groceries" });
        let resp = ureq::post(&self.url("/predict"))
            .timeout(self.timeout)
            .send_json(body)
            .context("test transaction request failed")?;
        resp.into_json().context("failed to parse probe response")
    }

    /// Fetch the service's recently recorded anomalies as raw JSON.
    pub(crate) fn recent_anomalies(&self) -> Result<Value> {
        let resp = ureq::get(&self.url("/anomalies"))
            .timeout(self.timeout)
            .call()
            .context("recent anomalies request failed")?;
        resp.into_json()
            .context("failed to parse anomalies response")
    }
}

/// Read a CSV from disk and wrap it as the `file` part of a multipart body.
pub(crate) fn build_upload_form(path: &Path) -> Result<MultipartForm> {
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.csv");

    let mut form = MultipartForm::new();
    form.add_file_part("file", filename, "text/csv", &data);
    Ok(form)
}
