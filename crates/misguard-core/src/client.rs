use std::time::Duration;

use crate::GuardError;
use crate::report::{AnalysisReport, AnalyzeRequest, AnalyzeResponse};

/// Request timeout for health probes and analysis calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the external analysis service.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(timeout: Duration) -> Result<Self, GuardError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("misguard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// `GET {base_url}/api/status`. Any 2xx is healthy; the body is ignored.
    pub async fn check_status(&self, base_url: &str) -> Result<(), GuardError> {
        let url = endpoint(base_url, "status");
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(GuardError::Status {
                url,
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// Health probe collapsed to a flag. Failures are logged, never raised.
    pub async fn probe(&self, base_url: &str) -> bool {
        match self.check_status(base_url).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(url = base_url, error = %e, "status probe failed");
                false
            }
        }
    }

    /// `POST {base_url}/api/analyze`.
    pub async fn analyze(
        &self,
        base_url: &str,
        request: &AnalyzeRequest,
    ) -> Result<AnalysisReport, GuardError> {
        let url = endpoint(base_url, "analyze");
        let resp = self.http.post(&url).json(request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(GuardError::Status {
                url,
                status: status.as_u16(),
            });
        }
        let body = resp.bytes().await?;
        let parsed: AnalyzeResponse = serde_json::from_slice(&body)?;
        Ok(AnalysisReport::from(parsed))
    }
}

/// Join a configured base URL with an `/api/` path, tolerating a trailing slash.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/api/{}", base_url.trim().trim_end_matches('/'), path)
}
