use crate::{CheckError, Claim, DetectRequest, VerdictResponse};
use async_trait::async_trait;
use claimcheck_http::HttpClient;
use std::time::Duration;

/// Anything that can turn a claim into a verdict.
#[async_trait]
pub trait Detector: Send + Sync {
    async fn detect(&self, claim: &Claim) -> Result<VerdictResponse, CheckError>;

    /// Human-readable target, used in logs and the status line.
    fn endpoint(&self) -> String;
}

/// [`Detector`] backed by the HTTP verification service.
#[derive(Clone)]
pub struct DetectClient {
    http: HttpClient,
    path: String,
}

impl DetectClient {
    pub const DEFAULT_PATH: &'static str = "detect";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Client for `{base_url}/detect`, no retries, 30 s timeout.
    pub fn new(base_url: &str) -> Result<Self, CheckError> {
        let http = HttpClient::new(base_url)?
            .with_timeout(Self::DEFAULT_TIMEOUT)
            .with_retries(0);
        Ok(Self {
            http,
            path: Self::DEFAULT_PATH.to_string(),
        })
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    pub fn with_retries(mut self, retries: usize) -> Self {
        self.http = self.http.with_retries(retries);
        self
    }
}

#[async_trait]
impl Detector for DetectClient {
    async fn detect(&self, claim: &Claim) -> Result<VerdictResponse, CheckError> {
        let started = std::time::Instant::now();
        let result = self
            .http
            .post_json::<_, VerdictResponse>(&self.path, &DetectRequest { claim })
            .await
            .map_err(CheckError::from);

        match &result {
            Ok(v) => tracing::info!(
                verdict = %v.verdict,
                sources = v.sources.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "detect.ok"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "detect.failed"
            ),
        }
        result
    }

    fn endpoint(&self) -> String {
        let path = self.path.trim_start_matches('/');
        match self.http.base_url().join(path) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.http.base_url(), path),
        }
    }
}
