//! HTTP transport against the vendor filing API
//!
//! Three operations against `{base_url}{method}[/{job_id}]`: submit is a
//! POST carrying either form fields (v1.0) or a JSON body (v1.1); status and
//! result are GETs with the job id as a path segment.
//!
//! The error policy is deliberately asymmetric. A failed submit propagates,
//! because without a job there is nothing to poll. Failed status and result
//! fetches are swallowed into the "no classification" sentinels so one
//! transient fault cannot abort a poll loop that still has budget left.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::request;
use crate::response;
use crate::types::{FilingOutcome, JobId, JobStatus, ProtocolVersion, SubmissionRequest, SubmitResponse};
use url::Url;

/// Wire method name for submission
pub(crate) const METHOD_SUBMIT: &str = "SubmitEfile";
/// Wire method name for status checks
pub(crate) const METHOD_STATUS: &str = "CheckJobStatus";
/// Wire method name for the result fetch
pub(crate) const METHOD_RESULT: &str = "EfilingResult";

/// Client for the vendor filing API
///
/// Construction validates the configured base URL and builds one pooled
/// HTTP client with the configured request timeout. Cloning is cheap and
/// clones share the connection pool.
#[derive(Clone, Debug)]
pub struct EfilingClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl EfilingClient {
    /// Create a new client from configuration
    ///
    /// Fails with a configuration error when the base URL does not parse,
    /// and with a transport error when the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| Error::Config {
            message: format!("invalid base URL '{}': {}", config.base_url, e),
            key: Some("base_url".into()),
        })?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the endpoint URL for a wire method
    pub(crate) fn endpoint(&self, method: &str, job: Option<JobId>) -> String {
        let base = self.config.base_url.as_str();
        let sep = if base.ends_with('/') { "" } else { "/" };
        match job {
            Some(job) => format!("{base}{sep}{method}/{job}"),
            None => format!("{base}{sep}{method}"),
        }
    }

    /// Submit an e-file and parse the acknowledgement
    ///
    /// Transport failures and error statuses propagate: a submission that
    /// never reached the service halts the workflow.
    pub async fn submit_efile(
        &self,
        request: &SubmissionRequest,
        protocol: ProtocolVersion,
    ) -> Result<SubmitResponse> {
        let url = self.endpoint(METHOD_SUBMIT, None);
        tracing::debug!(url = %url, protocol = %protocol, "submitting e-file");

        let response = match protocol {
            ProtocolVersion::V10 => {
                self.http
                    .post(&url)
                    .form(&request::form_fields(request))
                    .send()
                    .await?
            }
            ProtocolVersion::V11 => {
                self.http
                    .post(&url)
                    .json(&request::SubmitEfileModel::from_request(request))
                    .send()
                    .await?
            }
        };

        let body = response.error_for_status()?.text().await?;
        tracing::debug!(url = %url, bytes = body.len(), "received submit response");
        response::parse_submit_response(&body)
    }

    /// Check the processing status of a job
    ///
    /// Never fails: transport faults classify as [`JobStatus::Unknown`] so
    /// the poll loop decides what to do with its remaining budget.
    pub async fn check_job_status(&self, job: JobId) -> JobStatus {
        let url = self.endpoint(METHOD_STATUS, Some(job));
        match self.fetch_text(&url).await {
            Some(body) => response::parse_status_response(&body),
            None => JobStatus::Unknown,
        }
    }

    /// Fetch the final filing result for a processed job
    ///
    /// Transport faults yield the sentinel outcome; only decode failures in
    /// a received result (malformed base64 or filing date) are errors.
    pub async fn filing_result(&self, job: JobId) -> Result<FilingOutcome> {
        let url = self.endpoint(METHOD_RESULT, Some(job));
        match self.fetch_text(&url).await {
            Some(body) => response::parse_result_response(&body),
            None => Ok(FilingOutcome::default()),
        }
    }

    /// GET a polling endpoint, swallowing every transport-level failure
    async fn fetch_text(&self, url: &str) -> Option<String> {
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                let error_msg = if e.is_timeout() {
                    format!("timeout fetching '{url}'")
                } else if e.is_connect() {
                    format!("connection failed for '{url}': {e}")
                } else {
                    format!("failed to fetch '{url}': {e}")
                };
                tracing::warn!(url = %url, error = %error_msg, "poll request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                url = %url,
                status = %response.status(),
                "poll request returned an error status"
            );
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "failed to read poll response body");
                None
            }
        }
    }
}
