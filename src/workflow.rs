//! Submit-then-poll workflow against the vendor filing API
//!
//! Drives one submission from encode through polling to its final
//! disposition: submit the e-file, then check job status up to the
//! configured number of times (waiting the configured interval before each
//! check), and fetch the filing result once the service reports the job
//! processed. Rejections, job failures, poll timeouts, and cancellations
//! end the run cleanly as classified [`WorkflowTermination`] values; only
//! submit-phase failures and undecodable filing results are errors.
//!
//! # Example
//!
//! ```no_run
//! use efiling_client::{ClientConfig, EfilingClient, ProtocolVersion, SubmissionRequest};
//!
//! # async fn example() -> Result<(), efiling_client::Error> {
//! let client = EfilingClient::new(ClientConfig::default())?;
//!
//! let mut request = SubmissionRequest {
//!     vendor_id: "VENDOR1".into(),
//!     vendor_pin: "1234".into(),
//!     filer_id: "FILER1".into(),
//!     filer_password: "secret".into(),
//!     reply_to: "filer@example.com".into(),
//!     ..Default::default()
//! };
//! request.set_document(b"<filing/>");
//!
//! let report = client.run_workflow(&request, ProtocolVersion::V11).await?;
//! for line in &report.log {
//!     println!("{line}");
//! }
//! println!("{}", report.outcome.disposition_message());
//! # Ok(())
//! # }
//! ```

use crate::client::{EfilingClient, METHOD_SUBMIT};
use crate::error::Result;
use crate::types::{FilingOutcome, JobStatus, ProtocolVersion, SubmissionRequest, SubmitResponse};
use chrono::Local;
use tokio_util::sync::CancellationToken;

/// How a workflow run ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkflowTermination {
    /// The job was processed and its filing result fetched and decoded
    Completed,

    /// No job to poll: the service rejected the submission, or its
    /// acknowledgement carried no usable job identifier
    SubmissionRejected {
        /// Rejection reason from the service, when it gave one
        message: Option<String>,
    },

    /// A status check reported the job can never complete
    JobFailed {
        /// The terminal failure status (FailedToProcess or UnknownJobId)
        status: JobStatus,
    },

    /// The status-check budget ran out before the job reached a terminal state
    TimedOut,

    /// The caller cancelled the workflow during an interval wait
    Cancelled,
}

impl WorkflowTermination {
    /// Whether the run reached the result-fetch stage
    pub fn is_completed(&self) -> bool {
        matches!(self, WorkflowTermination::Completed)
    }
}

/// Everything a caller gets back from one workflow run
///
/// The outcome holds its sentinel values unless the termination is
/// [`WorkflowTermination::Completed`]; the log lines are the user-visible
/// record of the run, in order.
#[derive(Clone, Debug)]
#[must_use]
pub struct WorkflowReport {
    /// Decoded filing result (sentinel-valued when no result was fetched)
    pub outcome: FilingOutcome,

    /// How the run ended
    pub termination: WorkflowTermination,

    /// Timestamped progress lines accumulated over the run
    pub log: Vec<String>,
}

/// Progress log for one workflow run
///
/// Each line carries a local wall-clock prefix. Lines are mirrored to
/// `tracing` at info level as they are written, so progress stays
/// observable on the error paths that never produce a report.
struct WorkflowLog {
    entries: Vec<String>,
}

impl WorkflowLog {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{message}");
        self.entries
            .push(format!("{} {}", Local::now().format("%H:%M:%S%.3f"), message));
    }

    fn finish(
        mut self,
        outcome: FilingOutcome,
        termination: WorkflowTermination,
    ) -> WorkflowReport {
        self.push("Process complete");
        WorkflowReport {
            outcome,
            termination,
            log: self.entries,
        }
    }
}

impl EfilingClient {
    /// Run the submit-then-poll workflow to a terminal state
    ///
    /// Convenience wrapper over [`run_workflow_with_cancel`] with a token
    /// that never fires.
    ///
    /// [`run_workflow_with_cancel`]: EfilingClient::run_workflow_with_cancel
    pub async fn run_workflow(
        &self,
        request: &SubmissionRequest,
        protocol: ProtocolVersion,
    ) -> Result<WorkflowReport> {
        self.run_workflow_with_cancel(request, protocol, CancellationToken::new())
            .await
    }

    /// Run the submit-then-poll workflow, stopping early on cancellation
    ///
    /// Phases:
    /// 1. Submit the e-file. A transport failure or an acknowledgement with
    ///    an undecodable job id halts the run with `Err`; an up-front
    ///    rejection or an acknowledgement with no usable job ends it as
    ///    [`WorkflowTermination::SubmissionRejected`] without polling.
    /// 2. Poll job status up to `max_status_checks` times, waiting
    ///    `status_check_interval` before each check. A failure status ends
    ///    the run as [`WorkflowTermination::JobFailed`]; Working and Unknown
    ///    each spend one check; running out of checks is
    ///    [`WorkflowTermination::TimedOut`].
    /// 3. Once the job is processed, fetch and decode the filing result.
    ///    Decode failures return `Err`; otherwise the run is
    ///    [`WorkflowTermination::Completed`] with the decoded outcome.
    ///
    /// Classified endings are data, not errors: they come back as `Ok` with
    /// the matching termination and the sentinel outcome. The cancellation
    /// token is only observed during the interval waits; an in-flight HTTP
    /// call is never abandoned mid-request.
    pub async fn run_workflow_with_cancel(
        &self,
        request: &SubmissionRequest,
        protocol: ProtocolVersion,
        cancel: CancellationToken,
    ) -> Result<WorkflowReport> {
        let mut log = WorkflowLog::new();

        let submit_url = self.endpoint(METHOD_SUBMIT, None);
        log.push(format!(
            "Submitting e-file to '{submit_url}' using protocol version {protocol}"
        ));

        let response = match self.submit_efile(request, protocol).await {
            Ok(response) => response,
            Err(e) => {
                log.push(format!("Submission failed: {e}"));
                return Err(e);
            }
        };
        log.push("Received response from server");

        let job = match response {
            SubmitResponse::Accepted(job) => {
                log.push(format!("Job accepted as '{job}'"));
                job
            }
            SubmitResponse::Rejected { message } => {
                match &message {
                    Some(reason) => log.push(format!("Job not accepted. Reason: {reason}")),
                    None => log.push("Job not accepted"),
                }
                return Ok(log.finish(
                    FilingOutcome::default(),
                    WorkflowTermination::SubmissionRejected { message },
                ));
            }
            SubmitResponse::Unreadable => {
                return Ok(log.finish(
                    FilingOutcome::default(),
                    WorkflowTermination::SubmissionRejected { message: None },
                ));
            }
        };

        // The nil id is the "no active job" sentinel: acknowledged, but
        // nothing the status endpoint would recognize.
        if job.is_nil() {
            log.push("No active job to poll");
            return Ok(log.finish(
                FilingOutcome::default(),
                WorkflowTermination::SubmissionRejected { message: None },
            ));
        }

        let max_checks = self.config().max_status_checks;
        for attempt in 1..=max_checks {
            tokio::select! {
                _ = tokio::time::sleep(self.config().status_check_interval) => {}
                _ = cancel.cancelled() => {
                    log.push("Workflow cancelled");
                    return Ok(log.finish(
                        FilingOutcome::default(),
                        WorkflowTermination::Cancelled,
                    ));
                }
            }

            let status = self.check_job_status(job).await;
            match status {
                JobStatus::FailedToProcess | JobStatus::UnknownJobId => {
                    log.push("Status: the job failed to process");
                    return Ok(log.finish(
                        FilingOutcome::default(),
                        WorkflowTermination::JobFailed { status },
                    ));
                }
                JobStatus::ProcessingComplete => {
                    log.push("Status: the job was processed");

                    let outcome = match self.filing_result(job).await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            log.push(format!("Failed to decode filing result: {e}"));
                            return Err(e);
                        }
                    };

                    log.push(outcome.disposition_message());
                    return Ok(log.finish(outcome, WorkflowTermination::Completed));
                }
                JobStatus::Working | JobStatus::Unknown => {
                    tracing::debug!(
                        attempt,
                        max_checks,
                        status = ?status,
                        "job not terminal yet"
                    );
                }
            }
        }

        log.push("Timeout waiting for job completion");
        Ok(log.finish(FilingOutcome::default(), WorkflowTermination::TimedOut))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> EfilingClient {
        EfilingClient::new(ClientConfig::with_base_url(format!("{}/", server.uri()))).unwrap()
    }

    // --- log formatting ---

    #[test]
    fn log_lines_carry_a_millisecond_timestamp_prefix() {
        let mut log = WorkflowLog::new();
        log.push("Submitting");

        let line = &log.entries[0];
        assert!(
            line.ends_with(" Submitting"),
            "message text must follow the prefix, got {line:?}"
        );
        // "HH:MM:SS.mmm " is a fixed 13 bytes
        assert_eq!(line.len(), "Submitting".len() + 13);
        assert_eq!(&line[2..3], ":");
        assert_eq!(&line[5..6], ":");
        assert_eq!(&line[8..9], ".");
    }

    #[test]
    fn finish_appends_process_complete_as_the_last_line() {
        let mut log = WorkflowLog::new();
        log.push("step one");

        let report = log.finish(FilingOutcome::default(), WorkflowTermination::TimedOut);
        assert_eq!(report.log.len(), 2);
        assert!(report.log[1].ends_with("Process complete"));
        assert_eq!(report.termination, WorkflowTermination::TimedOut);
        assert!(!report.termination.is_completed());
    }

    // --- no-poll terminal paths ---

    #[tokio::test]
    async fn rejected_submission_ends_without_polling() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/SubmitEfile"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<response><accepted>false</accepted>\
                 <error_message>Invalid credentials</error_message></response>",
            ))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let report = client
            .run_workflow(&SubmissionRequest::default(), ProtocolVersion::V11)
            .await
            .unwrap();

        assert_eq!(
            report.termination,
            WorkflowTermination::SubmissionRejected {
                message: Some("Invalid credentials".into()),
            }
        );
        assert_eq!(report.outcome, FilingOutcome::default());
        assert!(
            report
                .log
                .iter()
                .any(|line| line.contains("Job not accepted. Reason: Invalid credentials")),
            "the rejection reason must be logged, got {:?}",
            report.log
        );
    }

    #[tokio::test]
    async fn nil_job_id_short_circuits_the_poll_phase() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/SubmitEfile"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<response><accepted>true</accepted>\
                 <job_id>00000000-0000-0000-0000-000000000000</job_id></response>",
            ))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let report = client
            .run_workflow(&SubmissionRequest::default(), ProtocolVersion::V11)
            .await
            .unwrap();

        assert_eq!(
            report.termination,
            WorkflowTermination::SubmissionRejected { message: None }
        );
        assert!(
            report.log.iter().any(|line| line.contains("No active job")),
            "the nil sentinel must be called out, got {:?}",
            report.log
        );
    }

    #[tokio::test]
    async fn unreadable_acknowledgement_ends_silently() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/SubmitEfile"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<listing/>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let report = client
            .run_workflow(&SubmissionRequest::default(), ProtocolVersion::V11)
            .await
            .unwrap();

        assert_eq!(
            report.termination,
            WorkflowTermination::SubmissionRejected { message: None }
        );
        assert!(
            !report.log.iter().any(|line| line.contains("not accepted")),
            "an unreadable acknowledgement reports nothing, got {:?}",
            report.log
        );
        assert!(
            report.log.last().map(String::as_str).unwrap_or_default().ends_with("Process complete"),
            "every run ends with the completion line"
        );
    }
}
