//! End-to-end tests against a real vendor filing service
//!
//! These tests submit to a live endpoint using credentials from .env and
//! are feature-gated behind `live-tests`. All tests are marked #[ignore]
//! to prevent running in normal CI.
//!
//! # Running the tests
//!
//! ```bash
//! cargo test --features live-tests --test e2e_live -- --ignored --nocapture
//! ```
//!
//! # Required environment variables (.env file)
//!
//! - `EFILING_BASE_URL` - API root, e.g. https://netfile.com/filer/vendor/api/v11/
//! - `EFILING_VENDOR_ID` / `EFILING_VENDOR_PIN` - Vendor credentials
//! - `EFILING_FILER_ID` / `EFILING_FILER_PASSWORD` - Filer credentials
//! - `EFILING_REPLY_TO` - Notification address (optional)

#![cfg(feature = "live-tests")]

mod common;

use common::{has_live_credentials, load_live_request};
use efiling_client::{
    ClientConfig, EfilingClient, JobId, JobStatus, ProtocolVersion, WorkflowTermination,
};
use serial_test::serial;
use std::str::FromStr;

/// Submit a minimal e-file and drive the workflow to a terminal state
#[tokio::test]
#[ignore]
#[serial]
async fn live_submit_and_track() {
    if !has_live_credentials() {
        eprintln!("Skipping: e-filing credentials not found in .env");
        return;
    }

    let (base_url, mut request) = load_live_request().unwrap();
    request.set_document(b"<efile><test/></efile>");

    let client = EfilingClient::new(ClientConfig::with_base_url(base_url)).unwrap();
    let report = client
        .run_workflow(&request, ProtocolVersion::V11)
        .await
        .unwrap();

    for line in &report.log {
        println!("{line}");
    }

    // Whatever the service decides about the content, the run must end
    // classified rather than wedged
    assert!(
        matches!(
            report.termination,
            WorkflowTermination::Completed
                | WorkflowTermination::SubmissionRejected { .. }
                | WorkflowTermination::JobFailed { .. }
                | WorkflowTermination::TimedOut
        ),
        "live run ended as {:?}",
        report.termination
    );
}

/// A status check for a job this client never submitted must classify as
/// unknown-job or no-classification, never as complete
#[tokio::test]
#[ignore]
#[serial]
async fn live_status_of_a_foreign_job_is_never_complete() {
    if !has_live_credentials() {
        eprintln!("Skipping: e-filing credentials not found in .env");
        return;
    }

    let (base_url, _request) = load_live_request().unwrap();
    let client = EfilingClient::new(ClientConfig::with_base_url(base_url)).unwrap();

    let foreign = JobId::from_str("f9b4ca71-5c1e-4b02-8a4e-000000000001").unwrap();
    let status = client.check_job_status(foreign).await;
    println!("service classified the foreign job as {status:?}");

    assert!(
        !matches!(status, JobStatus::ProcessingComplete),
        "a job the service never issued cannot be complete"
    );
}
