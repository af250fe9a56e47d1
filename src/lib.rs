//! # efiling-client
//!
//! Client library for submitting e-filings to a vendor filing-acceptance
//! API and tracking their disposition.
//!
//! ## Design Philosophy
//!
//! efiling-client is designed to be:
//! - **Workflow-first** - One call drives submit, poll, and result fetch to a terminal state
//! - **Fault-tolerant where it matters** - A transient fault during polling never aborts a run that still has checks left
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Protocol-complete** - Speaks both the form-encoded v1.0 and JSON v1.1 submit formats
//!
//! ## Quick Start
//!
//! ```no_run
//! use efiling_client::{ClientConfig, EfilingClient, ProtocolVersion, SubmissionRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EfilingClient::new(ClientConfig::default())?;
//!
//!     let mut request = SubmissionRequest {
//!         vendor_id: "VENDOR1".to_string(),
//!         vendor_pin: "1234".to_string(),
//!         filer_id: "FILER1".to_string(),
//!         filer_password: "secret".to_string(),
//!         reply_to: "filer@example.com".to_string(),
//!         ..Default::default()
//!     };
//!     request.set_document(&std::fs::read("filing.xml")?);
//!
//!     let report = client.run_workflow(&request, ProtocolVersion::V11).await?;
//!     for line in &report.log {
//!         println!("{line}");
//!     }
//!     println!("{}", report.outcome.disposition_message());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// HTTP transport against the vendor filing API
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Submit payload encoding (form-encoded v1.0, JSON v1.1)
pub mod request;
/// Wire response parsing
pub mod response;
/// Per-session field persistence
pub mod session;
/// Core types
pub mod types;
/// The submit-then-poll workflow
pub mod workflow;

// Re-export commonly used types
pub use client::EfilingClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use session::{JsonFileSessionStore, MemorySessionStore, SessionFields, SessionStore};
pub use types::{
    FilingDisposition, FilingOutcome, JobId, JobStatus, ProtocolVersion, SignerCredential,
    SubmissionRequest, SubmitResponse,
};
pub use workflow::{WorkflowReport, WorkflowTermination};
