//! Core types for efiling-client

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a submitted filing job
///
/// Returned by the vendor service on a successful submission and used as a
/// path segment in status and result requests. The nil (all-zeros) value is
/// the sentinel for "no active job".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    /// Create a new JobId
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the inner Uuid value
    pub fn get(&self) -> Uuid {
        self.0
    }

    /// Whether this is the nil (all-zeros) sentinel
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for JobId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<JobId> for Uuid {
    fn from(id: JobId) -> Self {
        id.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Wire protocol version for the submit operation
///
/// v1.0 sends form-encoded fields; v1.1 sends a JSON body and adds signer
/// credentials and the amendment sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolVersion {
    /// Legacy form-encoded submit payload
    V10,
    /// JSON submit payload with signer support (default)
    #[default]
    V11,
}

impl std::fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolVersion::V10 => write!(f, "1.0"),
            ProtocolVersion::V11 => write!(f, "1.1"),
        }
    }
}

/// Processing state of a submitted job, as reported by a status check
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Server does not recognize the job identifier
    UnknownJobId,
    /// Server accepted the job but processing failed
    FailedToProcess,
    /// Still being processed
    Working,
    /// Processing finished; the filing result can be fetched
    ProcessingComplete,
    /// No classification obtainable (unrecognized code, missing field, or
    /// a swallowed transport fault during polling)
    Unknown,
}

impl JobStatus {
    /// Convert a wire status code to a JobStatus
    pub fn from_i32(code: i32) -> Self {
        match code {
            -2 => JobStatus::UnknownJobId,
            -1 => JobStatus::FailedToProcess,
            0 => JobStatus::Working,
            1 => JobStatus::ProcessingComplete,
            _ => JobStatus::Unknown, // Total mapping: anything else is Unknown
        }
    }

    /// Convert a JobStatus to its wire status code
    pub fn to_i32(&self) -> i32 {
        match self {
            JobStatus::Unknown => -3,
            JobStatus::UnknownJobId => -2,
            JobStatus::FailedToProcess => -1,
            JobStatus::Working => 0,
            JobStatus::ProcessingComplete => 1,
        }
    }

    /// Whether no further polling is meaningful after this status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::ProcessingComplete | JobStatus::FailedToProcess | JobStatus::UnknownJobId
        )
    }
}

/// Final disposition of a filing, as reported by the result fetch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilingDisposition {
    /// No disposition available (also the safe fallback for unrecognized codes)
    #[default]
    Unknown,
    /// Accepted pending signature verification
    Pending,
    /// Accepted as filed
    Accepted,
    /// Rejected by the service
    Rejected,
}

impl FilingDisposition {
    /// Convert a wire disposition code to a FilingDisposition
    pub fn from_i32(code: i32) -> Self {
        match code {
            0 => FilingDisposition::Unknown,
            1 => FilingDisposition::Pending,
            2 => FilingDisposition::Accepted,
            3 => FilingDisposition::Rejected,
            _ => FilingDisposition::Unknown, // Total mapping: out-of-range is Unknown
        }
    }

    /// Convert a FilingDisposition to its wire disposition code
    pub fn to_i32(&self) -> i32 {
        match self {
            FilingDisposition::Unknown => 0,
            FilingDisposition::Pending => 1,
            FilingDisposition::Accepted => 2,
            FilingDisposition::Rejected => 3,
        }
    }
}

/// Final outcome of a filing workflow
///
/// Produced at most once per workflow, from the result fetch after a
/// ProcessingComplete status. All fields hold their sentinel values when no
/// result was fetched (rejection at submit, job failure, poll timeout).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingOutcome {
    /// Classified disposition
    pub disposition: FilingDisposition,

    /// Filing identifier assigned by the service (empty unless Accepted/Pending)
    pub filing_id: String,

    /// Filing timestamp (None unless Accepted/Pending and reported)
    pub filing_date: Option<NaiveDateTime>,

    /// Validation report bytes, base64-decoded from the response (may be empty)
    pub validation_report: Vec<u8>,
}

impl FilingOutcome {
    /// Human-readable disposition line for logs and display
    ///
    /// Pending is checked on its own branch: it is not Accepted, but it is
    /// not a rejection either.
    pub fn disposition_message(&self) -> String {
        match self.disposition {
            FilingDisposition::Accepted => {
                format!("E-filing accepted as filing id {}", self.filing_id)
            }
            FilingDisposition::Pending => format!(
                "E-filing pending signature verification as pending id {}",
                self.filing_id
            ),
            FilingDisposition::Rejected | FilingDisposition::Unknown => {
                "E-filing rejected".to_string()
            }
        }
    }
}

/// Signer identifier + PIN pair carried with v1.1 submissions
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerCredential {
    /// Signer identifier
    pub signer_id: String,

    /// Signer PIN
    pub signer_pin: String,
}

/// Everything needed for one submission attempt
///
/// Built by the caller from collaborator-supplied fields, immutable once
/// handed to the workflow, and discarded after the request is sent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubmissionRequest {
    /// Vendor identifier issued by the service
    #[serde(default)]
    pub vendor_id: String,

    /// Vendor PIN issued by the service
    #[serde(default)]
    pub vendor_pin: String,

    /// Filer identifier
    #[serde(default)]
    pub filer_id: String,

    /// Filer password
    #[serde(default)]
    pub filer_password: String,

    /// Reply-to email address for service notifications
    #[serde(default)]
    pub reply_to: String,

    /// Identifier of the filing this submission supersedes (empty unless
    /// this is an amendment)
    #[serde(default)]
    pub superseded_filing_id: String,

    /// Amendment sequence number (unset unless this is an amendment)
    #[serde(default)]
    pub amendment_sequence: Option<u32>,

    /// Base64-encoded document payload
    #[serde(default)]
    pub encoded_document: String,

    /// Signer credentials for v1.1 submissions; the service expects at most
    /// two entries
    #[serde(default)]
    pub signers: Vec<SignerCredential>,
}

impl SubmissionRequest {
    /// Base64-encode raw document bytes into `encoded_document`
    pub fn set_document(&mut self, raw: &[u8]) {
        self.encoded_document = crate::request::encode_document(raw);
    }

    /// Append a signer credential pair
    ///
    /// Entries with an empty identifier are dropped: a signer is only
    /// meaningful when identified.
    pub fn add_signer(&mut self, signer_id: impl Into<String>, signer_pin: impl Into<String>) {
        let signer_id = signer_id.into();
        if signer_id.is_empty() {
            return;
        }
        self.signers.push(SignerCredential {
            signer_id,
            signer_pin: signer_pin.into(),
        });
    }

    /// Whether this submission amends an earlier filing
    pub fn is_amendment(&self) -> bool {
        !self.superseded_filing_id.is_empty()
    }
}


/// Typed result of parsing a submit response
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitResponse {
    /// Submission accepted; poll this job for completion
    Accepted(JobId),

    /// Submission rejected up front, with the service's reason when given
    Rejected {
        /// Optional human-readable rejection reason from the service
        message: Option<String>,
    },

    /// The response carried no readable acceptance flag; treated as no job
    /// accepted, with nothing to report
    Unreadable,
}

impl SubmitResponse {
    /// The accepted job identifier, if any
    pub fn job_id(&self) -> Option<JobId> {
        match self {
            SubmitResponse::Accepted(id) => Some(*id),
            _ => None,
        }
    }
}
