//! Per-session field persistence for collaborating hosts
//!
//! Interactive hosts that drive this client carry a small fixed set of
//! fields between runs: the credentials, the remote API root, and where the
//! last document was picked from. [`SessionStore`] is the seam those hosts
//! plug into; the workflow itself never reads or writes a store.

use crate::error::Result;
use crate::types::SubmissionRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// The fixed field set carried from one session to the next
///
/// Every field is a plain string with an empty default, so a store with no
/// saved state and a store with blank saved state are indistinguishable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFields {
    /// Vendor identifier
    #[serde(default)]
    pub vendor_id: String,

    /// Vendor PIN
    #[serde(default)]
    pub vendor_pin: String,

    /// Filer identifier
    #[serde(default)]
    pub filer_id: String,

    /// Filer password
    #[serde(default)]
    pub filer_password: String,

    /// Reply-to email address
    #[serde(default)]
    pub reply_to: String,

    /// Superseded filing identifier from the last amendment
    #[serde(default)]
    pub superseded_filing_id: String,

    /// Remote API root last used
    #[serde(default)]
    pub remote_root: String,

    /// Directory the last document was picked from
    #[serde(default)]
    pub document_dir: String,
}

/// Seed a submission from saved session fields
///
/// Copies the credential fields; the document payload, signers, and
/// amendment sequence are per-submission and stay at their defaults.
/// `remote_root` and `document_dir` are host-side conveniences and are not
/// part of a request.
impl From<&SessionFields> for SubmissionRequest {
    fn from(fields: &SessionFields) -> Self {
        SubmissionRequest {
            vendor_id: fields.vendor_id.clone(),
            vendor_pin: fields.vendor_pin.clone(),
            filer_id: fields.filer_id.clone(),
            filer_password: fields.filer_password.clone(),
            reply_to: fields.reply_to.clone(),
            superseded_filing_id: fields.superseded_filing_id.clone(),
            ..Default::default()
        }
    }
}

/// Load/save seam for session fields
///
/// Implementations decide where the fields live. The two provided here
/// cover a JSON file on disk and plain process memory.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the previously saved fields
    ///
    /// A store with nothing saved yet returns the default (all-empty)
    /// field set rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if saved state exists but cannot be read or
    /// decoded.
    async fn load(&self) -> Result<SessionFields>;

    /// Persist the fields for the next session
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be encoded or written.
    async fn save(&self, fields: &SessionFields) -> Result<()>;
}

/// Session store backed by a JSON file
#[derive(Clone, Debug)]
pub struct JsonFileSessionStore {
    path: PathBuf,
}

impl JsonFileSessionStore {
    /// Create a store backed by the given file path
    ///
    /// The file does not need to exist yet; a missing file loads as the
    /// default field set.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for JsonFileSessionStore {
    async fn load(&self) -> Result<SessionFields> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no saved session, starting fresh");
                Ok(SessionFields::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, fields: &SessionFields) -> Result<()> {
        // A bare file name has an empty parent; nothing to create then
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(fields)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}

/// In-memory session store for tests and embedded hosts
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    fields: Mutex<SessionFields>,
}

impl MemorySessionStore {
    /// Create a store holding the default field set
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<SessionFields> {
        Ok(self.fields.lock().await.clone())
    }

    async fn save(&self, fields: &SessionFields) -> Result<()> {
        *self.fields.lock().await = fields.clone();
        Ok(())
    }
}
