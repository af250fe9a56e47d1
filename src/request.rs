//! Submit payload encoding for both wire protocol versions
//!
//! v1.0 submits form-encoded key/value fields; v1.1 submits a JSON document
//! that adds signer credentials and the amendment sequence. Field names are
//! the vendor wire contract and are not negotiable: note `VendorPIN` in the
//! form variant versus `VendorPin` in JSON, and the `Superceded` spelling.
//!
//! Encoding is a pure transformation: field content validation is the
//! service's responsibility.

use crate::types::SubmissionRequest;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;

/// Base64-encode raw document bytes for the `Base64EncodedEfile` field
pub fn encode_document(raw: &[u8]) -> String {
    BASE64.encode(raw)
}

/// Build the v1.0 form field set
///
/// `SupercededFilingId` is always present, empty when the submission is not
/// an amendment; the service reads an empty value as "not an amendment".
/// Signer credentials and the amendment sequence do not exist in v1.0.
pub(crate) fn form_fields(request: &SubmissionRequest) -> Vec<(&'static str, String)> {
    vec![
        ("VendorId", request.vendor_id.clone()),
        ("VendorPIN", request.vendor_pin.clone()),
        ("FilerId", request.filer_id.clone()),
        ("FilerPassword", request.filer_password.clone()),
        ("Email", request.reply_to.clone()),
        ("SupercededFilingId", request.superseded_filing_id.clone()),
        ("Base64EncodedEfile", request.encoded_document.clone()),
    ]
}

/// v1.1 JSON submit body
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SubmitEfileModel {
    vendor_id: String,
    vendor_pin: String,
    filer_id: String,
    filer_password: String,
    email: String,
    superceded_filing_id: String,
    base64_encoded_efile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    amendment_sequence: Option<u32>,
    signatures: Vec<SignatureModel>,
}

/// Signer entry inside the v1.1 `Signatures` array
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SignatureModel {
    signer_id: String,
    signer_pin: String,
}

impl SubmitEfileModel {
    /// Build the wire model from a submission request
    ///
    /// Signers with an empty identifier are dropped here as well, so a
    /// request assembled through the public fields keeps the invariant.
    pub(crate) fn from_request(request: &SubmissionRequest) -> Self {
        let signatures = request
            .signers
            .iter()
            .filter(|signer| !signer.signer_id.is_empty())
            .map(|signer| SignatureModel {
                signer_id: signer.signer_id.clone(),
                signer_pin: signer.signer_pin.clone(),
            })
            .collect();

        Self {
            vendor_id: request.vendor_id.clone(),
            vendor_pin: request.vendor_pin.clone(),
            filer_id: request.filer_id.clone(),
            filer_password: request.filer_password.clone(),
            email: request.reply_to.clone(),
            superceded_filing_id: request.superseded_filing_id.clone(),
            base64_encoded_efile: request.encoded_document.clone(),
            amendment_sequence: request.amendment_sequence,
            signatures,
        }
    }
}
