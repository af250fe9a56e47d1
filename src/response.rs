//! Response parsing for the three vendor wire replies
//!
//! All three responses are flat XML: one root element (name irrelevant) with
//! named text-only children. Parsing never fails the workflow on malformed
//! markup; unreadable input degrades to the documented "no data" sentinels.
//! The only fatal conditions live in the result response: a present but
//! malformed filing date, and validation content that is not valid base64.

use crate::error::{Error, Result};
use crate::types::{FilingDisposition, FilingOutcome, JobId, JobStatus, SubmitResponse};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDateTime;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// Wire format for `filing_date` values
pub const WIRE_DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Collect the direct children of the document root as name → text pairs
///
/// Descendant text is concatenated into the child's value, matching how the
/// original service consumers read element values. The first occurrence of a
/// repeated child wins. Returns None when the markup is unreadable.
fn flat_children(body: &str) -> Option<HashMap<String, String>> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut fields = HashMap::new();
    let mut depth = 0usize;
    let mut current: Option<String> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                depth += 1;
                if depth == 2 {
                    current = Some(String::from_utf8_lossy(start.name().as_ref()).into_owned());
                    text.clear();
                }
            }
            Ok(Event::Empty(empty)) => {
                if depth == 1 {
                    let name = String::from_utf8_lossy(empty.name().as_ref()).into_owned();
                    fields.entry(name).or_insert_with(String::new);
                }
            }
            Ok(Event::Text(raw)) => {
                if depth >= 2 && current.is_some() {
                    match raw.unescape() {
                        Ok(unescaped) => text.push_str(&unescaped),
                        Err(_) => return None,
                    }
                }
            }
            Ok(Event::CData(raw)) => {
                if depth >= 2 && current.is_some() {
                    text.push_str(&String::from_utf8_lossy(raw.as_ref()));
                }
            }
            Ok(Event::End(_)) => {
                if depth == 2 && let Some(name) = current.take() {
                    fields.entry(name).or_insert_with(|| std::mem::take(&mut text));
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // declarations, comments, processing instructions
            Err(_) => return None,
        }
    }

    // A dangling open element means the document was truncated
    if depth != 0 {
        return None;
    }

    Some(fields)
}

/// Parse the SubmitEfile response
///
/// Reads boolean `accepted` and, when true, the `job_id` UUID. An unreadable
/// document or a missing `accepted` element yields [`SubmitResponse::Unreadable`]
/// silently. A rejection carries the optional `error_message` text. The one
/// fatal case is an acceptance whose `job_id` is present but not a valid
/// UUID: that submission cannot be polled and the failure surfaces.
pub fn parse_submit_response(body: &str) -> Result<SubmitResponse> {
    let Some(fields) = flat_children(body) else {
        return Ok(SubmitResponse::Unreadable);
    };
    let Some(accepted_raw) = fields.get("accepted") else {
        return Ok(SubmitResponse::Unreadable);
    };

    // Anything that does not read as true is a rejection
    if !accepted_raw.trim().eq_ignore_ascii_case("true") {
        let message = fields
            .get("error_message")
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty());
        return Ok(SubmitResponse::Rejected { message });
    }

    let Some(job_raw) = fields.get("job_id") else {
        // Accepted without an identifier: there is nothing to poll
        return Ok(SubmitResponse::Unreadable);
    };
    let job = job_raw
        .trim()
        .parse::<JobId>()
        .map_err(|_| Error::MalformedResponse(format!("invalid job id '{}'", job_raw.trim())))?;
    Ok(SubmitResponse::Accepted(job))
}

/// Parse the CheckJobStatus response
///
/// Total: unrecognized codes, unparsable text, a missing `job_status_code`
/// element, and unreadable markup all map to [`JobStatus::Unknown`].
pub fn parse_status_response(body: &str) -> JobStatus {
    let Some(fields) = flat_children(body) else {
        return JobStatus::Unknown;
    };
    fields
        .get("job_status_code")
        .and_then(|raw| raw.trim().parse::<i32>().ok())
        .map_or(JobStatus::Unknown, JobStatus::from_i32)
}

/// Parse the EfilingResult response
///
/// A missing `status` element (or unreadable markup) yields the sentinel
/// outcome. `filing_id` and `filing_date` are read only for Accepted and
/// Pending dispositions; `validation_content` is decoded whenever present,
/// regardless of disposition. Decode failures (date, base64) are fatal.
pub fn parse_result_response(body: &str) -> Result<FilingOutcome> {
    let mut outcome = FilingOutcome::default();
    let Some(fields) = flat_children(body) else {
        return Ok(outcome);
    };
    let Some(status_raw) = fields.get("status") else {
        return Ok(outcome);
    };

    // Unparsable status text behaves like an out-of-range code
    let code = status_raw.trim().parse::<i32>().unwrap_or(-1);
    outcome.disposition = FilingDisposition::from_i32(code);

    if matches!(
        outcome.disposition,
        FilingDisposition::Accepted | FilingDisposition::Pending
    ) {
        if let Some(raw) = fields.get("filing_date") {
            let raw = raw.trim();
            outcome.filing_date = Some(
                NaiveDateTime::parse_from_str(raw, WIRE_DATE_FORMAT).map_err(|source| {
                    Error::FilingDate {
                        value: raw.to_string(),
                        source,
                    }
                })?,
            );
        }
        if let Some(filing_id) = fields.get("filing_id") {
            outcome.filing_id = filing_id.trim().to_string();
        }
    }

    if let Some(encoded) = fields.get("validation_content") {
        // The report may arrive whitespace-wrapped inside its element
        let compact: String = encoded.split_whitespace().collect();
        outcome.validation_report = BASE64.decode(compact.as_bytes())?;
    }

    Ok(outcome)
}
