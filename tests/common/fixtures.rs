//! Canned wire responses for the mocked filing service

/// Job id the mocked service hands out on acceptance
pub const JOB_ID: &str = "ba3bdf17-cc63-441f-9bab-a12a010b08d1";

/// Base64 of `<x></x>`, the smallest well-formed validation report
pub const VALIDATION_CONTENT: &str = "PHg+PC94Pg==";

/// Acknowledgement accepting the submission as [`JOB_ID`]
pub fn submit_accepted() -> String {
    format!("<response><accepted>true</accepted><job_id>{JOB_ID}</job_id></response>")
}

/// Acknowledgement rejecting the submission with a reason
pub fn submit_rejected(reason: &str) -> String {
    format!(
        "<response><accepted>false</accepted><error_message>{reason}</error_message></response>"
    )
}

/// Status response carrying one job status code
pub fn status_with_code(code: i32) -> String {
    format!("<response><job_status_code>{code}</job_status_code></response>")
}

/// Status response whose code is not an integer at all
pub fn status_with_garbage() -> String {
    "<response><job_status_code>soon</job_status_code></response>".to_string()
}

/// Result response for an accepted filing, with the standard validation report
pub fn result_accepted(filing_id: &str, filing_date: &str) -> String {
    format!(
        "<response><status>2</status><filing_id>{filing_id}</filing_id>\
         <filing_date>{filing_date}</filing_date>\
         <validation_content>{VALIDATION_CONTENT}</validation_content></response>"
    )
}

/// Result response for a filing pending signature verification
pub fn result_pending(filing_id: &str, filing_date: &str) -> String {
    format!(
        "<response><status>1</status><filing_id>{filing_id}</filing_id>\
         <filing_date>{filing_date}</filing_date></response>"
    )
}

/// Result response carrying only a status code
pub fn result_with_status(code: i32) -> String {
    format!("<response><status>{code}</status></response>")
}
