//! Results export
//!
//! Serializes a finished session report for the outside world. Where the
//! bytes end up (files, clipboard, share sheet) is the caller's business.

use ep_core::{EpError, EpResult};

use crate::session::SessionReport;

/// Pretty-printed JSON for a session report
pub fn report_to_json(report: &SessionReport) -> EpResult<String> {
    serde_json::to_string_pretty(report).map_err(|e| EpError::Serialization(e.to_string()))
}

/// Escape one CSV field per RFC 4180: quote when the field contains a
/// comma, quote, or newline, doubling any internal quotes.
fn escape_csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// One row per answer, trial order
pub fn report_to_csv(report: &SessionReport) -> String {
    let mut csv =
        String::from("trial,slot_one_is_a,x_is_a,choice,correct,response_time_ms,trim_db\n");

    for answer in &report.answers {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            answer.trial_index,
            answer.slot_one_is_a,
            answer.x_is_a.map(|b| b.to_string()).unwrap_or_default(),
            escape_csv_field(answer.choice.as_str()),
            answer.correct.map(|b| b.to_string()).unwrap_or_default(),
            answer.response_time_ms,
            answer.trim_db
        ));
    }

    csv
}
