//! Session and command extraction from raw log records.
//!
//! Turns the flat record stream into (session, command) pairs: login
//! attempts become `"<username>/<password>"` credential strings, shell
//! activity contributes the `input` field verbatim, everything else is
//! ignored.

use serde_json::Value;
use tracing::debug;
use triage_core::models::{
    SessionCommand, EVENT_LOGIN_FAILED, EVENT_LOGIN_SUCCESS, UNKNOWN_SESSION,
};

/// Extract session-command pairs from raw records, preserving input order.
///
/// Records without a `session` key are bucketed under
/// [`UNKNOWN_SESSION`] rather than dropped, so their commands still show
/// up in the anomaly report and the matrix.
pub fn extract_session_commands(records: &[Value]) -> Vec<SessionCommand> {
    let mut pairs: Vec<SessionCommand> = Vec::new();

    for record in records {
        let event_id = record.get("eventid").and_then(Value::as_str).unwrap_or("");

        if event_id == EVENT_LOGIN_FAILED || event_id == EVENT_LOGIN_SUCCESS {
            let username = record.get("username").and_then(Value::as_str).unwrap_or("");
            let password = record.get("password").and_then(Value::as_str).unwrap_or("");
            pairs.push(SessionCommand {
                session: session_of(record),
                command: format!("{}/{}", username, password),
            });
        } else if let Some(input) = record.get("input").and_then(Value::as_str) {
            pairs.push(SessionCommand {
                session: session_of(record),
                command: input.to_string(),
            });
        }
    }

    debug!("Extracted {} session-command pairs", pairs.len());
    pairs
}

/// Session label of a record, or the sentinel when absent or non-string.
fn session_of(record: &Value) -> String {
    record
        .get("session")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_SESSION)
        .to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
