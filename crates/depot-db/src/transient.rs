//! Transient storage error detection.
//!
//! The ledger never retries on its own. It only labels failures that a
//! caller can safely retry: local lock contention (`SQLITE_BUSY`), and remote
//! connection or Turso infrastructure hiccups (node recycling, shared lock
//! contention during provisioning) that resolve within seconds.

/// Substrings of libSQL error messages that indicate a retryable condition.
const TRANSIENT_MARKERS: &[&str] = &[
    "database is locked",
    "database is busy",
    "unable to acquire shared lock",
    "deletion must be in progress",
    "connection refused",
    "connection reset",
    "timed out",
];

/// Detect transient libSQL errors.
///
/// The predicate is intentionally narrow to avoid retrying genuine SQL or
/// constraint errors.
pub fn is_transient_libsql_error(e: &libsql::Error) -> bool {
    is_transient_message(&e.to_string())
}

fn is_transient_message(msg: &str) -> bool {
    let msg = msg.to_ascii_lowercase();
    TRANSIENT_MARKERS.iter().any(|marker| msg.contains(marker))
}
