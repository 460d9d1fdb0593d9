//! Event validation hook.
//!
//! Every write path calls [`validate_event`] before touching storage. No rule
//! is enforced yet: event content is accepted as-is, dangling or cyclic
//! `parent_event_id` references included. Per-field rules go here when they
//! are introduced, reported as [`CoreError::Validation`].

use crate::entities::NotificationEvent;
use crate::errors::CoreError;

/// Validate an event before it is appended or completed.
///
/// # Errors
///
/// Never fails today; reserved for future [`CoreError::Validation`] rules.
#[allow(clippy::unnecessary_wraps)]
pub fn validate_event(_event: &NotificationEvent) -> Result<(), CoreError> {
    Ok(())
}
