//! Identifier prefixes.
//!
//! Producers normally assign their own event ids. When they do not, the store
//! generates `{prefix}-{8 hex}` ids using these prefixes.

/// Prefix for generated notification event ids.
pub const PREFIX_EVENT: &str = "evt";

/// Format a prefixed id from a random hex suffix.
#[must_use]
pub fn format_id(prefix: &str, suffix: &str) -> String {
    format!("{prefix}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_id_joins_with_dash() {
        assert_eq!(format_id(PREFIX_EVENT, "a3f8b2c1"), "evt-a3f8b2c1");
    }
}
