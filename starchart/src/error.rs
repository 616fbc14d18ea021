//! Shared error taxonomy for system and commander resolution.
//!
//! Every backend adapter translates its source-specific failures into this
//! one enum. The variants are `Clone` because the single-flight cache hands
//! the same failure to every concurrently-waiting caller.

/// A failure to resolve a key against the backends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The key has no corresponding record anywhere authoritative.
    #[error("no record found for {key:?}")]
    NotFound { key: String },

    /// A record exists but its owner has hidden it. Distinct from
    /// `NotFound` so callers can message users correctly.
    #[error("the record for {key:?} exists but is hidden by its owner")]
    AccessRestricted { key: String },

    /// Malformed name/id or out-of-bound search parameters.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// Timeout or network failure. Never cached; safe to retry.
    #[error("transient backend failure: {message}")]
    Transient { message: String },
}

impl ResolveError {
    /// A `NotFound` for the given key.
    pub fn not_found(key: impl Into<String>) -> Self {
        ResolveError::NotFound { key: key.into() }
    }

    /// An `InvalidKey` with the offending key and a reason.
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ResolveError::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// A `Transient` failure with the given message.
    pub fn transient(message: impl Into<String>) -> Self {
        ResolveError::Transient {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        ResolveError::Transient {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ResolveError::not_found("Soll");
        assert_eq!(err.to_string(), "no record found for \"Soll\"");

        let err = ResolveError::AccessRestricted {
            key: "Hojothefool".into(),
        };
        assert!(err.to_string().contains("hidden by its owner"));

        let err = ResolveError::invalid_key("Oevasy SG-Y", "missing mass code suffix");
        assert!(err.to_string().contains("Oevasy SG-Y"));
        assert!(err.to_string().contains("missing mass code suffix"));
    }
}
