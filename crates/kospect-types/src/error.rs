use thiserror::Error;

use crate::ResourceKind;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by kospect operations.
///
/// Input errors are raised before any provider call; provider errors are
/// propagated verbatim for single-resource operations and downgraded to
/// per-item skips inside fan-out work.
#[derive(Debug, Error)]
pub enum Error {
    /// A required request parameter was empty.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// The requested kind is not part of the supported catalog.
    #[error("unsupported resource type: {0}")]
    UnsupportedKind(String),

    /// A single-resource lookup came back empty.
    #[error("{kind} {namespace}/{name} not found")]
    NotFound {
        kind: ResourceKind,
        namespace: String,
        name: String,
    },

    /// The cluster provider failed.
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

impl Error {
    /// True for errors callers can fix by amending the request.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingParameter(_) | Self::UnsupportedKind(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::NotFound {
            kind: ResourceKind::Pod,
            namespace: "default".into(),
            name: "web-0".into(),
        };
        assert_eq!(err.to_string(), "Pod default/web-0 not found");
    }

    #[test]
    fn test_input_error_classification() {
        assert!(Error::MissingParameter("namespace").is_input_error());
        assert!(Error::UnsupportedKind("Gizmo".into()).is_input_error());
        assert!(!Error::Provider(anyhow::anyhow!("boom")).is_input_error());
    }
}
