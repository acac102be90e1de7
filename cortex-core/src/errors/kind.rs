use serde::{Deserialize, Serialize};

/// The coarse error taxonomy every subsystem error maps onto (spec.md §7).
///
/// Handlers branch on `kind()`, never on the concrete error variant, so a
/// new backend can be added without touching call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Null/empty/bad-shape arguments. Surfaced immediately, never retried.
    InvalidInput,
    /// Id unknown. A false/null result on delete/update/get; INVALID_INPUT
    /// on relationship endpoints instead (see `GraphError`).
    NotFound,
    /// 5xx, 429, connection reset. Retried with backoff by the pipeline.
    BackendTransient,
    /// 401/403, malformed response. Surfaced, never retried.
    BackendPermanent,
    /// Deadline exceeded. Surfaced; counts as failure, never success.
    Timeout,
    /// Operation submitted after shutdown began.
    Shutdown,
    /// Dimension mismatch, missing invariant. Fatal.
    Corruption,
}

impl ErrorKind {
    /// Whether the pipeline's retry loop should re-attempt an operation that
    /// failed with this kind.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::BackendTransient)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::BackendTransient => "BACKEND_TRANSIENT",
            ErrorKind::BackendPermanent => "BACKEND_PERMANENT",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::Shutdown => "SHUTDOWN",
            ErrorKind::Corruption => "CORRUPTION",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_backend_transient_is_retryable() {
        for kind in [
            ErrorKind::InvalidInput,
            ErrorKind::NotFound,
            ErrorKind::BackendTransient,
            ErrorKind::BackendPermanent,
            ErrorKind::Timeout,
            ErrorKind::Shutdown,
            ErrorKind::Corruption,
        ] {
            assert_eq!(kind.is_retryable(), kind == ErrorKind::BackendTransient);
        }
    }
}
