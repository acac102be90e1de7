use super::kind::ErrorKind;

/// The error type every public Cortex operation resolves to.
///
/// Subsystem crates (`cortex-pipeline`, `cortex-search`, `cortex-graph`, ...)
/// define their own `thiserror` enums for their internal failure modes and
/// convert into this one at their crate boundary, attaching the operation
/// and id context the caller needs to act (spec.md §7 propagation rules).
#[derive(Debug, thiserror::Error)]
pub enum CortexError {
    #[error("invalid input for {operation}: {reason}")]
    InvalidInput { operation: String, reason: String },

    #[error("{operation}: id {id} not found")]
    NotFound { operation: String, id: String },

    #[error("{operation} failed transiently: {reason}")]
    BackendTransient { operation: String, reason: String },

    #[error("{operation} failed permanently: {reason}")]
    BackendPermanent { operation: String, reason: String },

    #[error("{operation} timed out after {elapsed_ms}ms")]
    Timeout { operation: String, elapsed_ms: u64 },

    #[error("{operation} rejected: runtime is shutting down")]
    Shutdown { operation: String },

    #[error("corruption detected in {operation}: {details}")]
    Corruption { operation: String, details: String },
}

impl CortexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CortexError::InvalidInput { .. } => ErrorKind::InvalidInput,
            CortexError::NotFound { .. } => ErrorKind::NotFound,
            CortexError::BackendTransient { .. } => ErrorKind::BackendTransient,
            CortexError::BackendPermanent { .. } => ErrorKind::BackendPermanent,
            CortexError::Timeout { .. } => ErrorKind::Timeout,
            CortexError::Shutdown { .. } => ErrorKind::Shutdown,
            CortexError::Corruption { .. } => ErrorKind::Corruption,
        }
    }

    pub fn retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    pub fn operation(&self) -> &str {
        match self {
            CortexError::InvalidInput { operation, .. }
            | CortexError::NotFound { operation, .. }
            | CortexError::BackendTransient { operation, .. }
            | CortexError::BackendPermanent { operation, .. }
            | CortexError::Shutdown { operation }
            | CortexError::Corruption { operation, .. }
            | CortexError::Timeout { operation, .. } => operation,
        }
    }

    pub fn invalid_input(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        CortexError::InvalidInput {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(operation: impl Into<String>, id: impl Into<String>) -> Self {
        CortexError::NotFound {
            operation: operation.into(),
            id: id.into(),
        }
    }

    pub fn shutdown(operation: impl Into<String>) -> Self {
        CortexError::Shutdown {
            operation: operation.into(),
        }
    }
}

pub type CortexResult<T> = Result<T, CortexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_mapping_round_trips_through_retryable() {
        let err = CortexError::BackendTransient {
            operation: "add".into(),
            reason: "connection reset".into(),
        };
        assert_eq!(err.kind(), ErrorKind::BackendTransient);
        assert!(err.retryable());
    }

    #[test]
    fn invalid_input_is_never_retryable() {
        let err = CortexError::invalid_input("search", "empty query");
        assert!(!err.retryable());
        assert_eq!(err.operation(), "search");
    }
}
