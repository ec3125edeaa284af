use thiserror::Error;

/// Failures raised by the business operations themselves
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Failure raised by an advice's own logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct AdviceError(pub String);

/// Owner-name resolution failures. Recovered inside the advice, never surfaced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    #[error("join point has no target component")]
    TargetUnavailable,

    #[error("target component reports an empty name")]
    AnonymousTarget,
}

/// Errors crossing the pipeline boundary back to the caller
#[derive(Debug, Error)]
pub enum AspectError {
    /// Native operation failure, propagated unchanged
    #[error(transparent)]
    Operation(#[from] OperationError),

    /// Any failure of a wrapped call, re-raised under a generic kind.
    /// The original is kept as `source` for logging only.
    #[error("Invocation of {owner}.{operation} failed")]
    WrappedInvocation {
        owner: String,
        operation: String,
        #[source]
        source: Box<AspectError>,
    },

    #[error("Advice {advice} failed: {source}")]
    AdviceFailed {
        advice: &'static str,
        #[source]
        source: AdviceError,
    },

    #[error("Around advice returned {found} where {expected} was expected")]
    ReturnTypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl AspectError {
    /// Innermost operation failure, if this error carries one
    pub fn root_operation_error(&self) -> Option<&OperationError> {
        match self {
            AspectError::Operation(e) => Some(e),
            AspectError::WrappedInvocation { source, .. } => source.root_operation_error(),
            _ => None,
        }
    }

    pub fn is_wrapped(&self) -> bool {
        matches!(self, AspectError::WrappedInvocation { .. })
    }
}

/// Convert from database errors
impl From<crate::database::manager::DatabaseError> for OperationError {
    fn from(error: crate::database::manager::DatabaseError) -> Self {
        match error {
            crate::database::manager::DatabaseError::NotFound(msg) => OperationError::NotFound(msg),
            other => OperationError::DatabaseError(other.to_string()),
        }
    }
}
