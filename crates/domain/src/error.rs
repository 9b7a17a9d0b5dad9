//! Domain error types.

use std::time::Duration;

use thiserror::Error;

use crate::goods::LookupError;
use crate::order::{OrderError, RepositoryError};

/// Boxed error used by collaborator implementations to carry backend failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during order lifecycle operations.
///
/// Collaborator errors are wrapped as-is so callers can still match on the
/// original failure.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The goods lookup failed.
    #[error(transparent)]
    Goods(#[from] LookupError),

    /// The order repository failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The order entity rejected its input.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// A caller broke the lifecycle contract.
    #[error("Precondition violated: {0}")]
    Precondition(&'static str),

    /// A collaborator call did not finish within the configured deadline.
    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },
}

/// Coarse classification of a [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input rejected by the order entity.
    Invalid,
    /// Referenced goods do not exist.
    NotFound,
    /// Storage or transport failure.
    Persistence,
    /// The enable update affected no rows.
    IllegalState,
    /// Programming error in call sequencing.
    Precondition,
    /// A collaborator call exceeded its deadline.
    Timeout,
}

impl ErrorKind {
    /// Returns the kind as a metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Invalid => "invalid",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Persistence => "persistence",
            ErrorKind::IllegalState => "illegal_state",
            ErrorKind::Precondition => "precondition",
            ErrorKind::Timeout => "timeout",
        }
    }
}

impl DomainError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Goods(LookupError::NotFound(_)) => ErrorKind::NotFound,
            DomainError::Goods(LookupError::Backend(_)) => ErrorKind::Persistence,
            DomainError::Repository(RepositoryError::EnableFailure(_)) => ErrorKind::IllegalState,
            DomainError::Repository(_) => ErrorKind::Persistence,
            DomainError::Order(_) => ErrorKind::Invalid,
            DomainError::Precondition(_) => ErrorKind::Precondition,
            DomainError::Timeout { .. } => ErrorKind::Timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{GoodsId, OrderId};

    #[test]
    fn test_kind_classification() {
        let not_found: DomainError = LookupError::NotFound(GoodsId::new(9)).into();
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let enable: DomainError = RepositoryError::EnableFailure(OrderId::new(1)).into();
        assert_eq!(enable.kind(), ErrorKind::IllegalState);

        let backend: DomainError = RepositoryError::Backend("disk full".into()).into();
        assert_eq!(backend.kind(), ErrorKind::Persistence);

        let timeout = DomainError::Timeout {
            operation: "goods.require",
            timeout: Duration::from_millis(5),
        };
        assert_eq!(timeout.kind(), ErrorKind::Timeout);
    }

    #[test]
    fn test_collaborator_messages_pass_through() {
        let err: DomainError = RepositoryError::EnableFailure(OrderId::new(3)).into();
        assert_eq!(err.to_string(), "order enable failure: order 3");
    }
}
