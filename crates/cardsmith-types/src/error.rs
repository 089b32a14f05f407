use thiserror::Error;

use crate::card::CardId;
use crate::llm::LlmError;

/// Errors from the generation gateway.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No credential or provider configuration; fatal for the call.
    #[error("generation is not configured: {0}")]
    Configuration(String),

    #[error("generation service failed: {0}")]
    Service(#[from] LlmError),

    /// The response did not satisfy the declared schema.
    #[error("malformed generation response: {0}")]
    MalformedResponse(String),

    #[error("another generation call is already in flight")]
    Busy,
}

impl GenerationError {
    /// Whether the failure came from the remote service (as opposed to local
    /// configuration or the in-flight guard).
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            GenerationError::Service(_) | GenerationError::MalformedResponse(_)
        )
    }
}

/// Errors from the card store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A persisted collection exists but cannot be decoded.
    #[error("persisted collection is corrupt: {0}")]
    Corrupt(String),

    #[error("card id {0} already exists in the collection")]
    DuplicateId(CardId),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors from repository operations (used by port definitions in cardsmith-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from a studio action that generates and then stores.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from exporting an artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: no site has been built yet")]
    NothingToExport,

    #[error("failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_service_class() {
        assert!(GenerationError::Service(LlmError::AuthenticationFailed).is_service_error());
        assert!(GenerationError::MalformedResponse("bad".to_string()).is_service_error());
        assert!(!GenerationError::Busy.is_service_error());
        assert!(!GenerationError::Configuration("no key".to_string()).is_service_error());
    }

    #[test]
    fn test_store_error_display() {
        let id = CardId::new();
        let err = StoreError::DuplicateId(id);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_studio_error_is_transparent() {
        let err = StudioError::from(GenerationError::Busy);
        assert_eq!(err.to_string(), GenerationError::Busy.to_string());
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_export_error_display() {
        let err = ExportError::Io {
            path: "site.html".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("site.html"));
        assert!(err.to_string().contains("denied"));
    }
}
