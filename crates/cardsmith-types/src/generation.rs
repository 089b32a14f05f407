//! Generation call types: the produced artifact and the per-call status.

use serde::{Deserialize, Serialize};

use std::fmt;

/// A generated webpage document. Opaque text; never parsed locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Artifact(String);

impl Artifact {
    pub fn new(document: impl Into<String>) -> Self {
        Self(document.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a generation call.
///
/// `Idle -> Pending -> {Succeeded, Failed}`; the caller acknowledges a
/// finished call to return to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl GenerationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, GenerationStatus::Pending)
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationStatus::Idle => write!(f, "idle"),
            GenerationStatus::Pending => write!(f, "pending"),
            GenerationStatus::Succeeded => write!(f, "succeeded"),
            GenerationStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Which generation operation a call performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
    Pack,
    Forge,
    Assemble,
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationKind::Pack => write!(f, "pack"),
            GenerationKind::Forge => write!(f, "forge"),
            GenerationKind::Assemble => write!(f, "assemble"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_is_opaque_text() {
        let artifact = Artifact::new("<!DOCTYPE html><html></html>");
        assert_eq!(artifact.as_str(), "<!DOCTYPE html><html></html>");
        assert_eq!(artifact.to_string(), artifact.as_str());
        assert!(!artifact.is_empty());
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&GenerationStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        assert!(GenerationStatus::Pending.is_pending());
        assert!(!GenerationStatus::Failed.is_pending());
    }
}
