use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStatus {
    Ok,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredGeneration {
    pub status: GenerationStatus,
    pub generated_text: Option<String>,
    pub comment_id: Option<CommentId>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Text(String),
    Structured(StructuredGeneration),
}

impl GenerationOutcome {
    pub fn text(&self) -> Option<&str> {
        let text = match self {
            GenerationOutcome::Text(text) => Some(text.as_str()),
            GenerationOutcome::Structured(result) => result.generated_text.as_deref(),
        };
        text.filter(|value| !value.trim().is_empty())
    }

    pub fn comment_id(&self) -> Option<&CommentId> {
        match self {
            GenerationOutcome::Text(_) => None,
            GenerationOutcome::Structured(result) => result.comment_id.as_ref(),
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            GenerationOutcome::Structured(StructuredGeneration {
                status: GenerationStatus::Warning,
                ..
            })
        )
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            GenerationOutcome::Text(_) => None,
            GenerationOutcome::Structured(result) => result.message.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_text_has_no_id() {
        let outcome = GenerationOutcome::Text("Great video".to_string());
        assert_eq!(outcome.text(), Some("Great video"));
        assert!(outcome.comment_id().is_none());
        assert!(!outcome.is_warning());
    }

    #[test]
    fn blank_text_counts_as_missing() {
        let outcome = GenerationOutcome::Structured(StructuredGeneration {
            status: GenerationStatus::Warning,
            generated_text: Some("  ".to_string()),
            comment_id: None,
            message: Some("Duplicate detected".to_string()),
        });
        assert_eq!(outcome.text(), None);
        assert!(outcome.is_warning());
        assert_eq!(outcome.message(), Some("Duplicate detected"));
    }
}
