//! Normalizer output and classification-service DTO types.

use serde::{Deserialize, Serialize};

/// Canonical model/trim resolution for one listing title. Every field is
/// optional; [`ModelTrim::none`] is the all-null result returned for titles
/// the normalizer refuses to guess at (denylisted model families,
/// unrecognizable titles).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTrim {
    pub model: Option<String>,
    pub trim: Option<String>,
    pub generation: Option<String>,
    pub year: Option<i32>,
}

impl ModelTrim {
    #[must_use]
    pub fn none() -> Self {
        ModelTrim::default()
    }

    /// `true` when nothing was resolved.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.model.is_none()
            && self.trim.is_none()
            && self.generation.is_none()
            && self.year.is_none()
    }
}

/// Chat-completion request body for the classification service.
#[derive(Debug, Serialize)]
pub(crate) struct CompletionRequest<'a> {
    pub model: &'a str,
    pub temperature: f32,
    pub messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Message<'a> {
    pub role: &'a str,
    pub content: String,
}

/// The slice of the chat-completion response we consume.
#[derive(Debug, Deserialize)]
pub(crate) struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_all_null() {
        let mt = ModelTrim::none();
        assert!(mt.is_none());
        assert_eq!(mt.model, None);
        assert_eq!(mt.year, None);
    }

    #[test]
    fn partial_resolution_is_not_none() {
        let mt = ModelTrim {
            year: Some(2004),
            ..ModelTrim::none()
        };
        assert!(!mt.is_none());
    }
}
