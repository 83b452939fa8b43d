use thiserror::Error;

use commendai_core::error::CoreError;
use commendai_core::i18n::{MessageKey, Translator};
use commendai_infra::api::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("validation error: {0}")]
    Validation(#[from] CoreError),
    #[error("draft is empty")]
    EmptyDraft,
    #[error("another request is still in flight")]
    Busy,
    #[error("network error: {0}")]
    Network(String),
    #[error("backend error: {}", .message.as_deref().unwrap_or("no message"))]
    Backend {
        status: Option<u16>,
        message: Option<String>,
        user_friendly: bool,
    },
    #[error("admin session rejected")]
    Auth,
    #[error("request timed out")]
    Timeout,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    pub fn display_message(&self, translator: &Translator, fallback: MessageKey) -> String {
        match self {
            ClientError::Backend {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Backend { message: None, .. } | ClientError::InvalidResponse(_) => {
                translator.t(fallback).to_string()
            }
            ClientError::Network(detail) => {
                format!("{} {detail}", translator.t(MessageKey::ErrorConnection))
            }
            ClientError::Validation(err) => {
                format!("{} ({err})", translator.t(MessageKey::ErrorInvalidInput))
            }
            ClientError::EmptyDraft => translator.t(MessageKey::ErrorEmptyDraft).to_string(),
            ClientError::Busy => translator.t(MessageKey::ErrorBusy).to_string(),
            ClientError::Auth => translator.t(MessageKey::ErrorSessionExpired).to_string(),
            ClientError::Timeout => translator.t(MessageKey::ErrorTimeout).to_string(),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth)
    }
}

impl From<ApiError> for ClientError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(detail) => ClientError::Network(detail),
            ApiError::Timeout => ClientError::Timeout,
            ApiError::Forbidden(_) => ClientError::Auth,
            ApiError::Backend {
                status,
                message,
                user_friendly,
            } => ClientError::Backend {
                status: Some(status),
                message,
                user_friendly,
            },
            ApiError::InvalidResponse(detail) => ClientError::InvalidResponse(detail),
        }
    }
}

impl From<tokio::time::error::Elapsed> for ClientError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        ClientError::Timeout
    }
}
