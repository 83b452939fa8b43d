use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid video url: {0}")]
    InvalidVideoUrl(String),
    #[error("unsupported comment language: {0}")]
    UnsupportedLanguage(String),
    #[error("unsupported interface language: {0}")]
    UnsupportedInterfaceLanguage(String),
    #[error("invalid ad position: {0}")]
    InvalidAdPosition(String),
}
