pub mod client;
pub mod error;

use std::fmt;
use std::future::Future;

use serde::Serialize;

use commendai_core::domain::ads::{AdCreative, AdDraft, AdPatch};
use commendai_core::domain::generation::{CommentId, GenerationOutcome};
use commendai_core::domain::history::HistoryEntry;
use commendai_core::types::language::{CommentLanguage, InterfaceLanguage};
use commendai_core::types::video_url::VideoUrl;

pub use client::ApiClient;
pub use error::ApiError;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateCommentRequest {
    pub video_url: VideoUrl,
    pub language: CommentLanguage,
    pub comment_style: String,
    pub interface_language: InterfaceLanguage,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostCommentRequest {
    pub video_url: VideoUrl,
    pub comment_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<CommentId>,
    pub interface_language: InterfaceLanguage,
}

#[derive(Clone, PartialEq, Eq)]
pub struct AdminToken(String);

impl AdminToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminToken(..)")
    }
}

pub trait CommentApi {
    fn generate_comment(
        &self,
        request: &GenerateCommentRequest,
    ) -> impl Future<Output = Result<GenerationOutcome, ApiError>> + Send;

    fn post_comment(
        &self,
        request: &PostCommentRequest,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

pub trait HistoryApi {
    fn fetch_history(&self) -> impl Future<Output = Result<Vec<HistoryEntry>, ApiError>> + Send;
}

pub trait AdsApi {
    fn fetch_active_ads(&self)
    -> impl Future<Output = Result<Vec<AdCreative>, ApiError>> + Send;
}

pub trait AdminApi {
    fn login(&self, password: &str) -> impl Future<Output = Result<AdminToken, ApiError>> + Send;

    fn logout(&self, token: &AdminToken) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn check_auth(&self, token: &AdminToken)
    -> impl Future<Output = Result<bool, ApiError>> + Send;

    fn list_ads(
        &self,
        token: &AdminToken,
    ) -> impl Future<Output = Result<Vec<AdCreative>, ApiError>> + Send;

    fn create_ad(
        &self,
        token: &AdminToken,
        draft: &AdDraft,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn update_ad(
        &self,
        token: &AdminToken,
        id: i64,
        patch: &AdPatch,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn delete_ad(
        &self,
        token: &AdminToken,
        id: i64,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn toggle_ad(
        &self,
        token: &AdminToken,
        id: i64,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
