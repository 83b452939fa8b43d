use chrono::{DateTime, Utc};
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use commendai_core::domain::ads::{AdCreative, AdDraft, AdPatch, AdPosition};
use commendai_core::domain::generation::{
    CommentId, GenerationOutcome, GenerationStatus, StructuredGeneration,
};
use commendai_core::domain::history::HistoryEntry;

use crate::api::{
    AdminApi, AdminToken, AdsApi, ApiError, CommentApi, GenerateCommentRequest, HistoryApi,
    PostCommentRequest,
};

const DEFAULT_AD_POSITION: &str = "left";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthScope {
    Public,
    Admin,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(&self, request: RequestBuilder, scope: AuthScope) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "backend response");
        if status.is_success() {
            return Ok(body);
        }
        Err(classify_failure(status.as_u16(), &body, scope))
    }

    async fn execute_json<T>(&self, request: RequestBuilder, scope: AuthScope) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let body = self.execute(request, scope).await?;
        decode(&body)
    }
}

impl CommentApi for ApiClient {
    async fn generate_comment(
        &self,
        request: &GenerateCommentRequest,
    ) -> Result<GenerationOutcome, ApiError> {
        let builder = self
            .http
            .post(self.url("/generate_comment"))
            .json(request);
        let payload: GenerateResponse = self.execute_json(builder, AuthScope::Public).await?;
        payload.normalize()
    }

    async fn post_comment(&self, request: &PostCommentRequest) -> Result<(), ApiError> {
        let builder = self.http.post(self.url("/post_comment")).json(request);
        self.execute(builder, AuthScope::Public).await?;
        Ok(())
    }
}

impl HistoryApi for ApiClient {
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let builder = self.http.get(self.url("/history"));
        let payload: HistoryResponse = self.execute_json(builder, AuthScope::Public).await?;
        Ok(payload
            .history
            .unwrap_or_default()
            .into_iter()
            .map(HistoryRecord::into_entry)
            .collect())
    }
}

impl AdsApi for ApiClient {
    async fn fetch_active_ads(&self) -> Result<Vec<AdCreative>, ApiError> {
        let builder = self.http.get(self.url("/public/active-ads"));
        let payload: AdsEnvelope = self.execute_json(builder, AuthScope::Public).await?;
        Ok(payload.into_creatives(true))
    }
}

impl AdminApi for ApiClient {
    async fn login(&self, password: &str) -> Result<AdminToken, ApiError> {
        let builder = self
            .http
            .post(self.url("/admin/login"))
            .json(&LoginRequest { password });
        let payload: LoginResponse = self.execute_json(builder, AuthScope::Public).await?;
        payload
            .token
            .filter(|token| !token.trim().is_empty())
            .map(AdminToken::new)
            .ok_or_else(|| ApiError::InvalidResponse("login response without token".to_string()))
    }

    async fn logout(&self, token: &AdminToken) -> Result<(), ApiError> {
        let builder = self
            .http
            .post(self.url("/admin/logout"))
            .bearer_auth(token.as_str());
        self.execute(builder, AuthScope::Admin).await?;
        Ok(())
    }

    async fn check_auth(&self, token: &AdminToken) -> Result<bool, ApiError> {
        let builder = self
            .http
            .get(self.url("/admin/check_auth"))
            .bearer_auth(token.as_str());
        let payload: CheckAuthResponse = self.execute_json(builder, AuthScope::Admin).await?;
        Ok(payload.is_admin)
    }

    async fn list_ads(&self, token: &AdminToken) -> Result<Vec<AdCreative>, ApiError> {
        let builder = self
            .http
            .get(self.url("/admin/ads"))
            .bearer_auth(token.as_str());
        let payload: AdsEnvelope = self.execute_json(builder, AuthScope::Admin).await?;
        Ok(payload.into_creatives(false))
    }

    async fn create_ad(&self, token: &AdminToken, draft: &AdDraft) -> Result<(), ApiError> {
        let builder = self
            .http
            .post(self.url("/admin/ads"))
            .bearer_auth(token.as_str())
            .json(draft);
        self.execute(builder, AuthScope::Admin).await?;
        Ok(())
    }

    async fn update_ad(&self, token: &AdminToken, id: i64, patch: &AdPatch) -> Result<(), ApiError> {
        let builder = self
            .http
            .put(self.url(&format!("/admin/ads/{id}")))
            .bearer_auth(token.as_str())
            .json(patch);
        self.execute(builder, AuthScope::Admin).await?;
        Ok(())
    }

    async fn delete_ad(&self, token: &AdminToken, id: i64) -> Result<(), ApiError> {
        let builder = self
            .http
            .delete(self.url(&format!("/admin/ads/{id}")))
            .bearer_auth(token.as_str());
        self.execute(builder, AuthScope::Admin).await?;
        Ok(())
    }

    async fn toggle_ad(&self, token: &AdminToken, id: i64) -> Result<(), ApiError> {
        let builder = self
            .http
            .put(self.url(&format!("/admin/ads/{id}/toggle")))
            .bearer_auth(token.as_str());
        self.execute(builder, AuthScope::Admin).await?;
        Ok(())
    }
}

fn classify_failure(status: u16, body: &str, scope: AuthScope) -> ApiError {
    if status == 403 || (status == 401 && scope == AuthScope::Admin) {
        return ApiError::Forbidden(status);
    }
    let payload: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = payload
        .message
        .or(payload.error)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    ApiError::Backend {
        status,
        message,
        user_friendly: payload.user_friendly.unwrap_or(false),
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body)
        .map_err(|err| ApiError::InvalidResponse(format!("{err}; body {}", truncate(body, 200))))
}

fn truncate(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_rfc2822(trimmed))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
    user_friendly: Option<bool>,
}

/// Ids arrive as strings from some endpoints and integers from others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Text(value) => value,
            WireId::Number(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Text(String),
    Structured(GenerateBody),
}

#[derive(Debug, Deserialize)]
struct GenerateBody {
    status: Option<String>,
    generated_text: Option<String>,
    comment_id: Option<WireId>,
    message: Option<String>,
    user_friendly: Option<bool>,
}

impl GenerateResponse {
    fn normalize(self) -> Result<GenerationOutcome, ApiError> {
        let body = match self {
            GenerateResponse::Text(text) => return Ok(GenerationOutcome::Text(text)),
            GenerateResponse::Structured(body) => body,
        };
        let status = match body.status.as_deref().map(str::trim) {
            None | Some("ok") | Some("success") => GenerationStatus::Ok,
            Some("warning") => GenerationStatus::Warning,
            Some("error") => {
                return Err(ApiError::Backend {
                    status: 200,
                    message: body.message,
                    user_friendly: body.user_friendly.unwrap_or(false),
                });
            }
            Some(other) => {
                return Err(ApiError::InvalidResponse(format!(
                    "unknown generation status: {other}"
                )));
            }
        };
        if status == GenerationStatus::Ok && body.generated_text.is_none() {
            return Err(ApiError::InvalidResponse(
                "generation succeeded without text".to_string(),
            ));
        }
        Ok(GenerationOutcome::Structured(StructuredGeneration {
            status,
            generated_text: body.generated_text,
            comment_id: body
                .comment_id
                .map(|id| CommentId::new(id.into_string())),
            message: body.message,
        }))
    }
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    history: Option<Vec<HistoryRecord>>,
}

#[derive(Debug, Deserialize)]
struct HistoryRecord {
    id: WireId,
    text: String,
    video_url: Option<String>,
    created_at: Option<String>,
    posted_at: Option<String>,
}

impl HistoryRecord {
    fn into_entry(self) -> HistoryEntry {
        HistoryEntry {
            id: self.id.into_string(),
            text: self.text,
            video_url: self.video_url,
            created_at: self
                .created_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or_default(),
            posted_at: self.posted_at.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Ad listings come back as a bare array or wrapped in `ads`/`data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AdsEnvelope {
    List(Vec<AdRecord>),
    Ads { ads: Vec<AdRecord> },
    Data { data: Vec<AdRecord> },
}

impl AdsEnvelope {
    fn into_creatives(self, active_by_default: bool) -> Vec<AdCreative> {
        let records = match self {
            AdsEnvelope::List(records)
            | AdsEnvelope::Ads { ads: records }
            | AdsEnvelope::Data { data: records } => records,
        };
        records
            .into_iter()
            .filter_map(|record| record.into_creative(active_by_default))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct AdRecord {
    id: i64,
    content: String,
    link_url: Option<String>,
    position: Option<String>,
    is_active: Option<bool>,
    created_at: Option<String>,
}

impl AdRecord {
    fn into_creative(self, active_by_default: bool) -> Option<AdCreative> {
        let raw_position = self.position.as_deref().unwrap_or(DEFAULT_AD_POSITION);
        let position = match AdPosition::parse(raw_position) {
            Ok(position) => position,
            Err(err) => {
                warn!(ad_id = self.id, error = %err, "skipping ad with invalid position");
                return None;
            }
        };
        Some(AdCreative {
            id: self.id,
            content: self.content,
            link_url: self.link_url.filter(|link| !link.trim().is_empty()),
            position,
            is_active: self.is_active.unwrap_or(active_by_default),
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
        })
    }
}

#[derive(Debug, serde::Serialize)]
struct LoginRequest<'a> {
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CheckAuthResponse {
    #[serde(default)]
    is_admin: bool,
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post, put};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use super::*;
    use commendai_core::types::language::{CommentLanguage, InterfaceLanguage};
    use commendai_core::types::video_url::VideoUrl;

    async fn spawn_backend(router: Router) -> ApiClient {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        ApiClient::new(reqwest::Client::new(), format!("http://{addr}/api/"))
    }

    fn generate_request() -> GenerateCommentRequest {
        GenerateCommentRequest {
            video_url: VideoUrl::try_from("https://youtube.com/watch?v=abc").unwrap(),
            language: CommentLanguage::English,
            comment_style: "default".to_string(),
            interface_language: InterfaceLanguage::En,
        }
    }

    #[test]
    fn normalize_bare_string_as_text() {
        let payload: GenerateResponse = serde_json::from_str("\"Nice video!\"").unwrap();
        assert_eq!(
            payload.normalize().unwrap(),
            GenerationOutcome::Text("Nice video!".to_string())
        );
    }

    #[test]
    fn normalize_warning_keeps_text_and_message() {
        let payload: GenerateResponse = serde_json::from_value(json!({
            "status": "warning",
            "generated_text": "Nice video!",
            "message": "Duplicate detected",
            "comment_id": 42
        }))
        .unwrap();
        let outcome = payload.normalize().unwrap();
        assert!(outcome.is_warning());
        assert_eq!(outcome.text(), Some("Nice video!"));
        assert_eq!(outcome.message(), Some("Duplicate detected"));
        assert_eq!(outcome.comment_id().map(CommentId::as_str), Some("42"));
    }

    #[test]
    fn normalize_success_alias_is_ok() {
        let payload: GenerateResponse = serde_json::from_value(json!({
            "status": "success",
            "generated_text": "Loved it"
        }))
        .unwrap();
        assert!(!payload.normalize().unwrap().is_warning());
    }

    #[test]
    fn normalize_error_status_is_backend_error() {
        let payload: GenerateResponse = serde_json::from_value(json!({
            "status": "error",
            "message": "quota exceeded",
            "user_friendly": true
        }))
        .unwrap();
        match payload.normalize().unwrap_err() {
            ApiError::Backend {
                message,
                user_friendly,
                ..
            } => {
                assert_eq!(message.as_deref(), Some("quota exceeded"));
                assert!(user_friendly);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn ads_envelope_accepts_all_shapes() {
        for body in [
            json!([{ "id": 1, "content": "a", "position": "top" }]),
            json!({ "ads": [{ "id": 1, "content": "a", "position": "top" }] }),
            json!({ "data": [{ "id": 1, "content": "a", "position": "top" }] }),
        ] {
            let envelope: AdsEnvelope = serde_json::from_value(body).unwrap();
            let creatives = envelope.into_creatives(true);
            assert_eq!(creatives.len(), 1);
            assert_eq!(creatives[0].position, AdPosition::Top);
            assert!(creatives[0].is_active);
        }
    }

    #[test]
    fn ad_record_defaults_position_and_parses_http_dates() {
        let envelope: AdsEnvelope = serde_json::from_value(json!([{
            "id": 3,
            "content": "<p>x</p>",
            "link_url": "",
            "is_active": false,
            "created_at": "Mon, 01 Jan 2024 10:00:00 GMT"
        }]))
        .unwrap();
        let creative = envelope.into_creatives(true).remove(0);
        assert_eq!(creative.position, AdPosition::Left);
        assert!(!creative.is_active);
        assert!(creative.link_url.is_none());
        assert!(creative.created_at.is_some());
    }

    #[test]
    fn classify_forbidden_and_backend_errors() {
        assert!(classify_failure(403, "", AuthScope::Public).is_auth());
        assert!(classify_failure(401, "", AuthScope::Admin).is_auth());
        match classify_failure(
            409,
            r#"{"status":"error","message":"already posted"}"#,
            AuthScope::Public,
        ) {
            ApiError::Backend {
                status, message, ..
            } => {
                assert_eq!(status, 409);
                assert_eq!(message.as_deref(), Some("already posted"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn generate_round_trip_over_http() {
        let router = Router::new().route(
            "/api/generate_comment",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["language"], "English");
                assert_eq!(body["interface_language"], "en");
                assert_eq!(body["comment_style"], "default");
                Json(json!({
                    "status": "ok",
                    "generated_text": "Great breakdown!",
                    "comment_id": "c-1"
                }))
            }),
        );
        let client = spawn_backend(router).await;
        let outcome = client.generate_comment(&generate_request()).await.unwrap();
        assert_eq!(outcome.text(), Some("Great breakdown!"));
        assert_eq!(outcome.comment_id().map(CommentId::as_str), Some("c-1"));
    }

    #[tokio::test]
    async fn history_parses_iso_timestamps() {
        let router = Router::new().route(
            "/api/history",
            get(|| async {
                Json(json!({
                    "status": "success",
                    "history": [{
                        "id": "0b7c",
                        "text": "hello",
                        "video_url": "https://youtu.be/abc",
                        "created_at": "2024-03-01T10:00:00.123456Z",
                        "posted_at": null
                    }]
                }))
            }),
        );
        let client = spawn_backend(router).await;
        let history = client.fetch_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, "0b7c");
        assert!(!history[0].is_posted());
    }

    #[tokio::test]
    async fn admin_toggle_forbidden_maps_to_auth_error() {
        let router = Router::new().route(
            "/api/admin/ads/{id}/toggle",
            put(|headers: HeaderMap| async move {
                assert_eq!(
                    headers.get("authorization").and_then(|v| v.to_str().ok()),
                    Some("Bearer stale")
                );
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "status": "error", "message": "Invalid or expired token." })),
                )
            }),
        );
        let client = spawn_backend(router).await;
        let err = client
            .toggle_ad(&AdminToken::new("stale"), 5)
            .await
            .unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn login_wrong_password_is_backend_error() {
        let router = Router::new().route(
            "/api/admin/login",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "status": "error", "message": "Invalid password." })),
                )
            }),
        );
        let client = spawn_backend(router).await;
        match client.login("nope").await.unwrap_err() {
            ApiError::Backend { status, .. } => assert_eq!(status, 401),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_network_error() {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = ApiClient::new(reqwest::Client::new(), format!("http://{addr}/api"));
        let err = client.fetch_history().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
    }
}
