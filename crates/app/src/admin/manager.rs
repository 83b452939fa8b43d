use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::time::{error::Elapsed, timeout};
use tracing::{debug, info, warn};

use commendai_core::domain::ads::{AdCreative, AdDraft, AdPatch};
use commendai_core::i18n::{MessageKey, Translator};
use commendai_infra::api::{AdminApi, AdminToken, ApiError, HistoryApi};

use crate::admin::claims;
use crate::error::ClientError;
use crate::history_store::HistoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminView {
    LoggedOut,
    Dashboard,
}

#[derive(Debug, Clone)]
pub struct AdminSnapshot {
    pub view: AdminView,
    pub ads: Vec<AdCreative>,
    pub history_total: Option<usize>,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct AdminState {
    token: Option<AdminToken>,
    ads: Vec<AdCreative>,
    history_total: Option<usize>,
    error: Option<String>,
}

pub struct AdminAdManager<A> {
    api: Arc<A>,
    history: HistoryStore<A>,
    translator: Translator,
    request_timeout: Duration,
    state: Mutex<AdminState>,
}

impl<A: AdminApi + HistoryApi> AdminAdManager<A> {
    pub fn new(api: Arc<A>, translator: Translator, request_timeout: Duration) -> Self {
        Self {
            history: HistoryStore::new(api.clone(), request_timeout),
            api,
            translator,
            request_timeout,
            state: Mutex::new(AdminState::default()),
        }
    }

    pub async fn view(&self) -> AdminView {
        if self.state.lock().await.token.is_some() {
            AdminView::Dashboard
        } else {
            AdminView::LoggedOut
        }
    }

    pub async fn snapshot(&self) -> AdminSnapshot {
        let state = self.state.lock().await;
        AdminSnapshot {
            view: if state.token.is_some() {
                AdminView::Dashboard
            } else {
                AdminView::LoggedOut
            },
            ads: state.ads.clone(),
            history_total: state.history_total,
            error: state.error.clone(),
        }
    }

    pub async fn token(&self) -> Option<AdminToken> {
        self.state.lock().await.token.clone()
    }

    pub async fn login(&self, password: &str) -> Result<(), ClientError> {
        let result = timeout(self.request_timeout, self.api.login(password)).await;
        let token = match flatten(result) {
            Ok(token) => token,
            Err(err) => {
                let message = match &err {
                    ClientError::Backend {
                        status: Some(401), ..
                    }
                    | ClientError::Auth => self.translator.t(MessageKey::ErrorInvalidPassword).to_string(),
                    other => other.display_message(&self.translator, MessageKey::ErrorUnknown),
                };
                warn!(error = %err, "admin login failed");
                self.state.lock().await.error = Some(message);
                return Err(err);
            }
        };
        {
            let mut state = self.state.lock().await;
            state.token = Some(token);
            state.error = None;
        }
        info!("admin logged in");
        self.refresh().await
    }

    /// Adopts a token stored by an earlier run. An expired JWT is dropped
    /// without contacting the backend.
    pub async fn resume(&self, token: AdminToken) -> Result<bool, ClientError> {
        if claims::is_expired(token.as_str(), Utc::now()) {
            debug!("stored admin token expired");
            self.invalidate().await;
            return Ok(false);
        }
        self.adopt(token).await;
        self.check_auth().await
    }

    pub async fn adopt(&self, token: AdminToken) {
        self.state.lock().await.token = Some(token);
    }

    pub async fn check_auth(&self) -> Result<bool, ClientError> {
        let token = match self.state.lock().await.token.clone() {
            Some(token) => token,
            None => return Ok(false),
        };
        if claims::is_expired(token.as_str(), Utc::now()) {
            self.invalidate().await;
            return Ok(false);
        }
        let result = timeout(self.request_timeout, self.api.check_auth(&token)).await;
        let is_admin = self.settle(result).await?;
        if !is_admin {
            self.invalidate().await;
        }
        Ok(is_admin)
    }

    pub async fn logout(&self) {
        let token = self.state.lock().await.token.clone();
        if let Some(token) = token {
            match timeout(self.request_timeout, self.api.logout(&token)).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => warn!(error = %err, "admin logout request failed"),
                Err(_) => warn!("admin logout request timed out"),
            }
        }
        self.invalidate().await;
        info!("admin logged out");
    }

    pub async fn refresh(&self) -> Result<(), ClientError> {
        let token = self.require_token().await?;
        let result = timeout(self.request_timeout, self.api.list_ads(&token)).await;
        let ads = self.settle(result).await?;

        let history_total = match self.history.refresh().await {
            Ok(count) => Some(count),
            Err(err) => {
                debug!(error = %err, "history statistic unavailable");
                None
            }
        };

        let mut state = self.state.lock().await;
        if state.token.is_none() {
            return Err(ClientError::Auth);
        }
        debug!(ads = ads.len(), "admin dashboard refreshed");
        state.ads = ads;
        if history_total.is_some() {
            state.history_total = history_total;
        }
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<AdCreative>, ClientError> {
        self.refresh().await?;
        Ok(self.state.lock().await.ads.clone())
    }

    pub async fn create(&self, draft: &AdDraft) -> Result<(), ClientError> {
        if draft.content.trim().is_empty() {
            return Err(ClientError::EmptyDraft);
        }
        let token = self.require_token().await?;
        let result = timeout(self.request_timeout, self.api.create_ad(&token, draft)).await;
        self.settle(result).await?;
        info!(position = %draft.position, "ad created");
        self.refresh().await
    }

    pub async fn update(&self, id: i64, patch: &AdPatch) -> Result<(), ClientError> {
        let token = self.require_token().await?;
        if patch.is_empty() {
            debug!(ad_id = id, "empty ad patch skipped");
            return Ok(());
        }
        let result = timeout(self.request_timeout, self.api.update_ad(&token, id, patch)).await;
        self.settle(result).await?;
        info!(ad_id = id, "ad updated");
        self.refresh().await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let token = self.require_token().await?;
        let result = timeout(self.request_timeout, self.api.delete_ad(&token, id)).await;
        self.settle(result).await?;
        info!(ad_id = id, "ad deleted");
        self.refresh().await
    }

    pub async fn toggle_active(&self, id: i64) -> Result<(), ClientError> {
        let token = self.require_token().await?;
        let result = timeout(self.request_timeout, self.api.toggle_ad(&token, id)).await;
        self.settle(result).await?;
        info!(ad_id = id, "ad toggled");
        self.refresh().await
    }

    async fn require_token(&self) -> Result<AdminToken, ClientError> {
        self.state.lock().await.token.clone().ok_or(ClientError::Auth)
    }

    async fn settle<T>(&self, result: Result<Result<T, ApiError>, Elapsed>) -> Result<T, ClientError> {
        match flatten(result) {
            Ok(value) => {
                self.state.lock().await.error = None;
                Ok(value)
            }
            Err(err) if err.is_auth() => {
                warn!("admin token rejected");
                self.invalidate().await;
                self.state.lock().await.error =
                    Some(err.display_message(&self.translator, MessageKey::ErrorUnknown));
                Err(err)
            }
            Err(err) => {
                warn!(error = %err, "admin request failed");
                self.state.lock().await.error =
                    Some(err.display_message(&self.translator, MessageKey::ErrorUnknown));
                Err(err)
            }
        }
    }

    async fn invalidate(&self) {
        *self.state.lock().await = AdminState::default();
        self.history.clear().await;
    }
}

fn flatten<T>(result: Result<Result<T, ApiError>, Elapsed>) -> Result<T, ClientError> {
    match result {
        Ok(inner) => inner.map_err(ClientError::from),
        Err(elapsed) => Err(ClientError::from(elapsed)),
    }
}
