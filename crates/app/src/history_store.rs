use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{info, warn};

use commendai_core::domain::history::{HistoryEntry, sorted_for_display};
use commendai_infra::api::HistoryApi;

use crate::error::ClientError;

#[derive(Debug, Default)]
struct HistoryCache {
    entries: Vec<HistoryEntry>,
    notice: Option<ClientError>,
    refreshed_at: Option<DateTime<Utc>>,
}

pub struct HistoryStore<A> {
    api: Arc<A>,
    request_timeout: Duration,
    cache: Mutex<HistoryCache>,
}

impl<A: HistoryApi> HistoryStore<A> {
    pub fn new(api: Arc<A>, request_timeout: Duration) -> Self {
        Self {
            api,
            request_timeout,
            cache: Mutex::new(HistoryCache::default()),
        }
    }

    pub async fn refresh(&self) -> Result<usize, ClientError> {
        let result = match timeout(self.request_timeout, self.api.fetch_history()).await {
            Ok(Ok(entries)) => Ok(entries),
            Ok(Err(err)) => Err(ClientError::from(err)),
            Err(elapsed) => Err(ClientError::from(elapsed)),
        };
        let mut cache = self.cache.lock().await;
        match result {
            Ok(entries) => {
                let count = entries.len();
                cache.entries = entries;
                cache.notice = None;
                cache.refreshed_at = Some(Utc::now());
                info!(entries = count, "history refreshed");
                Ok(count)
            }
            Err(err) => {
                warn!(error = %err, cached = cache.entries.len(), "history refresh failed");
                cache.notice = Some(err.clone());
                Err(err)
            }
        }
    }

    pub async fn sorted_view(&self) -> Vec<HistoryEntry> {
        let cache = self.cache.lock().await;
        sorted_for_display(&cache.entries)
    }

    pub async fn len(&self) -> usize {
        self.cache.lock().await.entries.len()
    }

    pub async fn notice(&self) -> Option<ClientError> {
        self.cache.lock().await.notice.clone()
    }

    pub async fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.cache.lock().await.refreshed_at
    }

    pub async fn clear(&self) {
        *self.cache.lock().await = HistoryCache::default();
    }
}
