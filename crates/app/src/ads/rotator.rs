use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at, timeout};
use tracing::{debug, warn};

use commendai_core::domain::ads::{AdCreative, AdPosition, Viewport, creatives_for_slot};
use commendai_infra::api::AdsApi;

use crate::ads::markup;
use crate::error::ClientError;

#[derive(Debug, Default)]
struct SlotState {
    creatives: Vec<AdCreative>,
    current_index: usize,
    visible: bool,
}

impl SlotState {
    fn advance(&mut self) -> bool {
        if self.creatives.len() < 2 {
            return false;
        }
        self.current_index = (self.current_index + 1) % self.creatives.len();
        true
    }

    fn current(&self) -> Option<&AdCreative> {
        if !self.visible {
            return None;
        }
        self.creatives.get(self.current_index)
    }
}

struct RotationTimer {
    handle: JoinHandle<()>,
}

impl RotationTimer {
    fn arm(slot: Arc<Mutex<SlotState>>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                let mut state = slot.lock().await;
                if !state.advance() {
                    break;
                }
                debug!(index = state.current_index, "ad rotated");
            }
        });
        Self { handle }
    }

    fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for RotationTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAd {
    pub id: i64,
    pub text: String,
    pub link_url: Option<String>,
    pub index: usize,
    pub total: usize,
    pub overflow: bool,
}

pub struct AdRotator<A> {
    api: Arc<A>,
    slot: AdPosition,
    viewport: Viewport,
    period: Duration,
    request_timeout: Duration,
    state: Arc<Mutex<SlotState>>,
    timer: Mutex<Option<RotationTimer>>,
    load_seq: AtomicU64,
    alive: AtomicBool,
}

impl<A: AdsApi> AdRotator<A> {
    pub fn new(
        api: Arc<A>,
        slot: AdPosition,
        viewport: Viewport,
        period: Duration,
        request_timeout: Duration,
    ) -> Self {
        Self {
            api,
            slot,
            viewport,
            period,
            request_timeout,
            state: Arc::new(Mutex::new(SlotState::default())),
            timer: Mutex::new(None),
            load_seq: AtomicU64::new(0),
            alive: AtomicBool::new(true),
        }
    }

    pub async fn load(&self) -> usize {
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.disarm().await;

        let fetched = match timeout(self.request_timeout, self.api.fetch_active_ads()).await {
            Ok(Ok(creatives)) => creatives,
            Ok(Err(err)) => {
                warn!(slot = %self.slot, error = %ClientError::from(err), "ad load failed");
                Vec::new()
            }
            Err(elapsed) => {
                warn!(slot = %self.slot, error = %ClientError::from(elapsed), "ad load failed");
                Vec::new()
            }
        };

        if !self.alive.load(Ordering::SeqCst) || self.load_seq.load(Ordering::SeqCst) != seq {
            debug!(slot = %self.slot, "stale ad load ignored");
            return 0;
        }

        let creatives = creatives_for_slot(&fetched, &self.slot, self.viewport);
        let count = creatives.len();
        {
            let mut state = self.state.lock().await;
            *state = SlotState {
                creatives,
                current_index: 0,
                visible: true,
            };
        }
        if count > 1 {
            *self.timer.lock().await = Some(RotationTimer::arm(self.state.clone(), self.period));
        }
        debug!(slot = %self.slot, count, "ads loaded");
        count
    }

    pub async fn render(&self) -> Option<RenderedAd> {
        let state = self.state.lock().await;
        let creative = state.current()?;
        let text = markup::visible_text(&creative.content);
        let overflow = markup::overflows(&text, self.slot.text_capacity());
        if overflow {
            debug!(slot = %self.slot, ad_id = creative.id, "ad content overflows slot");
        }
        Some(RenderedAd {
            id: creative.id,
            text,
            link_url: creative.link_url.clone(),
            index: state.current_index,
            total: state.creatives.len(),
            overflow,
        })
    }

    pub async fn click(&self) -> Option<String> {
        let state = self.state.lock().await;
        state.current()?.link_url.clone()
    }

    pub async fn dismiss(&self) {
        self.state.lock().await.visible = false;
    }

    pub async fn select_index(&self, index: usize) -> bool {
        let mut state = self.state.lock().await;
        if index >= state.creatives.len() {
            return false;
        }
        state.current_index = index;
        true
    }

    pub async fn current_index(&self) -> usize {
        self.state.lock().await.current_index
    }

    pub async fn is_rotating(&self) -> bool {
        self.timer
            .lock()
            .await
            .as_ref()
            .is_some_and(RotationTimer::is_running)
    }

    pub async fn teardown(&self) {
        self.alive.store(false, Ordering::SeqCst);
        self.disarm().await;
    }

    async fn disarm(&self) {
        self.timer.lock().await.take();
    }
}
