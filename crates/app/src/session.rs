use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{info, warn};

use commendai_core::domain::draft::Draft;
use commendai_core::error::CoreError;
use commendai_core::i18n::{MessageKey, Translator};
use commendai_core::types::language::{CommentLanguage, InterfaceLanguage};
use commendai_core::types::video_url::VideoUrl;
use commendai_infra::api::{CommentApi, GenerateCommentRequest, HistoryApi, PostCommentRequest};

use crate::error::ClientError;
use crate::history_store::HistoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Generating,
    Generated,
    DuplicateWarning,
    Error,
    Posting,
    Posted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Completed,
    /// Another request was in flight, or the session was torn down before
    /// the response arrived.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub comment_style: String,
    pub interface_language: InterfaceLanguage,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub draft: Draft,
    pub status: MessageKey,
    pub status_text: &'static str,
    pub error: Option<String>,
    pub warning: Option<String>,
    pub busy: bool,
}

#[derive(Debug)]
struct SessionState {
    phase: SessionPhase,
    draft: Draft,
    status: MessageKey,
    error: Option<String>,
    warning: Option<String>,
    in_flight: bool,
    alive: bool,
}

pub struct CommentSession<A> {
    api: Arc<A>,
    history: Arc<HistoryStore<A>>,
    settings: SessionSettings,
    translator: Translator,
    state: Mutex<SessionState>,
}

impl<A> CommentSession<A>
where
    A: CommentApi + HistoryApi,
{
    pub fn new(api: Arc<A>, history: Arc<HistoryStore<A>>, settings: SessionSettings) -> Self {
        let translator = Translator::new(settings.interface_language);
        let draft = Draft::new(settings.interface_language.comment_language());
        Self {
            api,
            history,
            settings,
            translator,
            state: Mutex::new(SessionState {
                phase: SessionPhase::Idle,
                draft,
                status: MessageKey::StatusReady,
                error: None,
                warning: None,
                in_flight: false,
                alive: true,
            }),
        }
    }

    pub async fn view(&self) -> SessionView {
        let state = self.state.lock().await;
        SessionView {
            phase: state.phase,
            draft: state.draft.clone(),
            status: state.status,
            status_text: self.translator.t(state.status),
            error: state.error.clone(),
            warning: state.warning.clone(),
            busy: state.in_flight,
        }
    }

    pub async fn generate(&self, video_url: &str, language: &str) -> Result<Submission, ClientError> {
        let validated = VideoUrl::try_from(video_url)
            .and_then(|url| CommentLanguage::try_from(language).map(|lang| (url, lang)));
        let (video_url, language) = match validated {
            Ok(pair) => pair,
            Err(err) => return Err(self.reject(err.into()).await),
        };

        let request = {
            let mut state = self.state.lock().await;
            if state.in_flight || !state.alive {
                return Ok(Submission::Ignored);
            }
            state.in_flight = true;
            state.phase = SessionPhase::Generating;
            state.status = MessageKey::StatusGenerating;
            state.error = None;
            GenerateCommentRequest {
                video_url,
                language,
                comment_style: self.settings.comment_style.clone(),
                interface_language: self.settings.interface_language,
            }
        };

        let result = match timeout(
            self.settings.request_timeout,
            self.api.generate_comment(&request),
        )
        .await
        {
            Ok(Ok(outcome)) => Ok(outcome),
            Ok(Err(err)) => Err(ClientError::from(err)),
            Err(elapsed) => Err(ClientError::from(elapsed)),
        };

        let mut state = self.state.lock().await;
        state.in_flight = false;
        if !state.alive {
            return Ok(Submission::Ignored);
        }
        match result {
            Ok(outcome) => {
                // The draft only moves to the new video together with new text.
                if let Some(text) = outcome.text() {
                    state.draft.video_url = Some(request.video_url.clone());
                    state.draft.language = request.language;
                    state.draft.fill(text, outcome.comment_id().cloned());
                } else if state.draft.is_empty() {
                    state.draft.video_url = Some(request.video_url.clone());
                    state.draft.language = request.language;
                }
                if outcome.is_warning() {
                    let message = outcome
                        .message()
                        .map(str::to_string)
                        .unwrap_or_else(|| {
                            self.translator.t(MessageKey::ErrorDuplicateDetected).to_string()
                        });
                    warn!(video_url = %request.video_url, message = %message, "duplicate warning");
                    state.warning = Some(message);
                    state.phase = SessionPhase::DuplicateWarning;
                    state.status = MessageKey::ErrorDuplicateDetected;
                } else {
                    state.phase = SessionPhase::Generated;
                    state.status = MessageKey::StatusGenerated;
                }
                info!(
                    video_id = request.video_url.video_id().unwrap_or("unknown"),
                    language = %request.language,
                    has_comment_id = state.draft.comment_id.is_some(),
                    "comment generated"
                );
                Ok(Submission::Completed)
            }
            Err(err) => {
                warn!(error = %err, video_url = %request.video_url, "comment generation failed");
                state.error = Some(self.translator_message(&err, MessageKey::ErrorUnknown));
                state.phase = SessionPhase::Error;
                state.status = MessageKey::StatusError;
                Err(err)
            }
        }
    }

    pub async fn post(&self) -> Result<Submission, ClientError> {
        let (request, previous_phase) = {
            let mut state = self.state.lock().await;
            if state.in_flight || !state.alive {
                return Ok(Submission::Ignored);
            }
            if state.draft.is_empty() {
                let err = ClientError::EmptyDraft;
                state.error = Some(self.translator_message(&err, MessageKey::ErrorPostUnknown));
                return Err(err);
            }
            let Some(video_url) = state.draft.video_url.clone() else {
                let err = ClientError::Validation(CoreError::InvalidVideoUrl(
                    "no video selected".to_string(),
                ));
                state.error = Some(self.translator_message(&err, MessageKey::ErrorPostUnknown));
                return Err(err);
            };
            let previous_phase = state.phase;
            state.in_flight = true;
            state.phase = SessionPhase::Posting;
            state.status = MessageKey::StatusPosting;
            state.error = None;
            let request = PostCommentRequest {
                video_url,
                comment_text: state.draft.text.clone(),
                comment_id: state.draft.comment_id.clone(),
                interface_language: self.settings.interface_language,
            };
            (request, previous_phase)
        };

        let result = match timeout(
            self.settings.request_timeout,
            self.api.post_comment(&request),
        )
        .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(ClientError::from(err)),
            Err(elapsed) => Err(ClientError::from(elapsed)),
        };

        {
            let mut state = self.state.lock().await;
            state.in_flight = false;
            if !state.alive {
                return Ok(Submission::Ignored);
            }
            if let Err(err) = result {
                warn!(error = %err, video_url = %request.video_url, "posting comment failed");
                state.error = Some(self.translator_message(&err, MessageKey::ErrorPostUnknown));
                state.phase = match previous_phase {
                    SessionPhase::DuplicateWarning => SessionPhase::DuplicateWarning,
                    _ => SessionPhase::Generated,
                };
                state.status = MessageKey::StatusPostError;
                return Err(err);
            }
            state.draft.clear();
            state.phase = SessionPhase::Posted;
            state.status = MessageKey::StatusPosted;
            info!(video_url = %request.video_url, "comment posted");
        }

        // The refresh is its own request; a failure only leaves a notice on
        // the store and does not undo the post.
        if let Err(err) = self.history.refresh().await {
            warn!(error = %err, "history refresh after post failed");
        }
        Ok(Submission::Completed)
    }

    pub async fn edit_draft(&self, text: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().await;
        if state.phase == SessionPhase::Posting {
            return Err(ClientError::Busy);
        }
        state.draft.text = text.to_string();
        Ok(())
    }

    pub async fn select_video(&self, video_url: &str) -> Result<(), ClientError> {
        let video_url = match VideoUrl::try_from(video_url) {
            Ok(url) => url,
            Err(err) => return Err(self.reject(err.into()).await),
        };
        let mut state = self.state.lock().await;
        if state.in_flight {
            return Err(ClientError::Busy);
        }
        state.draft.video_url = Some(video_url);
        Ok(())
    }

    pub async fn use_history_item(&self, text: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().await;
        if state.in_flight {
            return Err(ClientError::Busy);
        }
        state.draft.load_unlinked(text);
        state.error = None;
        state.warning = None;
        state.phase = SessionPhase::Generated;
        state.status = MessageKey::StatusHistoryLoaded;
        Ok(())
    }

    pub async fn reset(&self) -> Result<(), ClientError> {
        let mut state = self.state.lock().await;
        if state.in_flight {
            return Err(ClientError::Busy);
        }
        state.draft.clear();
        state.draft.video_url = None;
        state.error = None;
        state.warning = None;
        state.phase = SessionPhase::Idle;
        state.status = MessageKey::StatusReady;
        Ok(())
    }

    pub async fn dismiss_error(&self) {
        let mut state = self.state.lock().await;
        state.error = None;
        if state.phase == SessionPhase::Error {
            state.phase = if state.draft.is_empty() {
                SessionPhase::Idle
            } else {
                SessionPhase::Generated
            };
            state.status = MessageKey::StatusReady;
        }
    }

    pub async fn dismiss_warning(&self) {
        let mut state = self.state.lock().await;
        state.warning = None;
        if state.phase == SessionPhase::DuplicateWarning {
            state.phase = SessionPhase::Generated;
            state.status = MessageKey::StatusGenerated;
        }
    }

    pub async fn teardown(&self) {
        self.state.lock().await.alive = false;
    }

    async fn reject(&self, err: ClientError) -> ClientError {
        let mut state = self.state.lock().await;
        state.error = Some(self.translator_message(&err, MessageKey::ErrorUnknown));
        err
    }

    fn translator_message(&self, err: &ClientError, fallback: MessageKey) -> String {
        err.display_message(&self.translator, fallback)
    }
}
