use std::sync::Arc;

use commendai_core::i18n::MessageKey;
use commendai_infra::api::ApiClient;

use crate::cli::{GenerateArgs, PostArgs};
use crate::commands::CommandError;
use crate::history_store::HistoryStore;
use crate::session::{CommentSession, SessionPhase, SessionSettings, SessionView, Submission};
use crate::state::AppState;

fn open_session(state: &AppState) -> CommentSession<ApiClient> {
    let history = Arc::new(HistoryStore::new(
        state.api.clone(),
        state.config.request_timeout,
    ));
    CommentSession::new(
        state.api.clone(),
        history,
        SessionSettings {
            comment_style: state.config.comment_style.clone(),
            interface_language: state.translator.language(),
            request_timeout: state.config.request_timeout,
        },
    )
}

pub async fn generate(state: &AppState, args: GenerateArgs) -> Result<(), CommandError> {
    let session = open_session(state);
    let language = args
        .lang
        .unwrap_or_else(|| state.translator.language().comment_language().to_string());

    let outcome = session.generate(&args.url, &language).await;
    print_view(&session.view().await);
    outcome?;

    if let Some(text) = args.edit {
        session.edit_draft(&text).await?;
    }
    if args.post {
        let outcome = session.post().await;
        print_view(&session.view().await);
        if let Submission::Completed = outcome? {
            println!("{}", state.translator.t(MessageKey::SuccessPosted));
        }
    }
    session.teardown().await;
    Ok(())
}

pub async fn post(state: &AppState, args: PostArgs) -> Result<(), CommandError> {
    let session = open_session(state);
    session.select_video(&args.url).await?;
    session.use_history_item(&args.text).await?;

    let outcome = session.post().await;
    print_view(&session.view().await);
    if let Submission::Completed = outcome? {
        println!("{}", state.translator.t(MessageKey::SuccessPosted));
    }
    session.teardown().await;
    Ok(())
}

fn print_view(view: &SessionView) {
    println!("[{}]", view.status_text);
    if let Some(warning) = &view.warning {
        println!("! {warning}");
    }
    if let Some(error) = &view.error {
        eprintln!("{error}");
    }
    if matches!(
        view.phase,
        SessionPhase::Generated | SessionPhase::DuplicateWarning
    ) && !view.draft.is_empty()
    {
        println!("{}", view.draft.text);
        if let Some(id) = &view.draft.comment_id {
            println!("(comment id: {id})");
        }
    }
}
