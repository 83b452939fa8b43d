use commendai_core::i18n::MessageKey;

use crate::commands::CommandError;
use crate::history_store::HistoryStore;
use crate::state::AppState;

pub async fn show(state: &AppState) -> Result<(), CommandError> {
    let store = HistoryStore::new(state.api.clone(), state.config.request_timeout);
    let t = &state.translator;
    if let Err(err) = store.refresh().await {
        eprintln!(
            "{}",
            err.display_message(t, MessageKey::ErrorHistoryLoad)
        );
        return Err(err.into());
    }

    let entries = store.sorted_view().await;
    println!("{}", t.t(MessageKey::HistoryTitle));
    if entries.is_empty() {
        println!("  {}", t.t(MessageKey::HistoryEmpty));
        return Ok(());
    }
    for entry in entries {
        let marker = if entry.is_posted() {
            format!(" [{}]", t.t(MessageKey::HistoryPosted))
        } else {
            String::new()
        };
        println!(
            "- {}{marker}  {}",
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry.video_url.as_deref().unwrap_or("-")
        );
        println!("  {}", entry.text);
    }
    Ok(())
}
