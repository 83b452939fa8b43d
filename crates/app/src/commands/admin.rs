use commendai_core::domain::ads::{AdCreative, AdDraft, AdPatch, AdPosition};
use commendai_core::i18n::MessageKey;
use commendai_infra::api::ApiClient;

use crate::admin::token_file::TokenFile;
use crate::admin::{AdminAdManager, AdminView};
use crate::cli::AdminCommand;
use crate::commands::CommandError;
use crate::error::ClientError;
use crate::state::AppState;

pub async fn run(state: &AppState, command: AdminCommand) -> Result<(), CommandError> {
    let manager = AdminAdManager::new(
        state.api.clone(),
        state.translator,
        state.config.request_timeout,
    );
    let token_file = TokenFile::new(state.config.token_file.clone());

    let outcome = dispatch(state, &manager, &token_file, command).await;
    token_file.sync(manager.token().await.as_ref())?;

    if outcome.is_err() {
        if let Some(message) = manager.snapshot().await.error {
            eprintln!("{message}");
        }
    }
    outcome
}

async fn dispatch(
    state: &AppState,
    manager: &AdminAdManager<ApiClient>,
    token_file: &TokenFile,
    command: AdminCommand,
) -> Result<(), CommandError> {
    let stored = token_file.load()?;

    match command {
        AdminCommand::Login { password } => {
            let password = password
                .or_else(|| std::env::var("COMMENDAI_ADMIN_PASSWORD").ok())
                .ok_or(CommandError::MissingArgument("--password"))?;
            manager.login(&password).await?;
            print_dashboard(manager).await;
            Ok(())
        }
        AdminCommand::Logout => {
            if let Some(token) = stored {
                manager.adopt(token).await;
            }
            manager.logout().await;
            println!("logged out");
            Ok(())
        }
        AdminCommand::Check => {
            let resumed = match stored {
                Some(token) => match manager.resume(token).await {
                    Ok(resumed) => resumed,
                    Err(err) => {
                        if !err.is_auth() {
                            eprintln!(
                                "{}",
                                err.display_message(&state.translator, MessageKey::ErrorUnknown)
                            );
                        }
                        false
                    }
                },
                None => false,
            };
            println!("{}", if resumed { "authenticated" } else { "not logged in" });
            Ok(())
        }
        command => {
            let resumed = match stored {
                Some(token) => manager.resume(token).await?,
                None => false,
            };
            if !resumed {
                let err = ClientError::Auth;
                eprintln!(
                    "{}",
                    err.display_message(&state.translator, MessageKey::ErrorUnknown)
                );
                return Err(err.into());
            }
            manage(manager, command).await
        }
    }
}

async fn manage(
    manager: &AdminAdManager<ApiClient>,
    command: AdminCommand,
) -> Result<(), CommandError> {
    match command {
        AdminCommand::List => {
            if manager.list().await?.is_empty() {
                println!("no ads");
            }
            print_dashboard(manager).await;
            Ok(())
        }
        AdminCommand::Create {
            content,
            link,
            position,
            inactive,
        } => {
            let draft = AdDraft {
                content,
                link_url: link.filter(|link| !link.trim().is_empty()),
                position: AdPosition::parse(&position)?,
                is_active: !inactive,
            };
            manager.create(&draft).await?;
            print_dashboard(manager).await;
            Ok(())
        }
        AdminCommand::Update {
            id,
            content,
            link,
            position,
            active,
        } => {
            let patch = AdPatch {
                content,
                link_url: link,
                position: position.as_deref().map(AdPosition::parse).transpose()?,
                is_active: active,
            };
            manager.update(id, &patch).await?;
            print_dashboard(manager).await;
            Ok(())
        }
        AdminCommand::Delete { id } => {
            manager.delete(id).await?;
            print_dashboard(manager).await;
            Ok(())
        }
        AdminCommand::Toggle { id } => {
            manager.toggle_active(id).await?;
            print_dashboard(manager).await;
            Ok(())
        }
        AdminCommand::Login { .. } | AdminCommand::Logout | AdminCommand::Check => Ok(()),
    }
}

async fn print_dashboard(manager: &AdminAdManager<ApiClient>) {
    let snapshot = manager.snapshot().await;
    if snapshot.view == AdminView::LoggedOut {
        return;
    }
    match snapshot.history_total {
        Some(total) => println!("history entries: {total}"),
        None => println!("history entries: -"),
    }
    println!("ads: {}", snapshot.ads.len());
    for ad in &snapshot.ads {
        println!("{}", ad_line(ad));
    }
}

fn ad_line(ad: &AdCreative) -> String {
    let status = if ad.is_active { "active" } else { "inactive" };
    let preview: String = ad.content.chars().take(60).collect();
    format!(
        "  #{:<4} {:<14} {:<8} {}{}",
        ad.id,
        ad.position.as_str(),
        status,
        preview,
        ad.link_url
            .as_deref()
            .map(|link| format!("  -> {link}"))
            .unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use commendai_core::i18n::Translator;
    use commendai_core::types::language::InterfaceLanguage;
    use commendai_infra::api::AdminToken;

    use super::*;
    use crate::config::AppConfig;

    fn offline_state(token_file: PathBuf) -> AppState {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let api_url = format!("http://127.0.0.1:{port}/api");
        AppState {
            api: Arc::new(ApiClient::new(reqwest::Client::new(), api_url.clone())),
            config: Arc::new(AppConfig {
                api_url,
                request_timeout: Duration::from_secs(5),
                ad_rotation_interval: Duration::from_secs(5),
                comment_style: "default".to_string(),
                interface_language: InterfaceLanguage::En,
                token_file,
                viewport_width: 1280,
            }),
            translator: Translator::new(InterfaceLanguage::En),
        }
    }

    fn token_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("commendai-admin-cmd-{}", std::process::id()))
            .join(name)
    }

    #[tokio::test]
    async fn logout_clears_stored_token_while_offline() {
        let path = token_path("logout");
        let file = TokenFile::new(path.clone());
        file.store(&AdminToken::new("opaque")).unwrap();

        run(&offline_state(path), AdminCommand::Logout).await.unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn check_while_offline_keeps_stored_token() {
        let path = token_path("check");
        let file = TokenFile::new(path.clone());
        file.store(&AdminToken::new("opaque")).unwrap();

        run(&offline_state(path), AdminCommand::Check).await.unwrap();
        assert_eq!(file.load().unwrap(), Some(AdminToken::new("opaque")));
        file.remove().unwrap();
    }

    #[tokio::test]
    async fn commands_without_token_are_rejected_offline() {
        let path = token_path("missing");
        let result = run(&offline_state(path), AdminCommand::Delete { id: 1 }).await;
        assert!(matches!(result, Err(CommandError::Client(ClientError::Auth))));
    }
}
