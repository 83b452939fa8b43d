use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use commendai_core::i18n::Translator;
use commendai_infra::api::ApiClient;

use crate::config::AppConfig;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub fn build_state(config: AppConfig) -> Result<AppState, WiringError> {
    let client = Client::builder()
        .timeout(config.request_timeout)
        .user_agent(concat!("commendai/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let api = ApiClient::new(client, config.api_url.clone());
    let translator = Translator::new(config.interface_language);
    debug!(api_url = %api.base_url(), language = %config.interface_language, "state wired");
    Ok(AppState {
        config: Arc::new(config),
        api: Arc::new(api),
        translator,
    })
}
