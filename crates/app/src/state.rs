use std::sync::Arc;

use commendai_core::i18n::Translator;
use commendai_infra::api::ApiClient;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: Arc<ApiClient>,
    pub translator: Translator,
}
