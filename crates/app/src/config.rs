use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use commendai_core::types::language::InterfaceLanguage;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub request_timeout: Duration,
    pub ad_rotation_interval: Duration,
    pub comment_style: String,
    pub interface_language: InterfaceLanguage,
    pub token_file: PathBuf,
    pub viewport_width: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid integer for {0}: {1}")]
    InvalidNumber(&'static str, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = read_string(&lookup, "COMMENDAI_API_URL", "http://127.0.0.1:5000/api");
        let api_url = api_url.trim().trim_end_matches('/').to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue("COMMENDAI_API_URL", api_url));
        }
        let request_timeout_secs = read_u64(&lookup, "COMMENDAI_REQUEST_TIMEOUT_SECS", 30)?;
        if request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "COMMENDAI_REQUEST_TIMEOUT_SECS",
                "0".to_string(),
            ));
        }
        let rotation_secs = read_u64(&lookup, "COMMENDAI_AD_ROTATION_SECS", 5)?;
        if rotation_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "COMMENDAI_AD_ROTATION_SECS",
                "0".to_string(),
            ));
        }
        let comment_style = read_string(&lookup, "COMMENDAI_COMMENT_STYLE", "default");
        let interface_language = match read_optional_string(&lookup, "COMMENDAI_INTERFACE_LANGUAGE") {
            Some(raw) => InterfaceLanguage::try_from(raw.as_str())
                .map_err(|_| ConfigError::InvalidValue("COMMENDAI_INTERFACE_LANGUAGE", raw))?,
            None => read_optional_string(&lookup, "LANG")
                .and_then(|locale| InterfaceLanguage::detect(&locale))
                .unwrap_or_default(),
        };
        let token_file = PathBuf::from(read_string(
            &lookup,
            "COMMENDAI_TOKEN_FILE",
            "./data/admin_token",
        ));
        let viewport_width = read_u64(&lookup, "COMMENDAI_VIEWPORT_WIDTH", 1280)?;
        let viewport_width = u32::try_from(viewport_width).map_err(|_| {
            ConfigError::InvalidNumber("COMMENDAI_VIEWPORT_WIDTH", viewport_width.to_string())
        })?;

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
            ad_rotation_interval: Duration::from_secs(rotation_secs),
            comment_style,
            interface_language,
            token_file,
            viewport_width,
        })
    }
}

pub fn load_dotenv() -> Result<(), std::io::Error> {
    let path = Path::new(".env");
    if !path.exists() {
        return Ok(());
    }
    let contents = std::fs::read_to_string(path)?;
    for (key, value) in parse_dotenv(&contents) {
        if std::env::var_os(&key).is_none() {
            // Safety: invoked during startup before any threads are spawned.
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
    Ok(())
}

fn read_string(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &'static str,
) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn read_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber(key, raw))
}

fn read_optional_string(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Option<String> {
    let value = lookup(key).unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .filter_map(parse_dotenv_line)
        .collect()
}

fn parse_dotenv_line(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = parse_dotenv_value(value.trim());
    Some((key.to_string(), value))
}

fn parse_dotenv_value(value: &str) -> String {
    if let Some(stripped) = value.strip_prefix('"').and_then(|inner| inner.strip_suffix('"')) {
        return unescape_double_quoted(stripped);
    }
    if let Some(stripped) = value.strip_prefix('\'').and_then(|inner| inner.strip_suffix('\'')) {
        return stripped.to_string();
    }
    value.to_string()
}

fn unescape_double_quoted(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => output.push('\n'),
                Some('r') => output.push('\r'),
                Some('t') => output.push('\t'),
                Some('\\') => output.push('\\'),
                Some('"') => output.push('"'),
                Some(other) => {
                    output.push('\\');
                    output.push(other);
                }
                None => output.push('\\'),
            }
        } else {
            output.push(ch);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:5000/api");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.ad_rotation_interval, Duration::from_secs(5));
        assert_eq!(config.comment_style, "default");
        assert_eq!(config.interface_language, InterfaceLanguage::En);
        assert_eq!(config.viewport_width, 1280);
    }

    #[test]
    fn interface_language_falls_back_to_locale() {
        let config = config_from(&[("LANG", "tr_TR.UTF-8")]).unwrap();
        assert_eq!(config.interface_language, InterfaceLanguage::Tr);

        let config = config_from(&[
            ("LANG", "tr_TR.UTF-8"),
            ("COMMENDAI_INTERFACE_LANGUAGE", "ja"),
        ])
        .unwrap();
        assert_eq!(config.interface_language, InterfaceLanguage::Ja);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("COMMENDAI_REQUEST_TIMEOUT_SECS", "soon")]),
            Err(ConfigError::InvalidNumber("COMMENDAI_REQUEST_TIMEOUT_SECS", _))
        ));
        assert!(matches!(
            config_from(&[("COMMENDAI_AD_ROTATION_SECS", "0")]),
            Err(ConfigError::InvalidValue("COMMENDAI_AD_ROTATION_SECS", _))
        ));
        assert!(matches!(
            config_from(&[("COMMENDAI_INTERFACE_LANGUAGE", "de")]),
            Err(ConfigError::InvalidValue("COMMENDAI_INTERFACE_LANGUAGE", _))
        ));
        assert!(config_from(&[("COMMENDAI_API_URL", "localhost:5000")]).is_err());
    }

    #[test]
    fn api_url_trailing_slash_trimmed() {
        let config = config_from(&[("COMMENDAI_API_URL", "https://commend.example/api/")]).unwrap();
        assert_eq!(config.api_url, "https://commend.example/api");
    }

    #[test]
    fn parse_dotenv_line_variants() {
        assert_eq!(
            parse_dotenv_line("export COMMENDAI_API_URL=http://x/api"),
            Some(("COMMENDAI_API_URL".to_string(), "http://x/api".to_string()))
        );
        assert_eq!(
            parse_dotenv_line(r#"COMMENDAI_COMMENT_STYLE="witty\n""#).map(|(_, v)| v),
            Some("witty\n".to_string())
        );
        assert_eq!(
            parse_dotenv_line("COMMENDAI_COMMENT_STYLE='friendly tone'").map(|(_, v)| v),
            Some("friendly tone".to_string())
        );
        assert!(parse_dotenv_line("# comment").is_none());
        assert!(parse_dotenv_line("=orphan").is_none());
    }
}
