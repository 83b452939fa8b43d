use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentLanguage {
    English,
    Turkish,
    Russian,
    Chinese,
    Japanese,
}

impl CommentLanguage {
    pub const ALL: [CommentLanguage; 5] = [
        CommentLanguage::English,
        CommentLanguage::Turkish,
        CommentLanguage::Russian,
        CommentLanguage::Chinese,
        CommentLanguage::Japanese,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CommentLanguage::English => "English",
            CommentLanguage::Turkish => "Turkish",
            CommentLanguage::Russian => "Russian",
            CommentLanguage::Chinese => "Chinese",
            CommentLanguage::Japanese => "Japanese",
        }
    }
}

impl TryFrom<&str> for CommentLanguage {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        CommentLanguage::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::UnsupportedLanguage(trimmed.to_string()))
    }
}

impl fmt::Display for CommentLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceLanguage {
    #[default]
    En,
    Tr,
    Ru,
    Zh,
    Ja,
}

impl InterfaceLanguage {
    pub const ALL: [InterfaceLanguage; 5] = [
        InterfaceLanguage::En,
        InterfaceLanguage::Tr,
        InterfaceLanguage::Ru,
        InterfaceLanguage::Zh,
        InterfaceLanguage::Ja,
    ];

    pub fn code(self) -> &'static str {
        match self {
            InterfaceLanguage::En => "en",
            InterfaceLanguage::Tr => "tr",
            InterfaceLanguage::Ru => "ru",
            InterfaceLanguage::Zh => "zh",
            InterfaceLanguage::Ja => "ja",
        }
    }

    pub fn comment_language(self) -> CommentLanguage {
        match self {
            InterfaceLanguage::En => CommentLanguage::English,
            InterfaceLanguage::Tr => CommentLanguage::Turkish,
            InterfaceLanguage::Ru => CommentLanguage::Russian,
            InterfaceLanguage::Zh => CommentLanguage::Chinese,
            InterfaceLanguage::Ja => CommentLanguage::Japanese,
        }
    }

    pub fn detect(locale: &str) -> Option<Self> {
        let prefix: String = locale.trim().chars().take(2).collect();
        Self::try_from(prefix.as_str()).ok()
    }
}

impl TryFrom<&str> for InterfaceLanguage {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        InterfaceLanguage::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::UnsupportedInterfaceLanguage(trimmed.to_string()))
    }
}

impl fmt::Display for InterfaceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
